//! Path-cheapest-arc constructive heuristic.
//!
//! Every vehicle starts an open path at its start index. At each step the
//! cheapest arc from the tail of any open path to any unrouted visit is
//! added, provided the visit's demand still fits the vehicle's capacity.
//! Construction stops when everything is routed or no feasible arc is left.
//!
//! # Complexity
//!
//! O(n² × V) where n = visits, V = vehicles.

use super::Construction;
use crate::graph::RoutingGraph;

/// Builds initial routes with the path-cheapest-arc rule.
///
/// Ties are broken by lowest vehicle, then lowest routing index, so the
/// result is deterministic for a given instance.
///
/// # Examples
///
/// ```
/// use parcel_routing::constructive::path_cheapest_arc;
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 5, 5], &[10], 10.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let construction = path_cheapest_arc(&graph);
/// assert!(construction.is_complete());
/// assert_eq!(construction.routes, vec![vec![0, 1]]);
/// ```
pub fn path_cheapest_arc(graph: &RoutingGraph<'_>) -> Construction {
    let num_vehicles = graph.num_vehicles();
    let dimension = graph.capacity_dimension();
    let mut routed = vec![false; graph.visit_indices().len()];
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
    let mut loads = vec![0i64; num_vehicles];

    loop {
        let mut best: Option<(usize, usize, f64)> = None;

        for (vehicle, route) in routes.iter().enumerate() {
            let tail = route.last().copied().unwrap_or_else(|| graph.start(vehicle));
            for index in graph.visit_indices() {
                if routed[index] {
                    continue;
                }
                if !dimension.fits(vehicle, loads[vehicle] + i64::from(graph.demand(index))) {
                    continue;
                }
                let cost = graph.cost(tail, index);
                if best.as_ref().is_none_or(|b| cost < b.2) {
                    best = Some((vehicle, index, cost));
                }
            }
        }

        match best {
            Some((vehicle, index, _)) => {
                routed[index] = true;
                routes[vehicle].push(index);
                loads[vehicle] += i64::from(graph.demand(index));
            }
            None => break,
        }
    }

    let unrouted = routed
        .iter()
        .enumerate()
        .filter(|&(_, &r)| !r)
        .map(|(i, _)| i)
        .collect();

    Construction { routes, unrouted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    fn line_problem(capacities: &[i32]) -> ProblemInstance {
        // Locations on a line at 0, 1, 2, 3.
        let pos = [0.0f64, 1.0, 2.0, 3.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let dm = DistanceMatrix::from_rows(&rows).expect("valid");
        ProblemInstance::new(dm, vec![0, 10, 10, 10], capacities, 1.0)
    }

    #[test]
    fn test_all_on_one_route() {
        let p = line_problem(&[100]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = path_cheapest_arc(&g);
        assert!(c.is_complete());
        // Visit indices 0, 1, 2 are locations 1, 2, 3.
        assert_eq!(c.routes, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_capacity_splits_routes() {
        let p = line_problem(&[20, 20]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = path_cheapest_arc(&g);
        assert!(c.is_complete());
        for (vehicle, route) in c.routes.iter().enumerate() {
            let load: i32 = route.iter().map(|&i| g.demand(i)).sum();
            assert!(load <= g.capacity(vehicle));
        }
        assert_eq!(c.routes.iter().map(Vec::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_insufficient_capacity_leaves_unrouted() {
        let p = line_problem(&[15]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = path_cheapest_arc(&g);
        assert!(!c.is_complete());
        assert_eq!(c.routes[0].len(), 1);
        assert_eq!(c.unrouted.len(), 2);
    }

    #[test]
    fn test_depot_only() {
        let p = ProblemInstance::new(DistanceMatrix::new(1), vec![0], &[5], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = path_cheapest_arc(&g);
        assert!(c.is_complete());
        assert_eq!(c.routes, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_chooses_cheapest_arc() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 1.0],
            vec![10.0, 0.0, 9.0],
            vec![1.0, 9.0, 0.0],
        ])
        .expect("valid");
        let p = ProblemInstance::new(dm, vec![0, 5, 5], &[100], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = path_cheapest_arc(&g);
        // Location 2 first (cost 1), then location 1 (cost 9).
        assert_eq!(c.routes, vec![vec![1, 0]]);
    }
}
