//! Clarke-Wright savings algorithm over a heterogeneous fleet.
//!
//! # Algorithm
//!
//! Starts with each visit on its own route. For every ordered pair (i, j)
//! the saving of serving j right after i instead of returning to the depot
//! in between is
//!
//! ```text
//! s(i, j) = c(i, depot) + c(depot, j) - c(i, j)
//! ```
//!
//! Routes are merged tail-to-head in decreasing order of savings while the
//! merged load fits the largest vehicle. Merged routes are then assigned to
//! vehicles heaviest first, each to the smallest free vehicle that can
//! carry it. Routes that find no vehicle are left unrouted for repair.
//!
//! Ordered pairs keep the heuristic correct on asymmetric matrices; no
//! route is ever reversed.
//!
//! # Complexity
//!
//! O(n² log n) where n = visits (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use super::Construction;
use crate::graph::RoutingGraph;

/// A savings value for serving `j` directly after `i`.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Builds initial routes with the Clarke-Wright savings algorithm.
///
/// # Examples
///
/// ```
/// use parcel_routing::constructive::savings;
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 1.0],
///     vec![4.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 5, 5], &[100], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let construction = savings(&graph);
/// assert!(construction.is_complete());
/// assert_eq!(construction.routes[0].len(), 2);
/// ```
pub fn savings(graph: &RoutingGraph<'_>) -> Construction {
    let num_visits = graph.visit_indices().len();
    let num_vehicles = graph.num_vehicles();
    let max_capacity = (0..num_vehicles)
        .map(|v| i64::from(graph.capacity(v)))
        .max()
        .unwrap_or(0);
    // All terminals map to the depot, so vehicle 0's pair stands for any.
    let (start, end) = (graph.start(0), graph.end(0));

    let mut savings = Vec::with_capacity(num_visits * num_visits.saturating_sub(1));
    for i in graph.visit_indices() {
        for j in graph.visit_indices() {
            if i == j {
                continue;
            }
            let s = graph.cost(i, end) + graph.cost(start, j) - graph.cost(i, j);
            if s > 0.0 {
                savings.push(Saving { i, j, value: s });
            }
        }
    }

    // Sort by decreasing savings; the stable sort keeps index order on ties.
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    // route_of[visit] = group holding it; groups start as singletons.
    let mut route_of: Vec<usize> = (0..num_visits).collect();
    let mut route_load: Vec<i64> = graph
        .visit_indices()
        .map(|i| i64::from(graph.demand(i)))
        .collect();
    let mut route_members: Vec<Vec<usize>> = graph.visit_indices().map(|i| vec![i]).collect();

    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }

        let combined_load = route_load[ri] + route_load[rj];
        if combined_load > max_capacity {
            continue;
        }

        // i must close its route and j must open the other.
        if route_members[ri].last() != Some(&saving.i) || route_members[rj].first() != Some(&saving.j) {
            continue;
        }

        let mut tail = std::mem::take(&mut route_members[rj]);
        for &member in &tail {
            route_of[member] = ri;
        }
        route_members[ri].append(&mut tail);
        route_load[ri] = combined_load;
        route_load[rj] = 0;
    }

    assign_to_vehicles(graph, route_members, route_load)
}

/// Assigns merged routes to vehicles, heaviest route first, best fit.
fn assign_to_vehicles(
    graph: &RoutingGraph<'_>,
    route_members: Vec<Vec<usize>>,
    route_load: Vec<i64>,
) -> Construction {
    let mut groups: Vec<(Vec<usize>, i64)> = route_members
        .into_iter()
        .zip(route_load)
        .filter(|(members, _)| !members.is_empty())
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); graph.num_vehicles()];
    let mut unrouted = Vec::new();

    for (members, load) in groups {
        let vehicle = (0..graph.num_vehicles())
            .filter(|&v| routes[v].is_empty() && graph.capacity_dimension().fits(v, load))
            .min_by_key(|&v| graph.capacity(v));
        match vehicle {
            Some(v) => routes[v] = members,
            None => unrouted.extend(members),
        }
    }
    unrouted.sort_unstable();

    Construction { routes, unrouted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    fn line_problem(demand: i32, capacities: &[i32]) -> ProblemInstance {
        let pos = [0.0f64, 1.0, 2.0, 3.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let dm = DistanceMatrix::from_rows(&rows).expect("valid");
        ProblemInstance::new(dm, vec![0, demand, demand, demand], capacities, 1.0)
    }

    #[test]
    fn test_savings_line() {
        let p = line_problem(10, &[30]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = savings(&g);
        assert!(c.is_complete());
        // 0→1→2→3→0 = 6
        assert!((g.route_cost(0, &c.routes[0]) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_savings_capacity_split() {
        let p = line_problem(15, &[25, 25, 25]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = savings(&g);
        assert!(c.is_complete());
        // 45 > 25, so at least two vehicles are used.
        assert!(c.routes.iter().filter(|r| !r.is_empty()).count() >= 2);
        for (v, route) in c.routes.iter().enumerate() {
            assert!(g.capacity_dimension().is_feasible(v, route));
        }
    }

    #[test]
    fn test_savings_too_few_vehicles() {
        // Capacity only allows one visit per route and there is one vehicle.
        let p = line_problem(15, &[25]);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = savings(&g);
        assert!(!c.is_complete());
        assert_eq!(c.routes[0].len(), 1);
        assert_eq!(c.unrouted.len(), 2);
    }

    #[test]
    fn test_savings_heavy_route_to_large_vehicle() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 10.0, 50.0],
            vec![10.0, 0.0, 1.0, 50.0],
            vec![10.0, 1.0, 0.0, 50.0],
            vec![50.0, 50.0, 50.0, 0.0],
        ])
        .expect("valid");
        let p = ProblemInstance::new(dm, vec![0, 4, 4, 2], &[3, 8], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = savings(&g);
        assert!(c.is_complete());
        assert_eq!(c.routes[1].len(), 2);
        assert_eq!(c.routes[0], vec![2]);
    }

    #[test]
    fn test_savings_depot_only() {
        let p = ProblemInstance::new(DistanceMatrix::new(1), vec![0], &[5], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let c = savings(&g);
        assert!(c.is_complete());
        assert!(c.routes[0].is_empty());
    }
}
