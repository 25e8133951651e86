//! Inter-route visit relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each visit from its current route to the best insertion
//! position in another vehicle's route, idle vehicles included. Accepts the
//! best move per pass if it reduces cost and the receiving vehicle's
//! capacity still holds.
//!
//! # Complexity
//!
//! O(n² × V) per pass where n = visits, V = vehicles.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::constructive::insertion_delta;
use crate::graph::{ArcCost, RoutingGraph};

/// A relocate move: move a visit from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate moves until none improves `costs`.
///
/// Returns `true` if at least one move was applied.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::relocate_improve;
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 5.0, 5.0],
///     vec![5.0, 0.0, 1.0],
///     vec![5.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1], &[5, 5], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let mut routes = vec![vec![0], vec![1]];
/// assert!(relocate_improve(&mut routes, &graph, &graph));
/// assert_eq!(routes.iter().filter(|r| r.is_empty()).count(), 1);
/// ```
pub fn relocate_improve<C: ArcCost + ?Sized>(
    routes: &mut [Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any = false;
    while let Some(mv) = find_best_relocate(routes, graph, costs) {
        let visit = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, visit);
        any = true;
    }
    any
}

/// Finds the best improving relocate move across all route pairs.
fn find_best_relocate<C: ArcCost + ?Sized>(
    routes: &[Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> Option<RelocateMove> {
    let dimension = graph.capacity_dimension();
    let loads: Vec<i64> = routes.iter().map(|r| dimension.load(r)).collect();
    let mut best: Option<RelocateMove> = None;

    for from_r in 0..routes.len() {
        for from_pos in 0..routes[from_r].len() {
            let visit = routes[from_r][from_pos];
            let demand = i64::from(graph.demand(visit));
            let removal = removal_delta(graph, costs, from_r, &routes[from_r], from_pos);

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r || !dimension.fits(to_r, loads[to_r] + demand) {
                    continue;
                }

                for to_pos in 0..=to_route.len() {
                    let delta = removal + insertion_delta(graph, costs, to_r, to_route, to_pos, visit);
                    if delta < -1e-10 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Cost change of removing the visit at `pos` from a vehicle's route.
pub(crate) fn removal_delta<C: ArcCost + ?Sized>(
    graph: &RoutingGraph<'_>,
    costs: &C,
    vehicle: usize,
    route: &[usize],
    pos: usize,
) -> f64 {
    let prev = if pos == 0 { graph.start(vehicle) } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        graph.end(vehicle)
    } else {
        route[pos + 1]
    };
    let visit = route[pos];

    // Old: prev → visit → next
    // New: prev → next, or nothing once the vehicle is idle
    let added = if route.len() == 1 {
        0.0
    } else {
        costs.arc_cost(prev, next)
    };
    added - costs.arc_cost(prev, visit) - costs.arc_cost(visit, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 5.0, 8.0, 12.0],
            vec![5.0, 0.0, 3.0, 7.0],
            vec![8.0, 3.0, 0.0, 4.0],
            vec![12.0, 7.0, 4.0, 0.0],
        ])
        .expect("valid")
    }

    fn total(routes: &[Vec<usize>], graph: &RoutingGraph<'_>) -> f64 {
        routes
            .iter()
            .enumerate()
            .map(|(v, r)| graph.route_cost(v, r))
            .sum()
    }

    #[test]
    fn test_relocate_single_route() {
        let p = ProblemInstance::new(matrix(), vec![0, 1, 1, 1], &[10], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 1, 2]];
        assert!(!relocate_improve(&mut routes, &g, &g));
        assert_eq!(routes, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_relocate_merges_split_routes() {
        let p = ProblemInstance::new(matrix(), vec![0, 1, 1, 1], &[10, 10], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 1], vec![2]];
        let before = total(&routes, &g);
        assert!(relocate_improve(&mut routes, &g, &g));
        assert!(total(&routes, &g) < before);
        assert_eq!(routes.iter().map(Vec::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let p = ProblemInstance::new(matrix(), vec![0, 5, 5, 5], &[5, 5, 5], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0], vec![1], vec![2]];
        assert!(!relocate_improve(&mut routes, &g, &g));
        for (v, route) in routes.iter().enumerate() {
            assert!(g.capacity_dimension().is_feasible(v, route));
        }
    }

    #[test]
    fn test_removal_delta() {
        let p = ProblemInstance::new(matrix(), vec![0, 1, 1, 1], &[10], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        // Removing location 2 from 1 → 2 → 3: d(1,3) - d(1,2) - d(2,3) = 7 - 3 - 4
        let delta = removal_delta(&g, &g, 0, &[0, 1, 2], 1);
        assert!(delta.abs() < 1e-10);
        // Removing the only visit drops the whole route.
        assert_eq!(removal_delta(&g, &g, 0, &[2], 0), -24.0);
    }
}
