//! Intra-route Or-opt improvement.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive visits to a different
//! position within the same route, keeping their orientation. Accepts the
//! first move that reduces cost and restarts the scan.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::graph::{ArcCost, RoutingGraph};

/// Longest segment tried.
const MAX_SEGMENT: usize = 3;

/// Applies Or-opt improvement to every route.
///
/// Returns `true` if any route was changed.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::or_opt_improve;
/// use parcel_routing::models::ProblemInstance;
///
/// let pos = [0.0f64, 1.0, 2.0, 3.0];
/// let rows: Vec<Vec<f64>> = pos.iter().map(|a| pos.iter().map(|b| (a - b).abs()).collect()).collect();
/// let dm = DistanceMatrix::from_rows(&rows).unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1, 1], &[10], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// // Location 1 is visited last instead of first.
/// let mut routes = vec![vec![1, 2, 0]];
/// let before = graph.route_cost(0, &routes[0]);
/// or_opt_improve(&mut routes, &graph, &graph);
/// assert!(graph.route_cost(0, &routes[0]) <= before);
/// ```
pub fn or_opt_improve<C: ArcCost + ?Sized>(
    routes: &mut [Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> bool {
    let mut any = false;
    for (vehicle, route) in routes.iter_mut().enumerate() {
        let (start, end) = (graph.start(vehicle), graph.end(vehicle));
        while try_or_opt_pass(route, start, end, costs) {
            any = true;
        }
    }
    any
}

/// One first-improvement scan. Returns `true` if a move was applied.
fn try_or_opt_pass<C: ArcCost + ?Sized>(route: &mut Vec<usize>, start: usize, end: usize, costs: &C) -> bool {
    let n = route.len();
    for len in 1..=MAX_SEGMENT.min(n.saturating_sub(1)) {
        for i in 0..=n - len {
            let first = route[i];
            let last = route[i + len - 1];
            let prev = if i == 0 { start } else { route[i - 1] };
            let next = if i + len == n { end } else { route[i + len] };
            let removal = costs.arc_cost(prev, next) - costs.arc_cost(prev, first) - costs.arc_cost(last, next);

            let mut rest: Vec<usize> = Vec::with_capacity(n - len);
            rest.extend_from_slice(&route[..i]);
            rest.extend_from_slice(&route[i + len..]);

            for pos in 0..=rest.len() {
                if pos == i {
                    continue;
                }
                let before = if pos == 0 { start } else { rest[pos - 1] };
                let after = if pos == rest.len() { end } else { rest[pos] };
                let insertion =
                    costs.arc_cost(before, first) + costs.arc_cost(last, after) - costs.arc_cost(before, after);

                if removal + insertion < -1e-10 {
                    let segment: Vec<usize> = route[i..i + len].to_vec();
                    rest.splice(pos..pos, segment);
                    *route = rest;
                    return true;
                }
            }
        }
    }
    false
}
