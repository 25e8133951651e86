//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in a route, reverse the segment
//! r[i..=j] and keep the reversal if the route gets cheaper:
//!
//! ```text
//! before: prev → r[i] → r[i+1] → ... → r[j] → next
//! after:  prev → r[j] → r[j-1] → ... → r[i] → next
//! ```
//!
//! Travel costs need not be symmetric, so the arcs inside the reversed
//! segment are re-priced rather than assumed unchanged. Repeats until no
//! further improvement is found (first-improvement strategy).
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::graph::{ArcCost, RoutingGraph};

/// Applies 2-opt improvement to every route.
///
/// Loads are unchanged by a reversal, so capacity is never checked.
/// Returns `true` if any route was changed.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::two_opt_improve;
/// use parcel_routing::models::ProblemInstance;
///
/// // Locations on a line at 0, 1, 2, 3.
/// let pos = [0.0f64, 1.0, 2.0, 3.0];
/// let rows: Vec<Vec<f64>> = pos.iter().map(|a| pos.iter().map(|b| (a - b).abs()).collect()).collect();
/// let dm = DistanceMatrix::from_rows(&rows).unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1, 1], &[10], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// // Suboptimal order: 2, 1, 3
/// let mut routes = vec![vec![1, 0, 2]];
/// assert!(two_opt_improve(&mut routes, &graph, &graph));
/// assert!(graph.route_cost(0, &routes[0]) <= 6.0 + 1e-10);
/// ```
pub fn two_opt_improve<C: ArcCost + ?Sized>(
    routes: &mut [Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> bool {
    let mut any = false;
    for (vehicle, route) in routes.iter_mut().enumerate() {
        any |= improve_route(route, graph.start(vehicle), graph.end(vehicle), costs);
    }
    any
}

fn improve_route<C: ArcCost + ?Sized>(route: &mut [usize], start: usize, end: usize, costs: &C) -> bool {
    if route.len() < 2 {
        return false;
    }

    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        let n = route.len();

        for i in 0..n - 1 {
            for j in i + 1..n {
                let delta = two_opt_delta(route, start, end, costs, i, j);
                if delta < -1e-10 {
                    route[i..=j].reverse();
                    improved = true;
                    any = true;
                }
            }
        }
    }
    any
}

/// Computes the cost change from reversing `route[i..=j]`.
fn two_opt_delta<C: ArcCost + ?Sized>(
    route: &[usize],
    start: usize,
    end: usize,
    costs: &C,
    i: usize,
    j: usize,
) -> f64 {
    let prev = if i == 0 { start } else { route[i - 1] };
    let next = if j == route.len() - 1 { end } else { route[j + 1] };

    let mut old_cost = costs.arc_cost(prev, route[i]) + costs.arc_cost(route[j], next);
    let mut new_cost = costs.arc_cost(prev, route[j]) + costs.arc_cost(route[i], next);
    for k in i..j {
        old_cost += costs.arc_cost(route[k], route[k + 1]);
        new_cost += costs.arc_cost(route[k + 1], route[k]);
    }

    new_cost - old_cost
}
