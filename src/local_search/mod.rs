//! Local search operators for improving routes.
//!
//! Operators work on one visit sequence per vehicle (`routes[v]`, terminals
//! excluded) and are generic over [`ArcCost`], so the same moves serve
//! plain descent and [`GuidedLocalSearch`].
//!
//! - [`relocate`] — Inter-route visit relocation
//! - [`swap`] — Inter-route visit swap
//! - [`exchange`] — Inter-route tail exchange (2-opt*)
//! - [`two_opt`] — Intra-route 2-opt segment reversal
//! - [`or_opt`] — Intra-route segment relocation
//! - [`guided`] — Guided local search on top of the above

mod exchange;
mod guided;
mod or_opt;
mod relocate;
mod swap;
mod two_opt;

pub use exchange::exchange_improve;
pub use guided::{AugmentedCost, GuidedLocalSearch, GuidedSearchResult};
pub use or_opt::or_opt_improve;
pub use relocate::relocate_improve;
pub use swap::swap_improve;
pub use two_opt::two_opt_improve;

use crate::graph::{ArcCost, RoutingGraph};
use crate::termination::Termination;

/// Runs every operator in turn until none of them improves `costs` or
/// `termination` fires.
///
/// Capacity is respected by every move, so feasible routes stay feasible.
/// Returns `true` if the routes changed.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::descend;
/// use parcel_routing::models::ProblemInstance;
/// use parcel_routing::termination::MaxTime;
/// use std::time::Duration;
///
/// let pos = [0.0f64, 1.0, 2.0, 3.0];
/// let rows: Vec<Vec<f64>> = pos.iter().map(|a| pos.iter().map(|b| (a - b).abs()).collect()).collect();
/// let dm = DistanceMatrix::from_rows(&rows).unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1, 1], &[3, 3], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let mut routes = vec![vec![1], vec![2, 0]];
/// descend(&mut routes, &graph, &graph, &MaxTime::new(Duration::from_secs(5)));
/// assert!((graph.solution_cost(&routes) - 6.0).abs() < 1e-10);
/// ```
pub fn descend<C: ArcCost + ?Sized>(
    routes: &mut [Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
    termination: &dyn Termination,
) -> bool {
    let operators: [fn(&mut [Vec<usize>], &RoutingGraph<'_>, &C) -> bool; 5] = [
        relocate_improve::<C>,
        swap_improve::<C>,
        exchange_improve::<C>,
        two_opt_improve::<C>,
        or_opt_improve::<C>,
    ];

    let mut any = false;
    let mut improved = true;
    while improved && !termination.is_termination() {
        improved = false;
        for operator in &operators {
            if termination.is_termination() {
                break;
            }
            if operator(routes, graph, costs) {
                improved = true;
                any = true;
            }
        }
    }
    any
}
