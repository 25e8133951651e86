//! Repair for constructions that left visits unrouted.
//!
//! Greedy constructions can strand a visit when capacity is packed badly
//! even though a feasible assignment exists. Two fallbacks are tried:
//!
//! 1. [`insert_unrouted`] — cheapest feasible insertion of the stranded
//!    visits, largest demand first, into the existing routes.
//! 2. [`best_fit_decreasing`] — rebuild from scratch by packing visits
//!    largest demand first into the vehicle with the least spare capacity
//!    that still fits, then order each route by cheapest arc.

use super::Construction;
use crate::graph::{ArcCost, RoutingGraph};

/// Inserts unrouted visits at their cheapest feasible position.
///
/// Visits that fit nowhere stay in `construction.unrouted`.
pub fn insert_unrouted(graph: &RoutingGraph<'_>, construction: &mut Construction) {
    let mut pending = std::mem::take(&mut construction.unrouted);
    pending.sort_by(|&a, &b| graph.demand(b).cmp(&graph.demand(a)).then(a.cmp(&b)));

    let dimension = graph.capacity_dimension();
    let mut loads: Vec<i64> = construction
        .routes
        .iter()
        .map(|route| dimension.load(route))
        .collect();

    for index in pending {
        let demand = i64::from(graph.demand(index));
        let mut best: Option<(usize, usize, f64)> = None;

        for (vehicle, route) in construction.routes.iter().enumerate() {
            if !dimension.fits(vehicle, loads[vehicle] + demand) {
                continue;
            }
            for pos in 0..=route.len() {
                let delta = insertion_delta(graph, graph, vehicle, route, pos, index);
                if best.as_ref().is_none_or(|b| delta < b.2) {
                    best = Some((vehicle, pos, delta));
                }
            }
        }

        match best {
            Some((vehicle, pos, _)) => {
                construction.routes[vehicle].insert(pos, index);
                loads[vehicle] += demand;
            }
            None => construction.unrouted.push(index),
        }
    }
}

/// Packs visits into vehicles by demand, ignoring travel cost, then orders
/// each vehicle's visits by cheapest arc from the depot.
///
/// # Examples
///
/// ```
/// use parcel_routing::constructive::best_fit_decreasing;
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::models::ProblemInstance;
///
/// let problem = ProblemInstance::new(DistanceMatrix::new(6), vec![0, 3, 3, 2, 2, 2], &[6, 6], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
/// assert!(best_fit_decreasing(&graph).is_complete());
/// ```
pub fn best_fit_decreasing(graph: &RoutingGraph<'_>) -> Construction {
    let dimension = graph.capacity_dimension();
    let mut order: Vec<usize> = graph.visit_indices().collect();
    order.sort_by(|&a, &b| graph.demand(b).cmp(&graph.demand(a)).then(a.cmp(&b)));

    let mut bins: Vec<Vec<usize>> = vec![Vec::new(); graph.num_vehicles()];
    let mut loads = vec![0i64; graph.num_vehicles()];
    let mut unrouted = Vec::new();

    for index in order {
        let demand = i64::from(graph.demand(index));
        let vehicle = (0..graph.num_vehicles())
            .filter(|&v| dimension.fits(v, loads[v] + demand))
            .min_by_key(|&v| i64::from(graph.capacity(v)) - loads[v] - demand);
        match vehicle {
            Some(v) => {
                bins[v].push(index);
                loads[v] += demand;
            }
            None => unrouted.push(index),
        }
    }

    let routes = bins
        .into_iter()
        .enumerate()
        .map(|(vehicle, bin)| sequence_by_cheapest_arc(graph, vehicle, bin))
        .collect();
    unrouted.sort_unstable();

    Construction { routes, unrouted }
}

/// Orders a vehicle's visits by repeatedly taking the cheapest next arc.
fn sequence_by_cheapest_arc(graph: &RoutingGraph<'_>, vehicle: usize, mut pending: Vec<usize>) -> Vec<usize> {
    let mut route = Vec::with_capacity(pending.len());
    let mut tail = graph.start(vehicle);
    while !pending.is_empty() {
        let mut best_pos = 0;
        for pos in 1..pending.len() {
            if graph.cost(tail, pending[pos]) < graph.cost(tail, pending[best_pos]) {
                best_pos = pos;
            }
        }
        tail = pending.remove(best_pos);
        route.push(tail);
    }
    route
}

/// Cost change of inserting `index` at `pos` of a vehicle's route.
pub(crate) fn insertion_delta<C: ArcCost + ?Sized>(
    graph: &RoutingGraph<'_>,
    costs: &C,
    vehicle: usize,
    route: &[usize],
    pos: usize,
    index: usize,
) -> f64 {
    let prev = if pos == 0 { graph.start(vehicle) } else { route[pos - 1] };
    let next = if pos == route.len() {
        graph.end(vehicle)
    } else {
        route[pos]
    };

    // An idle vehicle costs nothing, so there is no prev → next arc to drop.
    let dropped = if route.is_empty() {
        0.0
    } else {
        costs.arc_cost(prev, next)
    };
    costs.arc_cost(prev, index) + costs.arc_cost(index, next) - dropped
}
