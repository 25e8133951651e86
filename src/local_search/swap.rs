//! Inter-route visit swap operator.
//!
//! Exchanges one visit of a route with one visit of another route, each
//! taking the other's position. Useful when capacity is tight and neither
//! visit can be relocated on its own.

use crate::graph::{ArcCost, RoutingGraph};

/// Applies the best improving inter-route swap until none is left.
///
/// Returns `true` if at least one swap was applied.
pub fn swap_improve<C: ArcCost + ?Sized>(routes: &mut [Vec<usize>], graph: &RoutingGraph<'_>, costs: &C) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any = false;
    while let Some((r1, p1, r2, p2)) = find_best_swap(routes, graph, costs) {
        let a = routes[r1][p1];
        routes[r1][p1] = routes[r2][p2];
        routes[r2][p2] = a;
        any = true;
    }
    any
}

fn find_best_swap<C: ArcCost + ?Sized>(
    routes: &[Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> Option<(usize, usize, usize, usize)> {
    let dimension = graph.capacity_dimension();
    let loads: Vec<i64> = routes.iter().map(|r| dimension.load(r)).collect();
    let mut best: Option<(usize, usize, usize, usize, f64)> = None;

    for r1 in 0..routes.len() {
        for r2 in (r1 + 1)..routes.len() {
            for p1 in 0..routes[r1].len() {
                let d1 = i64::from(graph.demand(routes[r1][p1]));
                for p2 in 0..routes[r2].len() {
                    let d2 = i64::from(graph.demand(routes[r2][p2]));
                    if !dimension.fits(r1, loads[r1] - d1 + d2) || !dimension.fits(r2, loads[r2] - d2 + d1) {
                        continue;
                    }

                    let delta = replace_delta(graph, costs, r1, &routes[r1], p1, routes[r2][p2])
                        + replace_delta(graph, costs, r2, &routes[r2], p2, routes[r1][p1]);
                    if delta < -1e-10 && best.as_ref().is_none_or(|b| delta < b.4) {
                        best = Some((r1, p1, r2, p2, delta));
                    }
                }
            }
        }
    }

    best.map(|(r1, p1, r2, p2, _)| (r1, p1, r2, p2))
}

/// Cost change of putting `index` in place of `route[pos]`.
fn replace_delta<C: ArcCost + ?Sized>(
    graph: &RoutingGraph<'_>,
    costs: &C,
    vehicle: usize,
    route: &[usize],
    pos: usize,
    index: usize,
) -> f64 {
    let prev = if pos == 0 { graph.start(vehicle) } else { route[pos - 1] };
    let next = if pos + 1 == route.len() {
        graph.end(vehicle)
    } else {
        route[pos + 1]
    };
    let old = route[pos];
    costs.arc_cost(prev, index) + costs.arc_cost(index, next) - costs.arc_cost(prev, old) - costs.arc_cost(old, next)
}
