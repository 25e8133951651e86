//! Inter-route exchange operator (2-opt*).
//!
//! # Algorithm
//!
//! The cross-exchange (2-opt*) operator swaps tail segments between two routes.
//! Given routes R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and
//! R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ], produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Cuts range over both ends of each route, so a whole route can be handed
//! to the other vehicle and idle vehicles can take over a tail. Segment
//! orientation never changes, which keeps the operator valid on asymmetric
//! matrices.
//!
//! # Complexity
//!
//! O(n² × V²) per pass, where n = visits per route, V = vehicles.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::graph::{route_cost_with, ArcCost, RoutingGraph};

/// Applies inter-route cross-exchange (2-opt*) improvement.
///
/// Returns `true` if at least one exchange was applied.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::exchange_improve;
/// use parcel_routing::models::ProblemInstance;
///
/// // Two clusters: {1, 2} to the east, {3, 4} to the west.
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 11.0, 10.0, 11.0],
///     vec![10.0, 0.0, 1.0, 20.0, 21.0],
///     vec![11.0, 1.0, 0.0, 21.0, 20.0],
///     vec![10.0, 20.0, 21.0, 0.0, 1.0],
///     vec![11.0, 21.0, 20.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1, 1, 1], &[2, 2], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// // Interleaved: each vehicle crosses between clusters.
/// let mut routes = vec![vec![0, 3], vec![2, 1]];
/// assert!(exchange_improve(&mut routes, &graph, &graph));
/// ```
pub fn exchange_improve<C: ArcCost + ?Sized>(
    routes: &mut [Vec<usize>],
    graph: &RoutingGraph<'_>,
    costs: &C,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;

        for r1 in 0..routes.len() {
            for r2 in (r1 + 1)..routes.len() {
                if routes[r1].is_empty() && routes[r2].is_empty() {
                    continue;
                }
                if let Some((cut1, cut2, delta)) =
                    find_best_exchange(graph, costs, (r1, routes[r1].as_slice()), (r2, routes[r2].as_slice()))
                {
                    if delta < -1e-10 {
                        let tail1: Vec<usize> = routes[r1].split_off(cut1);
                        let tail2: Vec<usize> = routes[r2].split_off(cut2);
                        routes[r1].extend(tail2);
                        routes[r2].extend(tail1);
                        improved = true;
                        any = true;
                    }
                }
            }
        }
    }
    any
}

/// Arc costs along a route, accumulated from either end.
struct PathCosts {
    /// `prefix[k]` = cost of start → r[0] → ... → r[k-1].
    prefix: Vec<f64>,
    /// `suffix[k]` = cost of r[k] → ... → r[n-1] → end.
    suffix: Vec<f64>,
    /// `loads[k]` = demand of r[0..k].
    loads: Vec<i64>,
}

impl PathCosts {
    fn new<C: ArcCost + ?Sized>(graph: &RoutingGraph<'_>, costs: &C, vehicle: usize, route: &[usize]) -> Self {
        let n = route.len();
        let mut prefix = vec![0.0; n + 1];
        let mut loads = vec![0i64; n + 1];
        let mut prev = graph.start(vehicle);
        for (k, &index) in route.iter().enumerate() {
            prefix[k + 1] = prefix[k] + costs.arc_cost(prev, index);
            loads[k + 1] = loads[k] + i64::from(graph.demand(index));
            prev = index;
        }

        let mut suffix = vec![0.0; n + 1];
        let mut next = graph.end(vehicle);
        for k in (0..n).rev() {
            suffix[k] = costs.arc_cost(route[k], next) + suffix[k + 1];
            next = route[k];
        }

        Self { prefix, suffix, loads }
    }
}

/// Finds the best cross-exchange between two routes.
/// Returns (cut_pos_r1, cut_pos_r2, delta) if improvement found.
fn find_best_exchange<C: ArcCost + ?Sized>(
    graph: &RoutingGraph<'_>,
    costs: &C,
    (v1, route1): (usize, &[usize]),
    (v2, route2): (usize, &[usize]),
) -> Option<(usize, usize, f64)> {
    let dimension = graph.capacity_dimension();
    let (n1, n2) = (route1.len(), route2.len());
    let p1 = PathCosts::new(graph, costs, v1, route1);
    let p2 = PathCosts::new(graph, costs, v2, route2);
    let old_cost = route_cost_with(costs, graph.start(v1), graph.end(v1), route1)
        + route_cost_with(costs, graph.start(v2), graph.end(v2), route2);

    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..=n1 {
        for j in 0..=n2 {
            // Both no-op corners leave every arc in place.
            if (i == n1 && j == n2) || (i == 0 && j == 0) {
                continue;
            }

            let load1 = p1.loads[i] + (p2.loads[n2] - p2.loads[j]);
            let load2 = p2.loads[j] + (p1.loads[n1] - p1.loads[i]);
            if !dimension.fits(v1, load1) || !dimension.fits(v2, load2) {
                continue;
            }

            // Terminals all map to the depot, so suffix costs carry over
            // between vehicles.
            let new1 = joined_cost(graph, costs, v1, route1, i, route2, j, &p1, &p2);
            let new2 = joined_cost(graph, costs, v2, route2, j, route1, i, &p2, &p1);
            let delta = new1 + new2 - old_cost;

            if best.as_ref().is_none_or(|b| delta < b.2) {
                best = Some((i, j, delta));
            }
        }
    }

    best
}

/// Cost of `head[..cut_head] ++ tail[cut_tail..]` driven by `vehicle`.
#[allow(clippy::too_many_arguments)]
fn joined_cost<C: ArcCost + ?Sized>(
    graph: &RoutingGraph<'_>,
    costs: &C,
    vehicle: usize,
    head: &[usize],
    cut_head: usize,
    tail: &[usize],
    cut_tail: usize,
    head_costs: &PathCosts,
    tail_costs: &PathCosts,
) -> f64 {
    if cut_head == 0 && cut_tail == tail.len() {
        return 0.0;
    }
    let from = if cut_head == 0 {
        graph.start(vehicle)
    } else {
        head[cut_head - 1]
    };
    let to = if cut_tail == tail.len() {
        graph.end(vehicle)
    } else {
        tail[cut_tail]
    };
    head_costs.prefix[cut_head] + costs.arc_cost(from, to) + tail_costs.suffix[cut_tail]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    fn clusters() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 11.0, 10.0, 11.0],
            vec![10.0, 0.0, 1.0, 20.0, 21.0],
            vec![11.0, 1.0, 0.0, 21.0, 20.0],
            vec![10.0, 20.0, 21.0, 0.0, 1.0],
            vec![11.0, 21.0, 20.0, 1.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 1, 1, 1, 1], &[2, 2], 1.0)
    }

    fn total(routes: &[Vec<usize>], graph: &RoutingGraph<'_>) -> f64 {
        routes
            .iter()
            .enumerate()
            .map(|(v, r)| graph.route_cost(v, r))
            .sum()
    }

    #[test]
    fn test_exchange_single_route() {
        let p = clusters();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 1, 2, 3]];
        assert!(!exchange_improve(&mut routes, &g, &g));
    }

    #[test]
    fn test_exchange_fixes_interleaved_routes() {
        let p = clusters();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 3], vec![2, 1]];
        let before = total(&routes, &g);
        assert!(exchange_improve(&mut routes, &g, &g));
        let after = total(&routes, &g);
        assert!(after < before);
        // 0→1→2→0 + 0→3→4→0 = 22 + 22
        assert!((after - 44.0).abs() < 1e-10);
    }

    #[test]
    fn test_exchange_respects_capacity() {
        let p = clusters();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 3], vec![2, 1]];
        exchange_improve(&mut routes, &g, &g);
        for (v, route) in routes.iter().enumerate() {
            assert!(g.capacity_dimension().is_feasible(v, route));
        }
    }

    #[test]
    fn test_exchange_preserves_all_visits() {
        let p = clusters();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut routes = vec![vec![0, 3], vec![2, 1]];
        exchange_improve(&mut routes, &g, &g);
        let mut all: Vec<usize> = routes.concat();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_joined_cost_matches_full_recompute() {
        let p = clusters();
        let g = RoutingGraph::new(&p).expect("valid");
        let (r1, r2) = (vec![0, 3], vec![2, 1]);
        let p1 = PathCosts::new(&g, &g, 0, &r1);
        let p2 = PathCosts::new(&g, &g, 1, &r2);
        for i in 0..=r1.len() {
            for j in 0..=r2.len() {
                let mut joined = r1[..i].to_vec();
                joined.extend_from_slice(&r2[j..]);
                let fast = joined_cost(&g, &g, 0, &r1, i, &r2, j, &p1, &p2);
                assert!((fast - g.route_cost(0, &joined)).abs() < 1e-10);
            }
        }
    }
}
