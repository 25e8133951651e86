//! Guided local search over the descent neighborhood.
//!
//! # Algorithm
//!
//! 1. Descend to a local optimum on true travel cost.
//! 2. Penalize the arcs of the current solution with maximal utility
//!    `cost(a, b) / (1 + penalty(a, b))`.
//! 3. Descend again on the augmented cost
//!    `cost(a, b) + λ × penalty(a, b)`, which pushes the search out of the
//!    local optimum.
//! 4. Keep the best solution seen by true cost; repeat from 2 until the
//!    deadline, until `max_stale` rounds pass without a new best, or until
//!    no arc of the current solution has positive utility.
//!
//! λ is `penalty_factor × cost / arcs` of the first local optimum.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use super::descend;
use crate::graph::{ArcCost, RoutingGraph};
use crate::termination::Termination;

/// Arc cost plus a weighted penalty per location pair.
pub struct AugmentedCost<'g, 'a> {
    graph: &'g RoutingGraph<'a>,
    penalties: &'g [u32],
    num_nodes: usize,
    lambda: f64,
}

impl ArcCost for AugmentedCost<'_, '_> {
    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        let key = self.graph.index_to_node(from) * self.num_nodes + self.graph.index_to_node(to);
        self.graph.cost(from, to) + self.lambda * f64::from(self.penalties[key])
    }
}

/// Result of a guided local search run.
#[derive(Debug, Clone)]
pub struct GuidedSearchResult {
    /// Best routes found, one per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// True travel cost of `routes`.
    pub cost: f64,
    /// Penalization rounds performed.
    pub iterations: usize,
    /// Rounds that produced a new best.
    pub improvements: usize,
}

/// Guided local search state: arc penalties and their weight.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::local_search::GuidedLocalSearch;
/// use parcel_routing::models::ProblemInstance;
/// use parcel_routing::termination::MaxTime;
/// use std::time::Duration;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 4.0, 4.0, 6.0],
///     vec![4.0, 0.0, 6.0, 4.0],
///     vec![4.0, 6.0, 0.0, 4.0],
///     vec![6.0, 4.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 1, 1, 1], &[3], 1.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let mut gls = GuidedLocalSearch::new(&graph, 0.1, 50);
/// let result = gls.run(vec![vec![0, 2, 1]], &graph, &MaxTime::new(Duration::from_secs(5)));
/// assert!((result.cost - 16.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct GuidedLocalSearch {
    penalties: Vec<u32>,
    num_nodes: usize,
    penalty_factor: f64,
    lambda: f64,
    max_stale: usize,
    log_search: bool,
}

impl GuidedLocalSearch {
    /// Creates a search with all penalties at zero.
    pub fn new(graph: &RoutingGraph<'_>, penalty_factor: f64, max_stale: usize) -> Self {
        let num_nodes = graph.manager().num_nodes();
        Self {
            penalties: vec![0; num_nodes * num_nodes],
            num_nodes,
            penalty_factor,
            lambda: 0.0,
            max_stale,
            log_search: false,
        }
    }

    /// Enables per-iteration search logging at `debug` level.
    pub fn with_search_log(mut self, enabled: bool) -> Self {
        self.log_search = enabled;
        self
    }

    /// Penalty currently held by the arc between two locations.
    pub fn penalty(&self, from_node: usize, to_node: usize) -> u32 {
        self.penalties[from_node * self.num_nodes + to_node]
    }

    /// Current penalty weight.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Augmented arc cost under the current penalties.
    pub fn augmented<'g, 'a>(&'g self, graph: &'g RoutingGraph<'a>) -> AugmentedCost<'g, 'a> {
        AugmentedCost {
            graph,
            penalties: &self.penalties,
            num_nodes: self.num_nodes,
            lambda: self.lambda,
        }
    }

    /// Runs the search from `routes` until `termination` fires or the
    /// search stalls.
    pub fn run(
        &mut self,
        mut routes: Vec<Vec<usize>>,
        graph: &RoutingGraph<'_>,
        termination: &dyn Termination,
    ) -> GuidedSearchResult {
        descend(&mut routes, graph, graph, termination);
        let mut best = routes.clone();
        let mut best_cost = graph.solution_cost(&best);
        let mut iterations = 0;
        let mut improvements = 0;

        let arcs = num_arcs(&routes);
        if arcs == 0 {
            return GuidedSearchResult {
                routes: best,
                cost: best_cost,
                iterations,
                improvements,
            };
        }
        self.lambda = self.penalty_factor * best_cost / arcs as f64;

        let mut stale = 0;
        while stale < self.max_stale && !termination.is_termination() {
            if !self.penalize(graph, &routes) {
                log::debug!("guided local search converged after {} iterations", iterations);
                break;
            }
            iterations += 1;

            descend(&mut routes, graph, &self.augmented(graph), termination);

            let cost = graph.solution_cost(&routes);
            if self.log_search {
                log::debug!(
                    "gls iteration {}: cost {:.3}, best {:.3}, stale {}, lambda {:.3}, budget used {:.0}%",
                    iterations,
                    cost,
                    best_cost,
                    stale,
                    self.lambda,
                    termination.estimate() * 100.0
                );
            }
            if cost < best_cost - 1e-10 {
                best.clone_from(&routes);
                best_cost = cost;
                improvements += 1;
                stale = 0;
            } else {
                stale += 1;
            }
        }

        GuidedSearchResult {
            routes: best,
            cost: best_cost,
            iterations,
            improvements,
        }
    }

    /// Penalizes the maximal-utility arcs of `routes`.
    ///
    /// Returns `false` when no arc has positive utility, i.e. the search
    /// has nothing left to push against.
    pub fn penalize(&mut self, graph: &RoutingGraph<'_>, routes: &[Vec<usize>]) -> bool {
        let arcs = solution_arcs(graph, routes);
        let utility = |&(from, to): &(usize, usize)| {
            let key = graph.index_to_node(from) * self.num_nodes + graph.index_to_node(to);
            graph.cost(from, to) / (1.0 + f64::from(self.penalties[key]))
        };

        let max_utility = arcs.iter().map(utility).fold(0.0f64, f64::max);
        if max_utility <= 0.0 {
            return false;
        }

        let keys: Vec<usize> = arcs
            .iter()
            .filter(|arc| utility(*arc) >= max_utility - 1e-12)
            .map(|&(from, to)| graph.index_to_node(from) * self.num_nodes + graph.index_to_node(to))
            .collect();
        for key in keys {
            self.penalties[key] = self.penalties[key].saturating_add(1);
        }
        true
    }
}

/// Arcs travelled by non-idle vehicles, terminals included.
fn solution_arcs(graph: &RoutingGraph<'_>, routes: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut arcs = Vec::with_capacity(num_arcs(routes));
    for (vehicle, route) in routes.iter().enumerate() {
        if route.is_empty() {
            continue;
        }
        let mut prev = graph.start(vehicle);
        for &index in route {
            arcs.push((prev, index));
            prev = index;
        }
        arcs.push((prev, graph.end(vehicle)));
    }
    arcs
}

fn num_arcs(routes: &[Vec<usize>]) -> usize {
    routes.iter().filter(|r| !r.is_empty()).map(|r| r.len() + 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;
    use crate::termination::MaxTime;
    use std::time::Duration;

    fn square() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 4.0, 4.0, 6.0],
            vec![4.0, 0.0, 6.0, 4.0],
            vec![4.0, 6.0, 0.0, 4.0],
            vec![6.0, 4.0, 4.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 1, 1, 1], &[2, 2], 1.0)
    }

    fn budget() -> MaxTime {
        MaxTime::new(Duration::from_secs(5))
    }

    #[test]
    fn test_augmented_cost_adds_penalty() {
        let p = square();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut gls = GuidedLocalSearch::new(&g, 0.5, 10);
        gls.lambda = 2.0;
        let routes = vec![vec![0], vec![]];
        assert!(gls.penalize(&g, &routes));
        // Both arcs of depot → 1 → depot have utility 4.
        assert_eq!(gls.penalty(0, 1), 1);
        assert_eq!(gls.penalty(1, 0), 1);
        let aug = gls.augmented(&g);
        assert_eq!(aug.arc_cost(g.start(0), 0), 6.0);
        assert_eq!(aug.arc_cost(0, 1), 6.0);
    }

    #[test]
    fn test_penalize_prefers_expensive_arcs() {
        let p = square();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut gls = GuidedLocalSearch::new(&g, 0.1, 10);
        // depot → 3 costs 6, the other two arcs cost 4
        let routes = vec![vec![2, 0], vec![]];
        assert!(gls.penalize(&g, &routes));
        assert_eq!(gls.penalty(0, 3), 1);
        assert_eq!(gls.penalty(3, 1), 0);
        assert_eq!(gls.penalty(1, 0), 0);
    }

    #[test]
    fn test_converged_when_all_arcs_free() {
        let p = ProblemInstance::new(DistanceMatrix::new(3), vec![0, 1, 1], &[5], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let mut gls = GuidedLocalSearch::new(&g, 0.1, 10);
        assert!(!gls.penalize(&g, &[vec![0, 1]]));
        let result = gls.run(vec![vec![0, 1]], &g, &budget());
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_run_never_worse_than_start() {
        let p = square();
        let g = RoutingGraph::new(&p).expect("valid");
        let start = vec![vec![2], vec![0, 1]];
        let start_cost = g.solution_cost(&start);
        let mut gls = GuidedLocalSearch::new(&g, 0.1, 20);
        let result = gls.run(start, &g, &budget());
        assert!(result.cost <= start_cost + 1e-10);
        assert!((g.solution_cost(&result.routes) - result.cost).abs() < 1e-10);
        for (v, route) in result.routes.iter().enumerate() {
            assert!(g.capacity_dimension().is_feasible(v, route));
        }
    }

    #[test]
    fn test_run_respects_expired_deadline() {
        let p = square();
        let g = RoutingGraph::new(&p).expect("valid");
        let mut gls = GuidedLocalSearch::new(&g, 0.1, 1000);
        let result = gls.run(vec![vec![2], vec![0, 1]], &g, &MaxTime::new(Duration::ZERO));
        assert_eq!(result.iterations, 0);
        assert_eq!(result.routes.concat().len(), 3);
    }

    #[test]
    fn test_idle_fleet_returns_immediately() {
        let p = ProblemInstance::new(DistanceMatrix::new(1), vec![0], &[5], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let mut gls = GuidedLocalSearch::new(&g, 0.1, 10);
        let result = gls.run(vec![vec![]], &g, &budget());
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.iterations, 0);
    }
}
