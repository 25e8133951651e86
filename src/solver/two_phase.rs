//! Construction + improvement solver.

use std::time::{Duration, Instant};

use super::{
    FirstSolutionStrategy, LocalSearchMetaheuristic, SearchStats, Solve, SolveError, SolveOutcome, SolverConfig,
    SolverPhase,
};
use crate::constructive::{best_fit_decreasing, insert_unrouted, path_cheapest_arc, savings, Construction};
use crate::evaluation::RouteEvaluator;
use crate::graph::RoutingGraph;
use crate::local_search::{descend, GuidedLocalSearch};
use crate::termination::MaxTime;

/// Two-phase solver: a greedy construction, then local search until the
/// budget runs out or the search converges.
///
/// Construction is deterministic. When it strands visits, cheapest
/// insertion and then a best-fit-decreasing rebuild are tried before the
/// instance is declared infeasible. The budget bounds the improvement
/// phase only.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::models::ProblemInstance;
/// use parcel_routing::solver::{Solve, SolveOutcome, SolverConfig, TwoPhaseSolver};
/// use std::time::Duration;
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
/// let solver = TwoPhaseSolver::new(SolverConfig::default());
/// match solver.solve(&graph, Duration::from_millis(200)).unwrap() {
///     SolveOutcome::Solved { solution, .. } => assert_eq!(solution.total_distance(), 45.0),
///     SolveOutcome::Infeasible { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TwoPhaseSolver {
    config: SolverConfig,
}

impl TwoPhaseSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds initial routes, repairing if the heuristic strands visits.
    fn construct(&self, graph: &RoutingGraph<'_>) -> Construction {
        let mut construction = match self.config.first_solution_strategy {
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(graph),
            FirstSolutionStrategy::Savings => savings(graph),
        };
        if construction.is_complete() {
            return construction;
        }

        log::warn!(
            "construction left {} visits unrouted, trying insertion repair",
            construction.unrouted.len()
        );
        insert_unrouted(graph, &mut construction);
        if construction.is_complete() {
            return construction;
        }

        log::warn!(
            "insertion repair left {} visits unrouted, rebuilding by best-fit packing",
            construction.unrouted.len()
        );
        best_fit_decreasing(graph)
    }

    /// Improves complete routes until `termination` fires or the search stops.
    fn improve(&self, graph: &RoutingGraph<'_>, mut routes: Vec<Vec<usize>>, termination: &MaxTime) -> (Vec<Vec<usize>>, usize, usize) {
        match self.config.local_search_metaheuristic {
            LocalSearchMetaheuristic::GuidedLocalSearch => {
                let mut gls = GuidedLocalSearch::new(graph, self.config.penalty_factor, self.config.max_stale_iterations)
                    .with_search_log(self.config.log_search);
                let result = gls.run(routes, graph, termination);
                log::debug!(
                    "guided local search finished: lambda {:.3}, {} iterations, {} improvements",
                    gls.lambda(),
                    result.iterations,
                    result.improvements
                );
                (result.routes, result.iterations, result.improvements)
            }
            LocalSearchMetaheuristic::GreedyDescent => {
                let improved = descend(&mut routes, graph, graph, termination);
                (routes, 1, usize::from(improved))
            }
        }
    }
}

impl Solve for TwoPhaseSolver {
    fn solve(&self, graph: &RoutingGraph<'_>, budget: Duration) -> Result<SolveOutcome, SolveError> {
        let started = Instant::now();
        let mut phase = SolverPhase::Constructing;
        log::debug!("solver phase: {}", phase);

        let construction = self.construct(graph);
        if !construction.is_complete() {
            let unrouted: Vec<usize> = construction
                .unrouted
                .iter()
                .map(|&index| graph.index_to_node(index))
                .collect();
            log::warn!("no feasible assignment: locations {:?} fit no vehicle", unrouted);
            return Ok(SolveOutcome::Infeasible { unrouted });
        }
        let construction_cost = graph.solution_cost(&construction.routes);

        phase = phase.advance();
        log::debug!("solver phase: {} (construction cost {:.3})", phase, construction_cost);
        let termination = MaxTime::new(budget);
        let (mut routes, iterations, improvements) = self.improve(graph, construction.routes.clone(), &termination);
        if graph.solution_cost(&routes) > construction_cost {
            routes = construction.routes;
        }

        phase = phase.advance();
        let (solution, violations) = RouteEvaluator::new(graph).build_solution(&routes);
        if !violations.is_empty() {
            return Err(SolveError::InvalidSolution(violations));
        }

        let stats = SearchStats {
            construction_cost,
            best_cost: solution.total_cost(),
            iterations,
            improvements,
            elapsed: started.elapsed(),
            phase,
        };
        log::info!(
            "solved: cost {:.3} (construction {:.3}), {} iterations, {} improvements, {} locations on {} vehicles, {:?}",
            stats.best_cost,
            stats.construction_cost,
            stats.iterations,
            stats.improvements,
            solution.num_served(),
            solution.num_used_vehicles(),
            stats.elapsed
        );

        Ok(SolveOutcome::Solved { solution, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    const BUDGET: Duration = Duration::from_millis(200);

    fn line_problem(capacities: &[i32]) -> ProblemInstance {
        let pos = [0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0];
        let rows: Vec<Vec<f64>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let dm = DistanceMatrix::from_rows(&rows).expect("valid");
        ProblemInstance::new(dm, vec![0, 2, 2, 2, 2, 2], capacities, 1.0)
    }

    fn solved(outcome: SolveOutcome) -> (crate::models::Solution, SearchStats) {
        match outcome {
            SolveOutcome::Solved { solution, stats } => (solution, stats),
            SolveOutcome::Infeasible { unrouted } => panic!("infeasible: {unrouted:?}"),
        }
    }

    #[test]
    fn test_single_vehicle_serves_all() {
        let p = line_problem(&[10]);
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, stats) = solved(TwoPhaseSolver::default().solve(&g, BUDGET).expect("no error"));
        assert_eq!(solution.num_served(), 5);
        assert!((solution.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(stats.phase, SolverPhase::Done);
    }

    #[test]
    fn test_never_worse_than_construction() {
        let p = line_problem(&[4, 4, 4]);
        let g = RoutingGraph::new(&p).expect("valid");
        for strategy in [FirstSolutionStrategy::PathCheapestArc, FirstSolutionStrategy::Savings] {
            for metaheuristic in [LocalSearchMetaheuristic::GuidedLocalSearch, LocalSearchMetaheuristic::GreedyDescent] {
                let config = SolverConfig {
                    first_solution_strategy: strategy,
                    local_search_metaheuristic: metaheuristic,
                    ..SolverConfig::default()
                };
                let (solution, stats) = solved(TwoPhaseSolver::new(config).solve(&g, BUDGET).expect("no error"));
                assert!(stats.best_cost <= stats.construction_cost + 1e-10);
                assert_eq!(solution.routes().len(), 3);
                for route in solution.routes() {
                    assert!(route.total_load() <= 4);
                }
            }
        }
    }

    #[test]
    fn test_repair_rescues_tight_packing() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 1.0, 2.0, 2.0, 2.0],
            vec![1.0, 0.0, 1.0, 1.0, 2.0, 2.0],
            vec![1.0, 1.0, 0.0, 2.0, 1.0, 2.0],
            vec![2.0, 1.0, 2.0, 0.0, 2.0, 1.0],
            vec![2.0, 2.0, 1.0, 2.0, 0.0, 1.0],
            vec![2.0, 2.0, 2.0, 1.0, 1.0, 0.0],
        ])
        .expect("valid");
        let p = ProblemInstance::new(dm, vec![0, 3, 3, 2, 2, 2], &[6, 6], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = solved(TwoPhaseSolver::default().solve(&g, BUDGET).expect("no error"));
        assert_eq!(solution.total_load(), 12);
        for route in solution.routes() {
            assert!(route.total_load() <= 6);
        }
    }

    #[test]
    fn test_infeasible_when_nothing_fits() {
        // Total capacity 4 for 10 units of demand.
        let p = line_problem(&[2, 2]);
        let g = RoutingGraph::new(&p).expect("valid");
        let outcome = TwoPhaseSolver::default().solve(&g, BUDGET).expect("no error");
        match outcome {
            SolveOutcome::Infeasible { unrouted } => {
                assert!(!unrouted.is_empty());
                assert!(unrouted.iter().all(|&node| node != 0));
            }
            SolveOutcome::Solved { .. } => panic!("expected infeasible"),
        }
    }

    #[test]
    fn test_idle_vehicles_reported() {
        let p = line_problem(&[10, 10, 10]);
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = solved(TwoPhaseSolver::default().solve(&g, BUDGET).expect("no error"));
        assert_eq!(solution.routes().len(), 3);
        assert_eq!(solution.num_used_vehicles(), 1);
    }

    #[test]
    fn test_zero_budget_still_returns_construction() {
        let p = line_problem(&[4, 4, 4]);
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, stats) = solved(TwoPhaseSolver::default().solve(&g, Duration::ZERO).expect("no error"));
        assert_eq!(stats.iterations, 0);
        assert!((solution.total_cost() - stats.construction_cost).abs() < 1e-10);
    }
}
