//! Solver engine: construction followed by improvement under a time budget.
//!
//! - [`Solve`] — the solving capability, so strategies can be swapped
//! - [`TwoPhaseSolver`] — cheapest-arc (or savings) construction, then
//!   guided local search (or plain descent)
//! - [`SolverConfig`] — strategy choice and search parameters

mod config;
mod two_phase;

pub use config::{ConfigError, FirstSolutionStrategy, LocalSearchMetaheuristic, SolverConfig};
pub use two_phase::TwoPhaseSolver;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::graph::RoutingGraph;
use crate::models::{Solution, Violation};

/// States of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPhase {
    /// Building initial routes.
    Constructing,
    /// Improving routes until the budget runs out or the search converges.
    Improving,
    /// Terminal.
    Done,
}

impl SolverPhase {
    /// The phase that follows this one; `Done` is terminal.
    pub fn advance(self) -> Self {
        match self {
            Self::Constructing => Self::Improving,
            Self::Improving | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constructing => "constructing",
            Self::Improving => "improving",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Counters collected over one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    /// Travel cost of the construction-phase solution.
    pub construction_cost: f64,
    /// Travel cost of the returned solution.
    pub best_cost: f64,
    /// Improvement iterations performed.
    pub iterations: usize,
    /// Iterations that found a new best.
    pub improvements: usize,
    /// Wall-clock time of the whole solve.
    pub elapsed: Duration,
    /// Phase reached when the solve returned.
    pub phase: SolverPhase,
}

/// Result of a solve on a well-formed graph.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A feasible assignment of every visit.
    Solved {
        /// One route per vehicle, idle vehicles included.
        solution: Solution,
        /// Search counters.
        stats: SearchStats,
    },
    /// No feasible assignment was found.
    Infeasible {
        /// Locations that could not be placed on any vehicle.
        unrouted: Vec<usize>,
    },
}

impl SolveOutcome {
    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved { solution, .. } => Some(solution),
            Self::Infeasible { .. } => None,
        }
    }
}

/// Internal failures of a solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The final routes broke a constraint the search must preserve.
    #[error("solver produced {} constraint violations", .0.len())]
    InvalidSolution(Vec<Violation>),
}

/// Solves a routing graph within a wall-clock budget.
///
/// Implementations must only return solutions that satisfy the capacity
/// dimension and visit every location exactly once.
pub trait Solve: Send + Sync {
    /// Solve `graph`, spending at most `budget` on improvement.
    fn solve(&self, graph: &RoutingGraph<'_>, budget: Duration) -> Result<SolveOutcome, SolveError>;
}
