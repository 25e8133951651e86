//! Request boundary: one raw request in, one classified response out.
//!
//! Validation failures, trivial inputs, infeasible instances, and internal
//! failures each map to their own [`Response`] variant and
//! [`ResponseStatus`]. Panics raised while solving are caught here and
//! reported as internal errors.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use thiserror::Error;

use crate::graph::{GraphError, RoutingGraph};
use crate::instance::{normalize, validate, NormalizedInstance, RawInstance, Validated, ValidationError};
use crate::report::{report, RouteReport};
use crate::solver::{Solve, SolveError, SolveOutcome, SolverConfig, TwoPhaseSolver};

/// Raw request fields as supplied by the request-handling layer.
pub type OptimizeRequest = RawInstance;

/// Message returned when every demand is zero.
pub const TRIVIAL_MESSAGE: &str = "As the demands are zero, no parcels are delivered.";

/// Message returned when no feasible assignment exists.
pub const NO_SOLUTION_MESSAGE: &str = "No Solution Found. Please verify the inputs and constraints.";

/// Response classification, mirroring HTTP status classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// 200
    Ok,
    /// 400: the caller can fix the input.
    ClientError,
    /// 500
    InternalError,
}

impl ResponseStatus {
    /// HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::ClientError => 400,
            Self::InternalError => 500,
        }
    }
}

/// Outcome of one optimization request.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Routes were found.
    Solved(RouteReport),
    /// All demands are zero; nothing was routed.
    Trivial,
    /// The input failed validation.
    Rejected(ValidationError),
    /// The input is well-formed but no feasible assignment was found.
    NoSolution,
    /// Something unexpected failed while solving.
    InternalError {
        /// Description of the failure.
        message: String,
    },
}

impl Response {
    /// Status class of this response.
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::Solved(_) | Self::Trivial => ResponseStatus::Ok,
            Self::Rejected(_) | Self::NoSolution => ResponseStatus::ClientError,
            Self::InternalError { .. } => ResponseStatus::InternalError,
        }
    }

    /// Body text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Solved(report) => report.to_string(),
            Self::Trivial => TRIVIAL_MESSAGE.to_string(),
            Self::Rejected(err) => err.to_string(),
            Self::NoSolution => NO_SOLUTION_MESSAGE.to_string(),
            Self::InternalError { message } => format!("Error: {message}"),
        }
    }

    /// The report, if routes were found.
    pub fn report(&self) -> Option<&RouteReport> {
        match self {
            Self::Solved(report) => Some(report),
            _ => None,
        }
    }
}

/// Internal failures between validation and reporting.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// A validated instance did not produce a routing graph.
    #[error("failed to build routing graph: {0}")]
    Graph(#[from] GraphError),
    /// The solver broke one of its own guarantees.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// Solving panicked.
    #[error("solver panicked: {0}")]
    Panic(String),
}

/// Validates, normalizes, solves, and reports one request with the default
/// two-phase solver.
///
/// # Examples
///
/// ```
/// use parcel_routing::instance::RawInstance;
/// use parcel_routing::service::{optimize, ResponseStatus};
/// use parcel_routing::solver::SolverConfig;
///
/// let request = RawInstance::new(
///     vec![vec![0.0, 10.0, 15.0], vec![10.0, 0.0, 20.0], vec![15.0, 20.0, 0.0]],
///     "0,5,5",
///     "10",
///     "1",
///     "0",
///     "10",
/// );
/// let config = SolverConfig { time_limit_ms: 100, ..SolverConfig::default() };
///
/// let response = optimize(&request, &config);
/// assert_eq!(response.status(), ResponseStatus::Ok);
/// assert!(response.message().ends_with("Parcels Delivered: 10/10\n"));
/// ```
pub fn optimize(request: &OptimizeRequest, config: &SolverConfig) -> Response {
    let solver = TwoPhaseSolver::new(config.clone());
    optimize_with(request, &solver, config.time_limit())
}

/// Like [`optimize`], with a caller-supplied solver.
pub fn optimize_with<S: Solve + ?Sized>(request: &OptimizeRequest, solver: &S, budget: Duration) -> Response {
    let problem = match validate(request) {
        Ok(Validated::Instance(problem)) => problem,
        Ok(Validated::Trivial) => {
            log::info!("all demands are zero, nothing to route");
            return Response::Trivial;
        }
        Err(err) => {
            log::info!("request rejected: {}", err);
            return Response::Rejected(err);
        }
    };
    let normalized = normalize(problem);

    let result = panic::catch_unwind(AssertUnwindSafe(|| solve_normalized(&normalized, solver, budget)))
        .unwrap_or_else(|payload| Err(OptimizeError::Panic(panic_message(payload.as_ref()))));

    match result {
        Ok(Some(report)) => Response::Solved(report),
        Ok(None) => Response::NoSolution,
        Err(err) => {
            log::error!("optimization failed: {}", err);
            Response::InternalError {
                message: err.to_string(),
            }
        }
    }
}

fn solve_normalized<S: Solve + ?Sized>(
    normalized: &NormalizedInstance,
    solver: &S,
    budget: Duration,
) -> Result<Option<RouteReport>, OptimizeError> {
    let graph = RoutingGraph::new(&normalized.problem)?;
    match solver.solve(&graph, budget)? {
        SolveOutcome::Solved { solution, .. } => Ok(Some(report(
            &normalized.problem,
            &graph,
            &solution,
            normalized.suggested_capacities.clone(),
        ))),
        SolveOutcome::Infeasible { .. } => Ok(None),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
