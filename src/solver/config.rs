//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`SolverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this configuration.
    #[error("invalid solver configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The GLS penalty factor must be finite and non-negative.
    #[error("penalty factor must be a finite non-negative number, got {0}")]
    PenaltyFactor(f64),
}

/// Heuristic building the initial routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Extend routes along the cheapest feasible arc.
    #[default]
    PathCheapestArc,
    /// Clarke-Wright savings.
    Savings,
}

/// Improvement phase run after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchMetaheuristic {
    /// Penalize arcs of local optima and keep searching until the deadline.
    #[default]
    GuidedLocalSearch,
    /// Stop at the first local optimum.
    GreedyDescent,
}

/// Configuration for [`TwoPhaseSolver`](super::TwoPhaseSolver).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use parcel_routing::solver::{FirstSolutionStrategy, SolverConfig};
/// use std::time::Duration;
///
/// let config = SolverConfig::from_json(r#"{"time_limit_ms": 500, "first_solution_strategy": "savings"}"#).unwrap();
/// assert_eq!(config.time_limit(), Duration::from_millis(500));
/// assert_eq!(config.first_solution_strategy, FirstSolutionStrategy::Savings);
/// assert_eq!(config.max_stale_iterations, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock budget of the improvement phase, in milliseconds.
    pub time_limit_ms: u64,
    /// Construction heuristic.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Improvement metaheuristic.
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    /// GLS penalty weight relative to the mean arc cost of the first local optimum.
    pub penalty_factor: f64,
    /// Penalty rounds without a new best before GLS stops early.
    pub max_stale_iterations: usize,
    /// Log every search iteration at `debug` level.
    pub log_search: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 10_000,
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search_metaheuristic: LocalSearchMetaheuristic::default(),
            penalty_factor: 0.1,
            max_stale_iterations: 200,
            log_search: false,
        }
    }
}

impl SolverConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.penalty_factor.is_finite() || self.penalty_factor < 0.0 {
            return Err(ConfigError::PenaltyFactor(self.penalty_factor));
        }
        Ok(())
    }

    /// The improvement budget as a [`Duration`].
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}
