//! # parcel-routing
//!
//! Capacitated vehicle routing for parcel delivery: one depot, one travel
//! cost matrix, per-location demands, and a fleet with individual
//! capacities. Requests are validated, normalized, turned into an explicit
//! routing graph, solved by greedy construction plus guided local search
//! under a time budget, and reported per vehicle.
//!
//! ## Modules
//!
//! - [`distance`] — Travel cost matrix
//! - [`models`] — Domain model types (Vehicle, ProblemInstance, Route, Solution)
//! - [`instance`] — Request validation and normalization
//! - [`graph`] — Routing index space, arc costs, capacity dimension
//! - [`evaluation`] — Route load/distance accounting and feasibility checks
//! - [`constructive`] — Construction heuristics (cheapest arc, savings) and repair
//! - [`local_search`] — Neighborhood operators and guided local search
//! - [`termination`] — Stopping criteria for the search
//! - [`solver`] — Two-phase solver behind the [`Solve`](solver::Solve) trait
//! - [`report`] — Per-vehicle itineraries, text and JSON
//! - [`service`] — Request boundary with classified responses
//!
//! ## Example
//!
//! ```
//! use parcel_routing::instance::RawInstance;
//! use parcel_routing::service::optimize;
//! use parcel_routing::solver::SolverConfig;
//!
//! let request = RawInstance::new(
//!     vec![vec![0.0, 10.0, 15.0], vec![10.0, 0.0, 20.0], vec![15.0, 20.0, 0.0]],
//!     "0,5,5",
//!     "10",
//!     "1",
//!     "0",
//!     "10",
//! );
//! let config = SolverConfig { time_limit_ms: 100, ..SolverConfig::default() };
//! let report = optimize(&request, &config).report().cloned().unwrap();
//! assert_eq!(report.totals.total_distance, 45.0);
//! ```

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod graph;
pub mod instance;
pub mod local_search;
pub mod models;
pub mod report;
pub mod service;
pub mod solver;
pub mod termination;
