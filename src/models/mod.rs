//! Domain model types for capacitated delivery routing.
//!
//! Provides the core abstractions: vehicles with capacities, the validated
//! problem instance, routes as ordered sequences of stops with running
//! load, and the solution that ties one route to each vehicle.

mod problem;
mod route;
mod solution;
mod vehicle;

pub use problem::ProblemInstance;
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
