//! Route reporting: per-vehicle itineraries with load, distance, and time.
//!
//! [`report`] projects a solved [`Solution`](crate::models::Solution) into a
//! [`RouteReport`], which renders as the delivery plan text through
//! [`Display`](std::fmt::Display) and as JSON through [`RouteReport::to_json`].

mod route_report;

pub use route_report::{report, RouteReport, Stop, Totals, VehicleReport};
