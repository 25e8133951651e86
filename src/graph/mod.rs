//! Routing model built from a validated instance.
//!
//! - [`IndexManager`] — location ↔ routing index bijection with one
//!   start/end pair per vehicle, all pinned to the depot
//! - [`CapacityDimension`] — cumulative load with zero slack and
//!   per-vehicle upper bounds
//! - [`RoutingGraph`] — the two above plus the travel-cost evaluator

mod dimension;
mod index;
mod routing_graph;

pub use dimension::CapacityDimension;
pub use index::IndexManager;
pub use routing_graph::{route_cost_with, ArcCost, GraphError, RoutingGraph};
