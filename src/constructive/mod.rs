//! Constructive heuristics for building initial routes.
//!
//! - [`path_cheapest_arc`] — extend open paths by the globally cheapest
//!   feasible arc, O(n² × V)
//! - [`savings`] — Clarke-Wright savings (1964) with best-fit vehicle
//!   assignment, O(n² log n)
//! - [`insert_unrouted`], [`best_fit_decreasing`] — repair for
//!   constructions that strand visits

mod cheapest_arc;
mod repair;
mod savings;

pub use cheapest_arc::path_cheapest_arc;
pub(crate) use repair::insertion_delta;
pub use repair::{best_fit_decreasing, insert_unrouted};
pub use savings::savings;

/// Routes produced by a constructive heuristic.
///
/// `routes[v]` holds vehicle `v`'s visit indices in order, terminals
/// excluded. Every route respects its vehicle's capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// One visit sequence per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// Visit indices no vehicle could take.
    pub unrouted: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every visit is routed.
    pub fn is_complete(&self) -> bool {
        self.unrouted.is_empty()
    }
}
