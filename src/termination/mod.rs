//! Termination criteria for the improvement phase.

mod max_time;
pub use self::max_time::MaxTime;

/// Decides when the search should stop looking for a better solution.
pub trait Termination {
    /// Returns true if termination condition is met.
    fn is_termination(&self) -> bool;

    /// Returns a relative estimation till termination. Value is in the `[0, 1]` range.
    fn estimate(&self) -> f64;
}
