use super::Termination;
use std::time::{Duration, Instant};

/// A termination criteria which is in terminated state when max time elapsed.
///
/// # Examples
///
/// ```
/// use parcel_routing::termination::{MaxTime, Termination};
/// use std::time::Duration;
///
/// assert!(MaxTime::new(Duration::ZERO).is_termination());
/// assert!(!MaxTime::new(Duration::from_secs(3600)).is_termination());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MaxTime {
    start: Instant,
    limit: Duration,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`, starting the clock now.
    pub fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    fn estimate(&self) -> f64 {
        if self.limit.is_zero() {
            return 1.;
        }
        (self.start.elapsed().as_secs_f64() / self.limit.as_secs_f64()).min(1.)
    }
}
