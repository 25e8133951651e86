//! Cumulative capacity dimension.

/// Tracks the load carried along each route.
///
/// The cumulative value is zero at every vehicle start and grows by the
/// demand of each visited location. Slack is zero, so the load after a
/// visit is exactly the sum of the demands visited so far, and it may
/// never exceed the vehicle's capacity.
///
/// # Examples
///
/// ```
/// use parcel_routing::graph::CapacityDimension;
///
/// let dim = CapacityDimension::new(vec![3, 4, 0, 0], vec![6]);
/// assert_eq!(dim.transit(1), 4);
/// assert_eq!(dim.cumuls(&[0, 1]), vec![3, 7]);
/// assert!(!dim.is_feasible(0, &[0, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct CapacityDimension {
    transits: Vec<i32>,
    capacities: Vec<i32>,
}

impl CapacityDimension {
    /// Name of the dimension in logs.
    pub const NAME: &'static str = "Capacity";

    /// Slack allowed between consecutive cumul values.
    pub const SLACK: i32 = 0;

    /// Creates the dimension from per-index demand and per-vehicle capacity.
    pub fn new(transits: Vec<i32>, capacities: Vec<i32>) -> Self {
        Self {
            transits,
            capacities,
        }
    }

    /// Load picked up when entering a routing index.
    pub fn transit(&self, index: usize) -> i32 {
        self.transits.get(index).copied().unwrap_or(0)
    }

    /// Upper bound of the cumul for a vehicle.
    pub fn capacity(&self, vehicle: usize) -> i32 {
        self.capacities[vehicle]
    }

    /// Total load of a sequence of visits.
    pub fn load(&self, visits: &[usize]) -> i64 {
        visits.iter().map(|&i| i64::from(self.transit(i))).sum()
    }

    /// Cumulative load after each visit, starting from zero.
    pub fn cumuls(&self, visits: &[usize]) -> Vec<i32> {
        visits
            .iter()
            .scan(0i32, |load, &i| {
                *load = load.saturating_add(self.transit(i));
                Some(*load)
            })
            .collect()
    }

    /// Returns `true` if `load` fits within the vehicle's capacity.
    pub fn fits(&self, vehicle: usize, load: i64) -> bool {
        load <= i64::from(self.capacity(vehicle))
    }

    /// Returns `true` if the cumul never exceeds capacity along the visits.
    ///
    /// Demands are non-negative, so checking the final load is enough.
    pub fn is_feasible(&self, vehicle: usize, visits: &[usize]) -> bool {
        self.fits(vehicle, self.load(visits))
    }
}
