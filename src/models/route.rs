//! Route and visit types.

/// A single stop within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Location visited.
    pub node: usize,
    /// Cumulative load after this visit.
    pub load_after: i32,
}

/// An ordered sequence of stops assigned to a single vehicle.
///
/// A route starts and ends at the depot (not stored in `visits`). An idle
/// vehicle has an empty route.
///
/// # Examples
///
/// ```
/// use parcel_routing::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit { node: 2, load_after: 5 });
/// route.push_visit(Visit { node: 1, load_after: 9 });
/// assert_eq!(route.nodes(), vec![2, 1]);
/// assert_eq!(route.total_load(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<Visit>,
    total_distance: f64,
    total_load: i32,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
            total_distance: 0.0,
            total_load: 0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_load = visit.load_after;
        self.visits.push(visit);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of stops (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if the vehicle stays at the depot.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the visited locations in order.
    pub fn nodes(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.node).collect()
    }

    /// Total distance of this route, depot legs included (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total load delivered on this route.
    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }
}
