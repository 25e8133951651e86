//! Validated delivery problem instance.

use super::Vehicle;
use crate::distance::DistanceMatrix;

/// A single-depot capacitated delivery problem.
///
/// Location 0 is the depot. Instances are produced by
/// [`validate`](crate::instance::validate) and padded by
/// [`normalize`](crate::instance::normalize); they can also be built
/// directly when the caller already holds typed data.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 5, 5], &[10], 10.0);
/// assert_eq!(problem.num_vehicles(), 1);
/// assert_eq!(problem.total_demand(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    distances: DistanceMatrix,
    demands: Vec<i32>,
    vehicles: Vec<Vehicle>,
    depot: usize,
    average_speed: f64,
}

impl ProblemInstance {
    /// Creates an instance with one vehicle per capacity entry.
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<i32>,
        vehicle_capacities: &[i32],
        average_speed: f64,
    ) -> Self {
        let vehicles = vehicle_capacities
            .iter()
            .enumerate()
            .map(|(id, &capacity)| Vehicle::new(id, capacity))
            .collect();
        Self {
            distances,
            demands,
            vehicles,
            depot: 0,
            average_speed,
        }
    }

    /// Travel-cost matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of locations (matrix dimension, depot included).
    pub fn num_locations(&self) -> usize {
        self.distances.size()
    }

    /// Demand per location, indexed by location.
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Demand at a location; locations past the demand list have none.
    pub fn demand(&self, node: usize) -> i32 {
        self.demands.get(node).copied().unwrap_or(0)
    }

    /// Replaces the demand vector.
    pub fn set_demands(&mut self, demands: Vec<i32>) {
        self.demands = demands;
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> i64 {
        self.demands.iter().map(|&d| i64::from(d)).sum()
    }

    /// The fleet, in vehicle ID order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Capacity of each vehicle, in vehicle ID order.
    pub fn vehicle_capacities(&self) -> Vec<i32> {
        self.vehicles.iter().map(Vehicle::capacity).collect()
    }

    /// Depot location (always 0).
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Average travel speed, used only to estimate route times.
    pub fn average_speed(&self) -> f64 {
        self.average_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 4.0, 6.0, 3.0],
            vec![4.0, 0.0, 2.0, 5.0],
            vec![6.0, 2.0, 0.0, 7.0],
            vec![3.0, 5.0, 7.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 3, 4], &[5, 7], 2.0)
    }

    #[test]
    fn test_problem_accessors() {
        let p = problem();
        assert_eq!(p.num_locations(), 4);
        assert_eq!(p.num_vehicles(), 2);
        assert_eq!(p.vehicle_capacities(), vec![5, 7]);
        assert_eq!(p.vehicles()[1].id(), 1);
        assert_eq!(p.depot(), 0);
        assert_eq!(p.average_speed(), 2.0);
        assert_eq!(p.total_demand(), 7);
    }

    #[test]
    fn test_demand_past_list_is_zero() {
        let p = problem();
        assert_eq!(p.demand(2), 4);
        assert_eq!(p.demand(3), 0);
    }

    #[test]
    fn test_set_demands() {
        let mut p = problem();
        p.set_demands(vec![0, 1, 1, 1]);
        assert_eq!(p.total_demand(), 3);
        assert_eq!(p.demands().len(), 4);
    }
}
