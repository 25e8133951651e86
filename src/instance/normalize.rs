//! Instance normalizer.

use crate::models::ProblemInstance;

/// A validated instance with demands aligned to the matrix, plus an
/// advisory fleet sizing.
#[derive(Debug, Clone)]
pub struct NormalizedInstance {
    /// Instance with one demand per matrix location.
    pub problem: ProblemInstance,
    /// `ceil(total demand / number of vehicles)`.
    pub recommended_capacity: i64,
    /// `recommended_capacity` repeated once per vehicle. Advisory only; the
    /// solver always uses the caller's capacities.
    pub suggested_capacities: Vec<i64>,
}

/// Pads demands with zeros up to the matrix size and computes the
/// suggested per-vehicle capacity.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::instance::normalize;
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::new(4);
/// let problem = ProblemInstance::new(dm, vec![0, 3, 4], &[10, 10], 1.0);
/// let normalized = normalize(problem);
/// assert_eq!(normalized.problem.demands(), &[0, 3, 4, 0]);
/// assert_eq!(normalized.suggested_capacities, vec![4, 4]);
/// ```
pub fn normalize(mut problem: ProblemInstance) -> NormalizedInstance {
    let size = problem.num_locations();
    if problem.demands().len() < size {
        let mut demands = problem.demands().to_vec();
        demands.resize(size, 0);
        problem.set_demands(demands);
    }

    let total_demand = problem.total_demand();
    let num_vehicles = problem.num_vehicles().max(1) as i64;
    let recommended_capacity = (total_demand + num_vehicles - 1) / num_vehicles;
    let suggested_capacities = vec![recommended_capacity; problem.num_vehicles()];

    NormalizedInstance {
        problem,
        recommended_capacity,
        suggested_capacities,
    }
}
