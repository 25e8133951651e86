//! Validation errors, one per rejected input rule.

use thiserror::Error;

use crate::distance::MatrixError;

/// Reasons a raw instance is rejected before solving.
///
/// The display string of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No distance matrix was supplied.
    #[error("Please upload a distance matrix")]
    MissingMatrix,
    /// A form field is absent or empty.
    #[error("Enter the inputs, so that I can provide you the results")]
    MissingInput,
    /// The distance matrix is not a square table of non-negative numbers.
    #[error("Invalid distance matrix: {0}")]
    MalformedMatrix(#[from] MatrixError),
    /// The speed is not a positive whole number.
    #[error("Average speed must be a positive number")]
    InvalidSpeed,
    /// A demand or capacity entry is not a whole number.
    #[error("Demand for each location and vehicle capacities should be numbers")]
    NonNumericList,
    /// A demand or capacity is a whole number too large to carry.
    #[error("Demand for each location and vehicle capacities must not exceed 2147483647, got {value}")]
    ValueOutOfRange {
        /// The rejected value.
        value: i64,
    },
    /// The vehicle count or depot index is not a whole number.
    #[error("Number of vehicles and depot index should be whole numbers")]
    NonNumericCount,
    /// The depot index is not 0.
    #[error("Invalid input as the depot index always starts with zero")]
    DepotNotZero,
    /// A demand is negative or the vehicle count is not positive.
    #[error("Invalid inputs as negative inputs are not considered")]
    NegativeInput,
    /// A vehicle capacity is zero or negative.
    #[error("Invalid input as zero and negative capacities are invalid")]
    NonPositiveCapacity,
    /// The depot carries a demand.
    #[error("Invalid input as the demand at the depot must be zero")]
    DepotDemand,
    /// The capacity list length differs from the vehicle count.
    #[error("No. of vehicles should be equal to the no. of entered vehicle capacities")]
    VehicleCountMismatch {
        /// Declared number of vehicles.
        num_vehicles: usize,
        /// Number of capacities supplied.
        capacities: usize,
    },
    /// The fleet cannot carry the total demand.
    #[error("Invalid input as capacities should be greater than or equal to total demands")]
    InsufficientCapacity {
        /// Sum of all demands.
        total_demand: i64,
        /// Sum of all capacities.
        total_capacity: i64,
    },
    /// Some location's demand exceeds every vehicle's capacity.
    #[error(
        "Every location must be servable: the largest vehicle capacity must be at least as large as the largest demand"
    )]
    CapacityBelowLargestDemand {
        /// Largest single demand.
        largest_demand: i32,
        /// Largest vehicle capacity.
        largest_capacity: i32,
    },
    /// More demands than matrix locations.
    #[error("Invalid input: More demands than locations in the distance matrix")]
    TooManyDemands {
        /// Number of demands supplied.
        demands: usize,
        /// Matrix dimension.
        locations: usize,
    },
}
