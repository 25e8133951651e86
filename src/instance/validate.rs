//! Instance validator.
//!
//! Rules are checked in a fixed order and the first violated rule is the
//! one reported:
//!
//! 1. matrix and form fields present, matrix well-formed
//! 2. speed is a positive whole number
//! 3. demand/capacity lists, vehicle count, and depot parse as integers
//!    that fit the solver's load type
//! 4. depot index is 0
//! 5. no negative demand or non-positive vehicle count, then no
//!    non-positive capacity
//! 6. the depot has no demand
//! 7. one capacity per vehicle
//! 8. the largest capacity covers the largest demand
//! 9. total capacity covers total demand
//! 10. no more demands than locations
//!
//! An instance with no demand at all is reported as [`Validated::Trivial`]
//! once rules 1 to 9 pass, before the demand count is compared with the
//! matrix size.

use super::raw::{parse_list, present};
use super::{RawInstance, ValidationError};
use crate::distance::DistanceMatrix;
use crate::models::ProblemInstance;

/// Result of a successful validation.
#[derive(Debug, Clone)]
pub enum Validated {
    /// A well-formed instance with at least one parcel to deliver.
    Instance(ProblemInstance),
    /// Every demand is zero; there is nothing to route.
    Trivial,
}

/// Checks a raw instance and converts it to a typed [`ProblemInstance`].
///
/// The returned demands are not yet padded to the matrix size; see
/// [`normalize`](super::normalize).
///
/// # Examples
///
/// ```
/// use parcel_routing::instance::{validate, RawInstance, ValidationError, Validated};
///
/// let matrix = vec![vec![0.0, 4.0], vec![4.0, 0.0]];
///
/// let ok = validate(&RawInstance::new(matrix.clone(), "0,3", "5", "1", "0", "10")).unwrap();
/// assert!(matches!(ok, Validated::Instance(_)));
///
/// let err = validate(&RawInstance::new(matrix, "0,3", "5", "1", "1", "10")).unwrap_err();
/// assert_eq!(err, ValidationError::DepotNotZero);
/// ```
pub fn validate(raw: &RawInstance) -> Result<Validated, ValidationError> {
    let rows = raw
        .distance_matrix
        .as_ref()
        .filter(|rows| !rows.is_empty())
        .ok_or(ValidationError::MissingMatrix)?;

    let (demands_text, capacities_text, vehicles_text, depot_text, speed_text) = match (
        present(&raw.demands),
        present(&raw.vehicle_capacities),
        present(&raw.num_vehicles),
        present(&raw.depot),
        present(&raw.average_speed),
    ) {
        (Some(d), Some(c), Some(v), Some(p), Some(s)) => (d, c, v, p, s),
        _ => return Err(ValidationError::MissingInput),
    };

    let distances = DistanceMatrix::from_rows(rows)?;

    let average_speed = parse_speed(speed_text)?;

    let demands = parse_list(demands_text).ok_or(ValidationError::NonNumericList)?;
    let capacities = parse_list(capacities_text).ok_or(ValidationError::NonNumericList)?;
    let demands = to_loads(&demands)?;
    let capacities = to_loads(&capacities)?;
    let num_vehicles: i64 = vehicles_text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NonNumericCount)?;
    let depot: i64 = depot_text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NonNumericCount)?;

    if depot != 0 {
        return Err(ValidationError::DepotNotZero);
    }

    if demands.iter().any(|&d| d < 0) || num_vehicles <= 0 {
        return Err(ValidationError::NegativeInput);
    }
    if capacities.iter().any(|&c| c <= 0) {
        return Err(ValidationError::NonPositiveCapacity);
    }

    if demands[0] != 0 {
        return Err(ValidationError::DepotDemand);
    }

    let num_vehicles = usize::try_from(num_vehicles).map_err(|_| ValidationError::NonNumericCount)?;
    if capacities.len() != num_vehicles {
        return Err(ValidationError::VehicleCountMismatch {
            num_vehicles,
            capacities: capacities.len(),
        });
    }

    let largest_demand = demands.iter().copied().max().unwrap_or(0);
    let largest_capacity = capacities.iter().copied().max().unwrap_or(0);
    if largest_demand > largest_capacity {
        return Err(ValidationError::CapacityBelowLargestDemand {
            largest_demand,
            largest_capacity,
        });
    }

    let total_demand: i64 = demands.iter().map(|&d| i64::from(d)).sum();
    let total_capacity: i64 = capacities.iter().map(|&c| i64::from(c)).sum();
    if total_demand > total_capacity {
        return Err(ValidationError::InsufficientCapacity {
            total_demand,
            total_capacity,
        });
    }

    if total_demand == 0 {
        return Ok(Validated::Trivial);
    }

    if demands.len() > distances.size() {
        return Err(ValidationError::TooManyDemands {
            demands: demands.len(),
            locations: distances.size(),
        });
    }

    Ok(Validated::Instance(ProblemInstance::new(
        distances,
        demands,
        &capacities,
        average_speed,
    )))
}

/// Narrows parsed values to the load type carried along routes.
fn to_loads(values: &[i64]) -> Result<Vec<i32>, ValidationError> {
    values
        .iter()
        .map(|&value| i32::try_from(value).map_err(|_| ValidationError::ValueOutOfRange { value }))
        .collect()
}

/// Speed must be written as plain digits and be greater than zero.
fn parse_speed(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidSpeed);
    }
    match text.parse::<u32>() {
        Ok(speed) if speed > 0 => Ok(f64::from(speed)),
        _ => Err(ValidationError::InvalidSpeed),
    }
}
