//! Loosely-typed problem input as received from the request layer.

use serde::Deserialize;

/// A problem instance before validation.
///
/// The matrix arrives already parsed from the uploaded table; every other
/// field is the raw form string. `None` or an empty string both count as
/// missing.
///
/// # Examples
///
/// ```
/// use parcel_routing::instance::RawInstance;
///
/// let raw = RawInstance::new(
///     vec![vec![0.0, 10.0], vec![10.0, 0.0]],
///     "0,5",
///     "10",
///     "1",
///     "0",
///     "10",
/// );
/// assert_eq!(raw.demands.as_deref(), Some("0,5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawInstance {
    /// Parsed travel-cost table.
    pub distance_matrix: Option<Vec<Vec<f64>>>,
    /// Comma-separated demand per location, depot first.
    pub demands: Option<String>,
    /// Comma-separated capacity per vehicle.
    pub vehicle_capacities: Option<String>,
    /// Number of vehicles.
    pub num_vehicles: Option<String>,
    /// Depot location index.
    pub depot: Option<String>,
    /// Average travel speed.
    pub average_speed: Option<String>,
}

impl RawInstance {
    /// Creates a raw instance with every field present.
    pub fn new(
        distance_matrix: Vec<Vec<f64>>,
        demands: &str,
        vehicle_capacities: &str,
        num_vehicles: &str,
        depot: &str,
        average_speed: &str,
    ) -> Self {
        Self {
            distance_matrix: Some(distance_matrix),
            demands: Some(demands.to_string()),
            vehicle_capacities: Some(vehicle_capacities.to_string()),
            num_vehicles: Some(num_vehicles.to_string()),
            depot: Some(depot.to_string()),
            average_speed: Some(average_speed.to_string()),
        }
    }
}

/// Returns the field's text if it is present and non-empty.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Parses a comma-separated list of integers, trimming each element.
pub(crate) fn parse_list(text: &str) -> Option<Vec<i64>> {
    text.split(',').map(|s| s.trim().parse::<i64>().ok()).collect()
}
