use std::fmt;

use serde::Serialize;

use crate::graph::RoutingGraph;
use crate::models::{ProblemInstance, Solution};

/// One location on a vehicle's itinerary with the load delivered so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stop {
    /// Location index.
    pub node: usize,
    /// Parcels delivered up to and including this stop.
    pub load: i64,
}

/// Itinerary of one vehicle, depot to depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    /// Vehicle index.
    pub vehicle_id: usize,
    /// Start depot, visited locations, end depot.
    pub stops: Vec<Stop>,
    /// Travel cost of the route.
    pub distance: f64,
    /// `distance / average_speed`.
    pub estimated_time: f64,
    /// Parcels delivered by this vehicle.
    pub parcels_delivered: i64,
}

/// Totals over all vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of route distances.
    pub total_distance: f64,
    /// Sum of parcels delivered.
    pub parcels_delivered: i64,
    /// Sum of all demands.
    pub total_demand: i64,
}

/// Delivery plan for a solved instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    /// Advisory per-vehicle capacities from the normalizer.
    pub suggested_capacities: Vec<i64>,
    /// One entry per configured vehicle, idle ones included.
    pub vehicles: Vec<VehicleReport>,
    /// Grand totals.
    pub totals: Totals,
}

impl RouteReport {
    /// Serializes the report as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Builds the delivery plan of `solution`.
///
/// Every vehicle of the instance appears, in index order. An idle vehicle
/// shows the depot twice with zero load and zero distance.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::evaluation::RouteEvaluator;
/// use parcel_routing::graph::RoutingGraph;
/// use parcel_routing::models::ProblemInstance;
/// use parcel_routing::report::report;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 5, 5], &[10], 10.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
/// let (solution, _) = RouteEvaluator::new(&graph).build_solution(&[vec![0, 1]]);
///
/// let plan = report(&problem, &graph, &solution, vec![10]);
/// assert_eq!(plan.vehicles[0].distance, 45.0);
/// assert_eq!(plan.vehicles[0].estimated_time, 4.5);
/// assert_eq!(plan.totals.parcels_delivered, 10);
/// assert!(plan.to_string().starts_with("Recommended Vehicle Capacities: [10]\nRoute for driver 0:\n 0 Parcels(0) -> "));
/// ```
pub fn report(
    problem: &ProblemInstance,
    graph: &RoutingGraph<'_>,
    solution: &Solution,
    suggested_capacities: Vec<i64>,
) -> RouteReport {
    let depot = problem.depot();
    let speed = problem.average_speed();

    let vehicles: Vec<VehicleReport> = (0..problem.num_vehicles())
        .map(|vehicle| {
            let indices: Vec<usize> = solution
                .routes()
                .iter()
                .find(|r| r.vehicle_id() == vehicle)
                .map(|r| r.nodes().into_iter().filter_map(|node| graph.node_to_index(node)).collect())
                .unwrap_or_default();
            let loads = graph.capacity_dimension().cumuls(&indices);
            let delivered = loads.last().map_or(0, |&load| i64::from(load));

            let mut stops = Vec::with_capacity(indices.len() + 2);
            stops.push(Stop { node: depot, load: 0 });
            stops.extend(indices.iter().zip(&loads).map(|(&index, &load)| Stop {
                node: graph.index_to_node(index),
                load: i64::from(load),
            }));
            stops.push(Stop { node: depot, load: delivered });

            let distance = graph.route_cost(vehicle, &indices);
            VehicleReport {
                vehicle_id: vehicle,
                stops,
                distance,
                estimated_time: distance / speed,
                parcels_delivered: delivered,
            }
        })
        .collect();

    let totals = Totals {
        total_distance: vehicles.iter().map(|v| v.distance).sum(),
        parcels_delivered: vehicles.iter().map(|v| v.parcels_delivered).sum(),
        total_demand: problem.total_demand(),
    };

    RouteReport {
        suggested_capacities,
        vehicles,
        totals,
    }
}

impl fmt::Display for VehicleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Route for driver {}:", self.vehicle_id)?;
        if let Some((last, rest)) = self.stops.split_last() {
            for stop in rest {
                write!(f, " {} Parcels({}) -> ", stop.node, stop.load)?;
            }
            writeln!(f, "{} Parcels({})", last.node, last.load)?;
        }
        writeln!(f, "Distance of the route: {} (m)", self.distance)?;
        writeln!(f, "Estimated Time: {:.2} (hours)", self.estimated_time)?;
        writeln!(f, "Parcels Delivered: {} (parcels)", self.parcels_delivered)
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recommended Vehicle Capacities: {:?}", self.suggested_capacities)?;
        for vehicle in &self.vehicles {
            writeln!(f, "{vehicle}")?;
        }
        writeln!(f, "Total distance of all routes: {} (m)", self.totals.total_distance)?;
        writeln!(
            f,
            "Parcels Delivered: {}/{}",
            self.totals.parcels_delivered, self.totals.total_demand
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::RouteEvaluator;

    fn problem() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 5, 5], &[10, 10], 10.0)
    }

    #[test]
    fn test_stops_carry_running_load() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = RouteEvaluator::new(&g).build_solution(&[vec![1, 0], vec![]]);
        let plan = report(&p, &g, &solution, vec![5, 5]);
        let stops = &plan.vehicles[0].stops;
        assert_eq!(
            stops,
            &vec![
                Stop { node: 0, load: 0 },
                Stop { node: 2, load: 5 },
                Stop { node: 1, load: 10 },
                Stop { node: 0, load: 10 },
            ]
        );
        assert_eq!(plan.vehicles[0].parcels_delivered, 10);
    }

    #[test]
    fn test_idle_vehicle_is_reported() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = RouteEvaluator::new(&g).build_solution(&[vec![0, 1], vec![]]);
        let plan = report(&p, &g, &solution, vec![5, 5]);
        assert_eq!(plan.vehicles.len(), 2);
        let idle = &plan.vehicles[1];
        assert_eq!(idle.stops, vec![Stop { node: 0, load: 0 }, Stop { node: 0, load: 0 }]);
        assert_eq!(idle.distance, 0.0);
        assert_eq!(idle.estimated_time, 0.0);
    }

    #[test]
    fn test_totals() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = RouteEvaluator::new(&g).build_solution(&[vec![0], vec![1]]);
        let plan = report(&p, &g, &solution, vec![5, 5]);
        assert_eq!(plan.totals.total_distance, 50.0);
        assert_eq!(plan.totals.parcels_delivered, 10);
        assert_eq!(plan.totals.total_demand, 10);
        assert!((plan.vehicles[1].estimated_time - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_text_rendering() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = RouteEvaluator::new(&g).build_solution(&[vec![0, 1], vec![]]);
        let text = report(&p, &g, &solution, vec![5, 5]).to_string();
        let expected = "Recommended Vehicle Capacities: [5, 5]\n\
                        Route for driver 0:\n \
                        0 Parcels(0) ->  1 Parcels(5) ->  2 Parcels(10) -> 0 Parcels(10)\n\
                        Distance of the route: 45 (m)\n\
                        Estimated Time: 4.50 (hours)\n\
                        Parcels Delivered: 10 (parcels)\n\
                        \n\
                        Route for driver 1:\n \
                        0 Parcels(0) -> 0 Parcels(0)\n\
                        Distance of the route: 0 (m)\n\
                        Estimated Time: 0.00 (hours)\n\
                        Parcels Delivered: 0 (parcels)\n\
                        \n\
                        Total distance of all routes: 45 (m)\n\
                        Parcels Delivered: 10/10\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_rendering() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let (solution, _) = RouteEvaluator::new(&g).build_solution(&[vec![0, 1], vec![]]);
        let json = report(&p, &g, &solution, vec![5, 5]).to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["totals"]["parcels_delivered"], 10);
        assert_eq!(value["vehicles"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["vehicles"][0]["stops"][1]["node"], 1);
    }
}
