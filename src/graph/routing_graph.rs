//! Routing graph: index space, arc costs, and the capacity dimension.

use thiserror::Error;

use super::{CapacityDimension, IndexManager};
use crate::distance::DistanceMatrix;
use crate::models::ProblemInstance;

/// Internal invariant violations found while building a [`RoutingGraph`].
///
/// Validated instances never trigger these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The distance matrix has no locations.
    #[error("routing graph needs at least one location")]
    NoLocations,
    /// The fleet is empty.
    #[error("routing graph needs at least one vehicle")]
    NoVehicles,
    /// A vehicle cannot carry anything.
    #[error("vehicle {vehicle} has capacity {capacity}")]
    NonPositiveCapacity {
        /// Offending vehicle.
        vehicle: usize,
        /// Its capacity.
        capacity: i32,
    },
    /// Demand vector longer than the matrix.
    #[error("{demands} demands for {locations} locations")]
    DemandLength {
        /// Number of demands.
        demands: usize,
        /// Matrix dimension.
        locations: usize,
    },
    /// A location carries a negative demand.
    #[error("location {node} has negative demand {demand}")]
    NegativeDemand {
        /// Offending location.
        node: usize,
        /// Its demand.
        demand: i32,
    },
}

/// Cost of travelling between two routing indices.
///
/// Local search operators are written against this trait so that the same
/// moves can run on plain travel costs or on penalty-augmented costs.
pub trait ArcCost {
    /// Cost of the arc `from → to`.
    fn arc_cost(&self, from: usize, to: usize) -> f64;
}

/// Explicit routing model for one solve.
///
/// Holds the index space, the travel-cost evaluator over that space, and the
/// capacity dimension. Borrowed from the instance; nothing outlives the
/// solve.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::graph::{ArcCost, RoutingGraph};
/// use parcel_routing::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ])
/// .unwrap();
/// let problem = ProblemInstance::new(dm, vec![0, 5, 5], &[10], 10.0);
/// let graph = RoutingGraph::new(&problem).unwrap();
///
/// let a = graph.manager().node_to_index(1).unwrap();
/// assert_eq!(graph.arc_cost(graph.start(0), a), 10.0);
/// assert_eq!(graph.demand(a), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingGraph<'a> {
    distances: &'a DistanceMatrix,
    manager: IndexManager,
    capacity: CapacityDimension,
}

impl<'a> RoutingGraph<'a> {
    /// Builds the routing graph for an instance.
    ///
    /// Fails fast on instances the validator should already have rejected.
    pub fn new(problem: &'a ProblemInstance) -> Result<Self, GraphError> {
        let num_nodes = problem.num_locations();
        if num_nodes == 0 {
            return Err(GraphError::NoLocations);
        }
        if problem.num_vehicles() == 0 {
            return Err(GraphError::NoVehicles);
        }
        if let Some(v) = problem.vehicles().iter().find(|v| v.capacity() <= 0) {
            return Err(GraphError::NonPositiveCapacity {
                vehicle: v.id(),
                capacity: v.capacity(),
            });
        }
        if problem.demands().len() > num_nodes {
            return Err(GraphError::DemandLength {
                demands: problem.demands().len(),
                locations: num_nodes,
            });
        }
        if let Some((node, &demand)) = problem.demands().iter().enumerate().find(|&(_, &d)| d < 0) {
            return Err(GraphError::NegativeDemand { node, demand });
        }

        let manager = IndexManager::new(num_nodes, problem.num_vehicles(), problem.depot());
        let transits = (0..manager.num_indices())
            .map(|index| {
                let node = manager.index_to_node(index);
                if node == manager.depot() {
                    0
                } else {
                    problem.demand(node)
                }
            })
            .collect();
        let capacity = CapacityDimension::new(transits, problem.vehicle_capacities());

        log::debug!(
            "routing graph: {} locations, {} vehicles, {} indices, dimension '{}' (slack {})",
            num_nodes,
            manager.num_vehicles(),
            manager.num_indices(),
            CapacityDimension::NAME,
            CapacityDimension::SLACK
        );

        Ok(Self {
            distances: problem.distances(),
            manager,
            capacity,
        })
    }

    /// The index manager.
    pub fn manager(&self) -> &IndexManager {
        &self.manager
    }

    /// The capacity dimension.
    pub fn capacity_dimension(&self) -> &CapacityDimension {
        &self.capacity
    }

    /// Travel cost between two routing indices.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.distances.get(
            self.manager.index_to_node(from),
            self.manager.index_to_node(to),
        )
    }

    /// Demand picked up at a routing index.
    pub fn demand(&self, index: usize) -> i32 {
        self.capacity.transit(index)
    }

    /// Capacity of a vehicle.
    pub fn capacity(&self, vehicle: usize) -> i32 {
        self.capacity.capacity(vehicle)
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.manager.num_vehicles()
    }

    /// Start index of a vehicle.
    pub fn start(&self, vehicle: usize) -> usize {
        self.manager.start(vehicle)
    }

    /// End index of a vehicle.
    pub fn end(&self, vehicle: usize) -> usize {
        self.manager.end(vehicle)
    }

    /// Visit indices that every solution must route exactly once.
    pub fn visit_indices(&self) -> std::ops::Range<usize> {
        self.manager.visit_indices()
    }

    /// Location behind a routing index.
    pub fn index_to_node(&self, index: usize) -> usize {
        self.manager.index_to_node(index)
    }

    /// Visit index of a location, or `None` for the depot.
    pub fn node_to_index(&self, node: usize) -> Option<usize> {
        self.manager.node_to_index(node)
    }

    /// Travel cost of a vehicle's route through the given visits.
    pub fn route_cost(&self, vehicle: usize, visits: &[usize]) -> f64 {
        route_cost_with(self, self.start(vehicle), self.end(vehicle), visits)
    }

    /// Travel cost summed over all vehicles; `routes[v]` is vehicle `v`'s route.
    pub fn solution_cost(&self, routes: &[Vec<usize>]) -> f64 {
        routes
            .iter()
            .enumerate()
            .map(|(vehicle, visits)| self.route_cost(vehicle, visits))
            .sum()
    }
}

impl ArcCost for RoutingGraph<'_> {
    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        self.cost(from, to)
    }
}

/// Cost of `start → visits... → end` under any arc cost.
///
/// An idle vehicle never leaves the depot and costs nothing.
pub fn route_cost_with<C: ArcCost + ?Sized>(
    costs: &C,
    start: usize,
    end: usize,
    visits: &[usize],
) -> f64 {
    if visits.is_empty() {
        return 0.0;
    }
    let mut prev = start;
    let mut total = 0.0;
    for &index in visits {
        total += costs.arc_cost(prev, index);
        prev = index;
    }
    total + costs.arc_cost(prev, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0],
            vec![12.0, 0.0, 20.0],
            vec![15.0, 25.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 5, 5], &[10, 6], 10.0)
    }

    #[test]
    fn test_cost_follows_matrix_without_symmetry() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let a = g.node_to_index(1).expect("node 1");
        let b = g.node_to_index(2).expect("node 2");
        assert_eq!(g.cost(a, b), 20.0);
        assert_eq!(g.cost(b, a), 25.0);
        assert_eq!(g.cost(a, g.end(1)), 12.0);
        assert_eq!(g.cost(g.start(1), b), 15.0);
        assert_eq!(g.node_to_index(0), None);
        assert_eq!(g.index_to_node(a), 1);
    }

    #[test]
    fn test_demands_and_capacities() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        assert_eq!(g.num_vehicles(), 2);
        assert_eq!(g.capacity(0), 10);
        assert_eq!(g.capacity(1), 6);
        for v in 0..2 {
            assert_eq!(g.demand(g.start(v)), 0);
            assert_eq!(g.demand(g.end(v)), 0);
        }
        assert_eq!(g.visit_indices().map(|i| g.demand(i)).sum::<i32>(), 10);
    }

    #[test]
    fn test_route_cost() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let a = g.manager().node_to_index(1).expect("node 1");
        let b = g.manager().node_to_index(2).expect("node 2");
        // 0 → 1 → 2 → 0 = 10 + 20 + 15
        assert_eq!(g.route_cost(0, &[a, b]), 45.0);
        assert_eq!(g.route_cost(0, &[]), 0.0);
    }

    #[test]
    fn test_solution_cost_skips_idle_vehicles() {
        let p = problem();
        let g = RoutingGraph::new(&p).expect("valid");
        let a = g.manager().node_to_index(1).expect("node 1");
        let b = g.manager().node_to_index(2).expect("node 2");
        // 0 → 1 → 0 = 22, 0 → 2 → 0 = 30
        assert_eq!(g.solution_cost(&[vec![a], vec![b]]), 52.0);
        assert_eq!(g.solution_cost(&[vec![], vec![a, b]]), 45.0);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let dm = DistanceMatrix::new(2);
        let p = ProblemInstance::new(dm, vec![0, 1], &[3, 0], 1.0);
        assert_eq!(
            RoutingGraph::new(&p).expect_err("zero capacity"),
            GraphError::NonPositiveCapacity {
                vehicle: 1,
                capacity: 0
            }
        );
    }

    #[test]
    fn test_rejects_empty_matrix() {
        let p = ProblemInstance::new(DistanceMatrix::new(0), vec![], &[3], 1.0);
        assert_eq!(RoutingGraph::new(&p).expect_err("empty"), GraphError::NoLocations);
    }

    #[test]
    fn test_rejects_empty_fleet() {
        let p = ProblemInstance::new(DistanceMatrix::new(2), vec![0, 1], &[], 1.0);
        assert_eq!(RoutingGraph::new(&p).expect_err("no fleet"), GraphError::NoVehicles);
    }

    #[test]
    fn test_rejects_long_demand_vector() {
        let p = ProblemInstance::new(DistanceMatrix::new(2), vec![0, 1, 1], &[3], 1.0);
        assert!(matches!(
            RoutingGraph::new(&p),
            Err(GraphError::DemandLength { .. })
        ));
    }

    #[test]
    fn test_short_demand_vector_pads_with_zero() {
        let p = ProblemInstance::new(DistanceMatrix::new(4), vec![0, 2], &[3], 1.0);
        let g = RoutingGraph::new(&p).expect("valid");
        assert_eq!(g.visit_indices().len(), 3);
        assert_eq!(g.demand(0), 2);
        assert_eq!(g.demand(1), 0);
        assert_eq!(g.demand(2), 0);
    }
}
