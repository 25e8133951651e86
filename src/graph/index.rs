//! Bijection between locations and routing indices.

/// Maps physical locations to the index space the solver works in.
///
/// Every non-depot location gets exactly one routing index. Each vehicle
/// additionally owns a start index and an end index, both mapped to the
/// depot. Layout: visit indices `0..num_nodes - 1` in location order, then
/// `start(0), end(0), start(1), end(1), ...`.
///
/// # Examples
///
/// ```
/// use parcel_routing::graph::IndexManager;
///
/// let manager = IndexManager::new(4, 2, 0);
/// assert_eq!(manager.num_indices(), 3 + 4);
/// assert_eq!(manager.index_to_node(0), 1);
/// assert_eq!(manager.node_to_index(3), Some(2));
/// assert_eq!(manager.index_to_node(manager.start(1)), 0);
/// assert_eq!(manager.end(1), manager.start(1) + 1);
/// ```
#[derive(Debug, Clone)]
pub struct IndexManager {
    num_nodes: usize,
    num_vehicles: usize,
    depot: usize,
    index_to_node: Vec<usize>,
    node_to_index: Vec<Option<usize>>,
}

impl IndexManager {
    /// Builds the index space for `num_nodes` locations and `num_vehicles`
    /// vehicles based at `depot`.
    pub fn new(num_nodes: usize, num_vehicles: usize, depot: usize) -> Self {
        let mut index_to_node = Vec::with_capacity(num_nodes + 2 * num_vehicles);
        let mut node_to_index = vec![None; num_nodes];

        for (node, slot) in node_to_index.iter_mut().enumerate() {
            if node == depot {
                continue;
            }
            *slot = Some(index_to_node.len());
            index_to_node.push(node);
        }
        for _ in 0..num_vehicles {
            index_to_node.push(depot);
            index_to_node.push(depot);
        }

        Self {
            num_nodes,
            num_vehicles,
            depot,
            index_to_node,
            node_to_index,
        }
    }

    /// Number of locations, depot included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Depot location.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Total size of the index space.
    pub fn num_indices(&self) -> usize {
        self.index_to_node.len()
    }

    /// Number of visit (non-terminal) indices.
    pub fn num_visits(&self) -> usize {
        self.num_indices() - 2 * self.num_vehicles
    }

    /// Visit indices, one per non-depot location.
    pub fn visit_indices(&self) -> std::ops::Range<usize> {
        0..self.num_visits()
    }

    /// Location behind a routing index.
    pub fn index_to_node(&self, index: usize) -> usize {
        self.index_to_node[index]
    }

    /// Visit index of a location, or `None` for the depot.
    pub fn node_to_index(&self, node: usize) -> Option<usize> {
        self.node_to_index.get(node).copied().flatten()
    }

    /// Start index of a vehicle.
    pub fn start(&self, vehicle: usize) -> usize {
        self.num_visits() + 2 * vehicle
    }

    /// End index of a vehicle.
    pub fn end(&self, vehicle: usize) -> usize {
        self.num_visits() + 2 * vehicle + 1
    }
}
