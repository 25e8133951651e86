//! Route evaluator that computes load, distance, and feasibility.

use crate::graph::RoutingGraph;
use crate::models::{Route, Solution, Violation, ViolationType, Visit};

/// Evaluates routes given as sequences of routing indices, computing
/// running load and total distance and checking the capacity dimension.
///
/// # Examples
///
/// ```
/// use parcel_routing::distance::DistanceMatrix;
/// use parcel_routing::evaluation::RouteEvaluator;
/// use parcel_routing::graph::RoutingGraph;
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
/// let evaluator = RouteEvaluator::new(&graph);
/// let (route, violations) = evaluator.build_route(0, &[0, 1]);
/// assert_eq!(route.nodes(), vec![1, 2]);
/// assert_eq!(route.total_distance(), 45.0);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'g, 'a> {
    graph: &'g RoutingGraph<'a>,
}

impl<'g, 'a> RouteEvaluator<'g, 'a> {
    /// Creates a new evaluator for the given routing graph.
    pub fn new(graph: &'g RoutingGraph<'a>) -> Self {
        Self { graph }
    }

    /// Builds a vehicle's route from visit indices, computing load and
    /// distance.
    ///
    /// Returns the constructed route and any capacity violation found.
    pub fn build_route(&self, vehicle: usize, visits: &[usize]) -> (Route, Vec<Violation>) {
        let dimension = self.graph.capacity_dimension();
        let loads = dimension.cumuls(visits);
        let mut route = Route::new(vehicle);
        let mut violations = Vec::new();

        for (&index, &load_after) in visits.iter().zip(&loads) {
            route.push_visit(Visit {
                node: self.graph.index_to_node(index),
                load_after,
            });
        }
        route.set_total_distance(self.graph.route_cost(vehicle, visits));

        if !dimension.is_feasible(vehicle, visits) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                vehicle_id: vehicle,
                load: loads.last().copied().unwrap_or(0),
                capacity: dimension.capacity(vehicle),
            }));
        }

        (route, violations)
    }

    /// Builds a full solution from one visit sequence per vehicle.
    ///
    /// Vehicles without a sequence get an empty route.
    pub fn build_solution(&self, routes: &[Vec<usize>]) -> (Solution, Vec<Violation>) {
        let mut solution = Solution::new();
        let mut all_violations = self.coverage_violations(routes);

        for vehicle in 0..self.graph.num_vehicles() {
            let visits = routes.get(vehicle).map(Vec::as_slice).unwrap_or(&[]);
            let (route, mut violations) = self.build_route(vehicle, visits);
            solution.add_route(route);
            all_violations.append(&mut violations);
        }

        let total_dist = solution.total_distance();
        solution.set_total_cost(total_dist);
        (solution, all_violations)
    }

    /// Checks that every visit index is routed exactly once.
    fn coverage_violations(&self, routes: &[Vec<usize>]) -> Vec<Violation> {
        let mut seen = vec![0usize; self.graph.visit_indices().len()];
        for &index in routes.iter().flatten() {
            if let Some(count) = seen.get_mut(index) {
                *count += 1;
            }
        }

        seen.iter()
            .enumerate()
            .filter_map(|(index, &count)| {
                let node = self.graph.index_to_node(index);
                match count {
                    0 => Some(Violation::new(ViolationType::Unvisited { node })),
                    1 => None,
                    _ => Some(Violation::new(ViolationType::VisitedTwice { node })),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::ProblemInstance;

    fn setup() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 5.0, 10.0, 10.0],
            vec![5.0, 0.0, 5.0, 11.0],
            vec![10.0, 5.0, 0.0, 8.0],
            vec![10.0, 11.0, 8.0, 0.0],
        ])
        .expect("valid");
        ProblemInstance::new(dm, vec![0, 10, 20, 15], &[50, 25], 1.0)
    }

    #[test]
    fn test_build_route_empty() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        let (route, violations) = eval.build_route(0, &[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.total_distance(), 0.0);
    }

    #[test]
    fn test_build_route_single() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        let (route, violations) = eval.build_route(0, &[0]);
        assert_eq!(route.len(), 1);
        assert!(violations.is_empty());
        assert!((route.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(route.total_load(), 10);
    }

    #[test]
    fn test_running_load() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        let (route, _) = eval.build_route(0, &[2, 0]);
        let loads: Vec<i32> = route.visits().iter().map(|v| v.load_after).collect();
        assert_eq!(loads, vec![15, 25]);
        assert_eq!(route.nodes(), vec![3, 1]);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        // 10 + 20 = 30 > 25
        let (_, violations) = eval.build_route(1, &[0, 1]);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                vehicle_id: 1,
                load: 30,
                capacity: 25,
            }
        ));
    }

    #[test]
    fn test_build_solution_feasible() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        let (sol, violations) = eval.build_solution(&[vec![0, 1], vec![2]]);
        assert!(violations.is_empty());
        assert_eq!(sol.routes().len(), 2);
        assert_eq!(sol.total_load(), 45);
        assert!((sol.total_cost() - sol.total_distance()).abs() < 1e-10);
    }

    #[test]
    fn test_build_solution_reports_coverage() {
        let p = setup();
        let g = RoutingGraph::new(&p).expect("valid");
        let eval = RouteEvaluator::new(&g);
        let (sol, violations) = eval.build_solution(&[vec![0, 0]]);
        assert_eq!(sol.routes().len(), 2);
        assert!(violations.contains(&Violation::new(ViolationType::VisitedTwice { node: 1 })));
        assert!(violations.contains(&Violation::new(ViolationType::Unvisited { node: 2 })));
        assert!(violations.contains(&Violation::new(ViolationType::Unvisited { node: 3 })));
    }
}
