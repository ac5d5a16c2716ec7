//! Problem instance: nodes, fleet and the shared distance matrix.

use std::sync::Arc;

use super::node::is_depot_indexed;
use super::{Node, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;

/// An assembled CVRP instance.
///
/// Nodes and the distance matrix are read-only once built. The matrix sits
/// behind an [`Arc`] so every solution derived from this instance shares it.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::{Node, Problem};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 3.0, 4.0, 10),
/// ];
/// let problem = Problem::new(nodes, 2, 30);
/// assert_eq!(problem.num_customers(), 1);
/// assert_eq!(problem.vehicles().len(), 2);
/// assert!((problem.distances().get(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    vehicles: Vec<Vehicle>,
    distances: Arc<DistanceMatrix>,
    capacity: i32,
}

impl Problem {
    /// Builds an instance with a homogeneous fleet of `num_vehicles`.
    ///
    /// `nodes[0]` must come from [`Node::depot`] and every other node must
    /// sit at the index equal to its id. Checked in debug builds.
    pub fn new(nodes: Vec<Node>, num_vehicles: usize, capacity: i32) -> Self {
        debug_assert!(is_depot_indexed(&nodes), "nodes must be depot-first and indexed by id");
        let distances = Arc::new(DistanceMatrix::from_nodes(&nodes));
        let vehicles = (0..num_vehicles)
            .map(|id| Vehicle::new(id, capacity))
            .collect();
        Self {
            nodes,
            vehicles,
            distances,
            capacity,
        }
    }

    /// Builds an instance from precomputed parts.
    ///
    /// Same node layout as [`Problem::new`]; the matrix must cover every
    /// node. Both are checked in debug builds.
    pub fn from_parts(
        nodes: Vec<Node>,
        vehicles: Vec<Vehicle>,
        distances: Arc<DistanceMatrix>,
    ) -> Self {
        debug_assert!(is_depot_indexed(&nodes), "nodes must be depot-first and indexed by id");
        debug_assert_eq!(distances.size(), nodes.len());
        let capacity = vehicles.first().map_or(0, |v| v.capacity());
        Self {
            nodes,
            vehicles,
            distances,
            capacity,
        }
    }

    /// Builds an instance from a caller-supplied row-major distance grid,
    /// e.g. road distances that do not follow node coordinates.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidConfig`] if `distances` is not `n × n` for
    /// `n = nodes.len()`.
    pub fn from_matrix(
        nodes: Vec<Node>,
        vehicles: Vec<Vehicle>,
        distances: Vec<f64>,
    ) -> Result<Self, RoutingError> {
        let n = nodes.len();
        let len = distances.len();
        let matrix = DistanceMatrix::from_data(n, distances).ok_or_else(|| {
            RoutingError::InvalidConfig(format!(
                "distance matrix has {len} entries, expected {n}x{n}"
            ))
        })?;
        Ok(Self::from_parts(nodes, vehicles, Arc::new(matrix)))
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn distances(&self) -> &Arc<DistanceMatrix> {
        &self.distances
    }

    /// Capacity shared by the fleet.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of demand points (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> i64 {
        self.nodes.iter().map(|n| i64::from(n.demand())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_new() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10),
            Node::new(2, 2.0, 0.0, 7),
        ];
        let p = Problem::new(nodes, 3, 20);
        assert_eq!(p.num_customers(), 2);
        assert_eq!(p.capacity(), 20);
        assert_eq!(p.total_demand(), 17);
        assert!(p.vehicles().iter().all(|v| v.load() == 20));
        assert_eq!(p.distances().size(), 3);
    }

    #[test]
    fn test_clone_shares_matrix() {
        let p = Problem::new(vec![Node::depot(0.0, 0.0)], 1, 10);
        let q = p.clone();
        assert!(Arc::ptr_eq(p.distances(), q.distances()));
    }

    #[test]
    fn test_from_parts() {
        let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 0.0, 2.0, 4)];
        let dm = Arc::new(DistanceMatrix::from_nodes(&nodes));
        let p = Problem::from_parts(nodes, vec![Vehicle::new(0, 9)], dm);
        assert_eq!(p.capacity(), 9);
        assert_eq!(p.num_customers(), 1);
    }

    #[test]
    fn test_from_matrix() {
        let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 0.0, 0.0, 4)];
        let p = Problem::from_matrix(nodes, vec![Vehicle::new(0, 9)], vec![0.0, 7.0, 3.0, 0.0])
            .expect("2x2 grid");
        assert_eq!(p.distances().get(0, 1), 7.0);
        assert_eq!(p.distances().get(1, 0), 3.0);
    }

    #[test]
    fn test_from_matrix_wrong_size() {
        let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 0.0, 0.0, 4)];
        let err = Problem::from_matrix(nodes, vec![Vehicle::new(0, 9)], vec![0.0, 1.0, 2.0])
            .expect_err("3 entries for 2 nodes");
        assert!(matches!(err, RoutingError::InvalidConfig(_)));
        assert!(err.to_string().contains("expected 2x2"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "depot-first")]
    fn test_plain_node_as_depot_rejected() {
        let nodes = vec![Node::new(0, 0.0, 0.0, 0), Node::new(1, 1.0, 0.0, 4)];
        let _ = Problem::new(nodes, 1, 10);
    }
}
