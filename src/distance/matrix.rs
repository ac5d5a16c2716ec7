//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance table stored in row-major order.
///
/// Built from node coordinates or from a caller-supplied grid, which may be
/// asymmetric. Read-only once an instance owns it; solutions share it
/// through an `Arc`.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::Node;
/// use cvrp_anneal::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 3.0, 4.0, 10),
///     Node::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Euclidean distances between every pair of nodes, indexed by position.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let data = nodes
            .iter()
            .flat_map(|a| nodes.iter().map(move |b| a.distance_to(b)))
            .collect();
        Self {
            data,
            size: nodes.len(),
        }
    }

    /// Wraps an explicit row-major grid, `None` unless it holds
    /// `size * size` entries.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == size * size).then_some(Self { data, size })
    }

    /// Distance travelled from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the table.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }
}
