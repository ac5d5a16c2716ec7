//! Node type: the depot or a demand point.

use serde::{Deserialize, Serialize};

/// A location in a routing instance.
///
/// Node 0 is the depot. Coordinates are only used to derive the distance
/// matrix; after instance creation the only mutable field is `routed`,
/// which the nearest-neighbor constructor sets once per node.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::Node;
///
/// let depot = Node::depot(38.0, 46.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
/// assert!(depot.is_routed());
///
/// let n = Node::new(1, 59.0, 46.0, 16);
/// assert!(!n.is_routed());
/// assert!((depot.distance_to(&n) - 21.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    routed: bool,
}

impl Node {
    /// Creates an unrouted demand point.
    pub fn new(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            routed: false,
        }
    }

    /// Creates the depot (id 0, no demand, always considered routed).
    pub fn depot(x: f64, y: f64) -> Self {
        Self {
            id: 0,
            x,
            y,
            demand: 0,
            routed: true,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Quantity this node consumes from a vehicle's load.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Whether greedy construction has assigned this node to a vehicle.
    pub fn is_routed(&self) -> bool {
        self.routed
    }

    pub(crate) fn mark_routed(&mut self) {
        self.routed = true;
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Returns `true` if node `i` sits at index `i` and index 0 is a depot
/// built with [`Node::depot`]. Routing lookups index nodes by id.
pub(crate) fn is_depot_indexed(nodes: &[Node]) -> bool {
    let depot_first = nodes
        .first()
        .is_none_or(|d| d.demand() == 0 && d.is_routed());
    depot_first && nodes.iter().enumerate().all(|(i, n)| n.id() == i)
}
