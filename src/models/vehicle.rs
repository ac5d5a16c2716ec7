//! Vehicle type: capacity bookkeeping plus its route.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// Id of the depot node.
pub const DEPOT: usize = 0;

/// A vehicle together with the route it drives.
///
/// The route always starts at the depot. A closed route also ends at the
/// depot, so a vehicle that serves nobody holds `[0, 0]`. `load` is the
/// remaining capacity: `capacity - sum(demand of served nodes)`.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::Vehicle;
///
/// let v = Vehicle::new(0, 30);
/// assert_eq!(v.capacity(), 30);
/// assert_eq!(v.load(), 30);
/// assert_eq!(v.route(), &[0]);
/// assert_eq!(v.cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    pub(crate) load: i32,
    pub(crate) cost: f64,
    pub(crate) route: Vec<usize>,
}

impl Vehicle {
    /// Creates an idle vehicle parked at the depot.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            load: capacity,
            cost: 0.0,
            route: vec![DEPOT],
        }
    }

    /// Creates a vehicle from an explicit route.
    ///
    /// Load and cost are derived from `demands` (indexed by node id) and
    /// `distances`. No feasibility check is done here.
    pub fn with_route(
        id: usize,
        capacity: i32,
        route: Vec<usize>,
        demands: &[i32],
        distances: &DistanceMatrix,
    ) -> Self {
        let served: i32 = route
            .iter()
            .filter(|&&n| n != DEPOT)
            .map(|&n| demands[n])
            .sum();
        let mut v = Self {
            id,
            capacity,
            load: capacity - served,
            cost: 0.0,
            route,
        };
        v.recompute_cost(distances);
        v
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Remaining capacity.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Tracked travel cost of the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Visit sequence including the leading and trailing depot.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Last visited node.
    pub fn last(&self) -> usize {
        self.route.last().copied().unwrap_or(DEPOT)
    }

    /// Ids of served demand points, in visit order.
    pub fn served(&self) -> impl Iterator<Item = usize> + '_ {
        self.route.iter().copied().filter(|&n| n != DEPOT)
    }

    /// Returns `true` if the route starts and ends at the depot.
    pub fn is_closed(&self) -> bool {
        self.route.len() >= 2 && self.route[0] == DEPOT && self.last() == DEPOT
    }

    /// Sum of consecutive pairwise distances along the route.
    pub fn route_distance(&self, distances: &DistanceMatrix) -> f64 {
        self.route
            .windows(2)
            .map(|w| distances.get(w[0], w[1]))
            .sum()
    }

    /// Replaces the tracked cost by a from-scratch computation.
    pub fn recompute_cost(&mut self, distances: &DistanceMatrix) {
        self.cost = self.route_distance(distances);
    }
}
