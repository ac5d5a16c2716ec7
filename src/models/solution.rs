//! Routing state and violation types.

use std::fmt;
use std::sync::Arc;

use super::node::is_depot_indexed;
use super::vehicle::DEPOT;
use super::{Node, Problem, Vehicle};
use crate::distance::DistanceMatrix;
use crate::evaluation;

/// A type of invariant violation found by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Served demand on one vehicle exceeds its capacity.
    CapacityExceeded {
        /// Offending vehicle.
        vehicle_id: usize,
        /// Total demand served by the vehicle.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A demand point is not on any route.
    NodeUnreached {
        /// Node that nobody visits.
        node_id: usize,
    },
    /// A demand point is visited more than once.
    NodeDuplicated {
        /// Node visited several times.
        node_id: usize,
    },
    /// The route does not start and end at the depot.
    RouteNotClosed {
        /// Offending vehicle.
        vehicle_id: usize,
    },
    /// The depot appears between the first and last stop of a route.
    DepotRevisited {
        /// Offending vehicle.
        vehicle_id: usize,
    },
    /// A route refers to a node id the instance does not have.
    UnknownNode {
        /// Offending vehicle.
        vehicle_id: usize,
        /// Id found on the route.
        node_id: usize,
    },
}

/// An invariant violation in a routing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationType::CapacityExceeded {
                vehicle_id,
                demand,
                capacity,
            } => write!(
                f,
                "vehicle {vehicle_id} serves demand {demand} above capacity {capacity}"
            ),
            ViolationType::NodeUnreached { node_id } => write!(f, "node {node_id} is unreached"),
            ViolationType::NodeDuplicated { node_id } => {
                write!(f, "node {node_id} is visited more than once")
            }
            ViolationType::RouteNotClosed { vehicle_id } => {
                write!(f, "route of vehicle {vehicle_id} is not closed at the depot")
            }
            ViolationType::DepotRevisited { vehicle_id } => {
                write!(f, "route of vehicle {vehicle_id} passes the depot mid-route")
            }
            ViolationType::UnknownNode {
                vehicle_id,
                node_id,
            } => write!(f, "vehicle {vehicle_id} visits unknown node {node_id}"),
        }
    }
}

/// The mutable routing state: nodes, vehicles with their routes, and a
/// shared view of the distance matrix.
///
/// A state is created empty (every vehicle parked at the depot) and filled
/// by a constructor, or cloned from an existing state. Cloning never copies
/// the distance matrix.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::{Node, Problem, Solution};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 10),
///     Node::new(2, 5.0, 0.0, 10),
/// ];
/// let problem = Problem::new(nodes, 1, 30);
/// let sol = Solution::from_problem(&problem);
///
/// // Vehicle 0 sits at the depot, node 1 is the closest one that fits.
/// assert_eq!(sol.find_closest_feasible(0), Some(1));
/// assert!(!sol.is_valid());
/// assert_eq!(sol.unreached_nodes(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    nodes: Vec<Node>,
    vehicles: Vec<Vehicle>,
    distances: Arc<DistanceMatrix>,
    depot: usize,
    capacity: i32,
}

impl Solution {
    /// Creates a state from raw collections.
    ///
    /// The fleet capacity is taken from the first vehicle. Nodes already on
    /// a vehicle's route are marked routed, so a constructor run on a
    /// partly built state only extends it. `nodes[0]` must come from
    /// [`Node::depot`] and node `i` must sit at index `i` (checked in debug
    /// builds).
    pub fn new(nodes: Vec<Node>, vehicles: Vec<Vehicle>, distances: Arc<DistanceMatrix>) -> Self {
        debug_assert!(is_depot_indexed(&nodes), "nodes must be depot-first and indexed by id");
        let capacity = vehicles.first().map_or(0, |v| v.capacity());
        let mut solution = Self {
            nodes,
            vehicles,
            distances,
            depot: DEPOT,
            capacity,
        };
        solution.sync_routed();
        solution
    }

    /// Creates a state for an assembled instance.
    pub fn from_problem(problem: &Problem) -> Self {
        let mut solution = Self {
            nodes: problem.nodes().to_vec(),
            vehicles: problem.vehicles().to_vec(),
            distances: Arc::clone(problem.distances()),
            depot: DEPOT,
            capacity: problem.capacity(),
        };
        solution.sync_routed();
        solution
    }

    fn sync_routed(&mut self) {
        for v in &self.vehicles {
            for n in v.served() {
                if let Some(node) = self.nodes.get_mut(n) {
                    node.mark_routed();
                }
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub(crate) fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    pub(crate) fn replace_vehicles(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Fleet capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns the closest unrouted node whose demand fits into the
    /// vehicle's remaining load, measured from its last visited node.
    ///
    /// Nodes are scanned in ascending id order and only a strictly shorter
    /// distance replaces the current best, so ties keep the lower id.
    pub fn find_closest_feasible(&self, vehicle_idx: usize) -> Option<usize> {
        let vehicle = &self.vehicles[vehicle_idx];
        let from = vehicle.last();
        let mut best: Option<(usize, f64)> = None;
        for node in &self.nodes {
            if node.is_routed() || node.demand() > vehicle.load() {
                continue;
            }
            let d = self.distances.get(from, node.id());
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((node.id(), d));
            }
        }
        best.map(|(id, _)| id)
    }

    pub(crate) fn mark_routed(&mut self, node_id: usize) {
        self.nodes[node_id].mark_routed();
    }

    /// Checks coverage and capacity. Side-effect free.
    pub fn is_valid(&self) -> bool {
        evaluation::is_valid(self)
    }

    /// Every violation found by the validator.
    pub fn violations(&self) -> Vec<Violation> {
        evaluation::validate(self)
    }

    /// Demand points not visited by any vehicle, in ascending id order.
    pub fn unreached_nodes(&self) -> Vec<usize> {
        let mut covered = vec![false; self.nodes.len()];
        covered[self.depot] = true;
        for v in &self.vehicles {
            for n in v.served() {
                if let Some(c) = covered.get_mut(n) {
                    *c = true;
                }
            }
        }
        covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(|(i, _)| i)
            .collect()
    }

    /// Route sequences per vehicle.
    pub fn routes(&self) -> Vec<&[usize]> {
        self.vehicles.iter().map(|v| v.route()).collect()
    }

    /// Sum of tracked vehicle costs.
    pub fn total_cost(&self) -> f64 {
        self.vehicles.iter().map(|v| v.cost()).sum()
    }

    /// Largest gap between a tracked vehicle cost and the cost recomputed
    /// from its route.
    pub fn cost_drift(&self) -> f64 {
        self.vehicles
            .iter()
            .map(|v| (v.cost() - v.route_distance(&self.distances)).abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.vehicles {
            write!(f, "Vehicle ID: {} | ", v.id())?;
            let route = v.route();
            // The trailing depot is printed separately so open routes render closed.
            let shown = route.len().saturating_sub(1);
            for n in &route[..shown] {
                write!(f, "{n} ---> ")?;
            }
            writeln!(f, "{}", self.depot)?;
        }
        writeln!(f, "Total solution cost: {:.2}", self.total_cost())?;
        let valid = self.is_valid();
        writeln!(f, "Solution validity  : {valid}")?;
        if !valid {
            for n in self.unreached_nodes() {
                writeln!(f, "Unreached node: {n}")?;
            }
        }
        Ok(())
    }
}
