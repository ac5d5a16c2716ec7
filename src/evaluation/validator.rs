//! Coverage and capacity validation of a routing state.

use crate::models::{Solution, Violation, ViolationType, DEPOT};

/// Scans a routing state and returns every violation found.
///
/// Checks, in order per vehicle, that the route is closed at the depot,
/// does not pass the depot mid-route, names only known nodes and keeps
/// served demand within capacity; then that every demand point is visited
/// exactly once. Runs in O(total route length + nodes), has no side
/// effects and never panics on malformed routes.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::{Node, Problem, Solution};
/// use cvrp_anneal::constructive::nearest_neighbor;
/// use cvrp_anneal::evaluation::validate;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 10),
///     Node::new(2, 2.0, 0.0, 10),
/// ];
/// let mut sol = Solution::from_problem(&Problem::new(nodes, 1, 30));
/// assert!(!validate(&sol).is_empty());
///
/// nearest_neighbor(&mut sol);
/// assert!(validate(&sol).is_empty());
/// ```
pub fn validate(solution: &Solution) -> Vec<Violation> {
    let nodes = solution.nodes();
    let mut violations = Vec::new();
    let mut visits = vec![0u32; nodes.len()];

    for vehicle in solution.vehicles() {
        if !vehicle.is_closed() {
            violations.push(Violation::new(ViolationType::RouteNotClosed {
                vehicle_id: vehicle.id(),
            }));
        }

        let route = vehicle.route();
        if route.len() > 2 && route[1..route.len() - 1].contains(&DEPOT) {
            violations.push(Violation::new(ViolationType::DepotRevisited {
                vehicle_id: vehicle.id(),
            }));
        }

        let mut remaining = vehicle.capacity();
        for n in vehicle.served() {
            let Some(node) = nodes.get(n) else {
                violations.push(Violation::new(ViolationType::UnknownNode {
                    vehicle_id: vehicle.id(),
                    node_id: n,
                }));
                continue;
            };
            remaining -= node.demand();
            visits[n] += 1;
        }
        if remaining < 0 {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                vehicle_id: vehicle.id(),
                demand: vehicle.capacity() - remaining,
                capacity: vehicle.capacity(),
            }));
        }
    }

    for (node_id, &count) in visits.iter().enumerate() {
        if node_id == DEPOT {
            continue;
        }
        match count {
            0 => violations.push(Violation::new(ViolationType::NodeUnreached { node_id })),
            1 => {}
            _ => violations.push(Violation::new(ViolationType::NodeDuplicated { node_id })),
        }
    }

    violations
}

/// Returns `true` if [`validate`] finds nothing.
pub fn is_valid(solution: &Solution) -> bool {
    validate(solution).is_empty()
}
