//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily, one vehicle at a time: starting from the depot,
//! always visit the nearest unrouted node whose demand still fits. When no
//! node fits, the vehicle returns to the depot and the next vehicle starts.
//!
//! # Complexity
//!
//! O(V × n²) worst case where V = vehicles and n = nodes, since every
//! extension rescans all nodes.
//!
//! # Stranded nodes
//!
//! A vehicle is never reopened after it returns to the depot. If early
//! vehicles fill up badly, later nodes may stay unrouted even though total
//! capacity would suffice. Those nodes are reported by
//! [`Solution::unreached_nodes`] and make the state invalid.

use log::{debug, warn};

use crate::models::Solution;

/// Fills a routing state using the nearest-neighbor heuristic.
///
/// Vehicles whose route is already closed are left untouched. An open route
/// is extended from its last stop; nodes it already serves are marked
/// routed by [`Solution::new`] and are never picked again.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::{Node, Problem, Solution};
/// use cvrp_anneal::constructive::nearest_neighbor;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 10),
///     Node::new(2, 2.0, 0.0, 10),
///     Node::new(3, 3.0, 0.0, 10),
/// ];
/// let mut sol = Solution::from_problem(&Problem::new(nodes, 1, 30));
/// nearest_neighbor(&mut sol);
///
/// assert_eq!(sol.vehicles()[0].route(), &[0, 1, 2, 3, 0]);
/// assert!((sol.total_cost() - 6.0).abs() < 1e-10);
/// assert!(sol.is_valid());
/// ```
pub fn nearest_neighbor(solution: &mut Solution) {
    let depot = solution.depot();

    for idx in 0..solution.vehicles().len() {
        if solution.vehicles()[idx].is_closed() {
            debug!("vehicle {idx} already closed, skipping");
            continue;
        }

        loop {
            let next = solution.find_closest_feasible(idx);
            let (from, demand) = {
                let v = &solution.vehicles()[idx];
                (v.last(), next.map_or(0, |n| solution.nodes()[n].demand()))
            };

            match next {
                Some(node) => {
                    let d = solution.distances().get(from, node);
                    let v = &mut solution.vehicles_mut()[idx];
                    v.load -= demand;
                    v.cost += d;
                    v.route.push(node);
                    solution.mark_routed(node);
                }
                None => {
                    let d = solution.distances().get(from, depot);
                    let v = &mut solution.vehicles_mut()[idx];
                    v.cost += d;
                    v.route.push(depot);
                    break;
                }
            }
        }
    }

    debug!("nearest neighbor cost: {:.4}", solution.total_cost());
    for node in solution.unreached_nodes() {
        warn!("nearest neighbor left node {node} unreached");
    }
}
