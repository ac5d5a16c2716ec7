//! Single-node relocation move with O(1) cost delta.
//!
//! A relocation removes the node at `from_pos` in one route and reinserts
//! it immediately after position `after` in another (or the same) route.
//!
//! ```text
//! removal   = d(prev, next) - d(prev, node) - d(node, next)
//! insertion = d(a, node) + d(node, b) - d(a, b)     where a = route[after], b = route[after + 1]
//! delta     = insertion + removal
//! ```
//!
//! Within one route the move is evaluated on the unmodified sequence. Moves
//! that would put a node back where it is (`from_pos == after` or
//! `from_pos == after + 1`) are no-ops and must be skipped; for every other
//! intra-route move the four edges are disjoint from the removed node so
//! the delta stays exact.

use rand::Rng;

use crate::models::Solution;

/// Cost change of a relocation, split by route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelocationDelta {
    /// Change on the source route (usually negative).
    pub removal: f64,
    /// Change on the target route.
    pub insertion: f64,
}

impl RelocationDelta {
    /// Net change in total cost.
    pub fn total(&self) -> f64 {
        self.insertion + self.removal
    }
}

/// Moves one node from `from_vehicle[from_pos]` to just after
/// `to_vehicle[after]`.
///
/// `from_pos` must be an interior position (not a depot end) and `after`
/// must not be the trailing depot of the target route.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_anneal::annealing::Relocation;
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{Node, Solution, Vehicle};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 1),
///     Node::new(2, 2.0, 0.0, 1),
///     Node::new(3, 3.0, 0.0, 1),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let demands: Vec<i32> = nodes.iter().map(|n| n.demand()).collect();
/// let v = Vehicle::with_route(0, 10, vec![0, 3, 1, 2, 0], &demands, &dm);
/// let mut sol = Solution::new(nodes, vec![v], Arc::new(dm));
///
/// // Move node 3 behind node 2.
/// let mv = Relocation::new(0, 1, 0, 3);
/// let delta = mv.evaluate(&sol);
/// assert!((delta.total() + 2.0).abs() < 1e-10);
/// mv.apply(&mut sol, &delta);
/// assert_eq!(sol.vehicles()[0].route(), &[0, 1, 2, 3, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub from_vehicle: usize,
    pub from_pos: usize,
    pub to_vehicle: usize,
    pub after: usize,
}

impl Relocation {
    pub fn new(from_vehicle: usize, from_pos: usize, to_vehicle: usize, after: usize) -> Self {
        Self {
            from_vehicle,
            from_pos,
            to_vehicle,
            after,
        }
    }

    /// Draws a random move: two vehicles uniformly (possibly the same), an
    /// interior position in the first and an insertion point in the second.
    ///
    /// Returns `None` without drawing the insertion point when the first
    /// route serves nobody.
    pub fn sample<R: Rng>(solution: &Solution, rng: &mut R) -> Option<Self> {
        let vehicles = solution.vehicles();
        let from_vehicle = rng.random_range(0..vehicles.len());
        let to_vehicle = rng.random_range(0..vehicles.len());

        let from_len = vehicles[from_vehicle].route().len();
        if from_len <= 2 {
            return None;
        }
        let from_pos = rng.random_range(1..from_len - 1);
        let after = rng.random_range(0..vehicles[to_vehicle].route().len() - 1);

        Some(Self::new(from_vehicle, from_pos, to_vehicle, after))
    }

    /// Returns `true` if source and target are the same route.
    pub fn is_intra_route(&self) -> bool {
        self.from_vehicle == self.to_vehicle
    }

    /// Returns `true` if applying the move would leave the route unchanged.
    pub fn is_noop(&self) -> bool {
        self.is_intra_route() && (self.from_pos == self.after || self.from_pos == self.after + 1)
    }

    /// Returns `true` if both positions address valid slots of `solution`.
    pub fn is_within_bounds(&self, solution: &Solution) -> bool {
        let vehicles = solution.vehicles();
        let (Some(from), Some(to)) = (
            vehicles.get(self.from_vehicle),
            vehicles.get(self.to_vehicle),
        ) else {
            return false;
        };
        let from_len = from.route().len();
        let to_len = to.route().len();
        self.from_pos >= 1 && self.from_pos + 1 < from_len && self.after + 1 < to_len
    }

    /// The node being moved.
    pub fn node(&self, solution: &Solution) -> usize {
        solution.vehicles()[self.from_vehicle].route()[self.from_pos]
    }

    /// Computes the cost change from four matrix lookups per side.
    pub fn evaluate(&self, solution: &Solution) -> RelocationDelta {
        let dm = solution.distances();
        let src = solution.vehicles()[self.from_vehicle].route();
        let dst = solution.vehicles()[self.to_vehicle].route();

        let prev = src[self.from_pos - 1];
        let node = src[self.from_pos];
        let next = src[self.from_pos + 1];
        let a = dst[self.after];
        let b = dst[self.after + 1];

        RelocationDelta {
            removal: dm.get(prev, next) - dm.get(prev, node) - dm.get(node, next),
            insertion: dm.get(a, node) + dm.get(node, b) - dm.get(a, b),
        }
    }

    /// Returns `true` if the target vehicle can absorb the node's demand.
    ///
    /// Intra-route moves never change load and are always feasible.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        if self.is_intra_route() {
            return true;
        }
        let demand = solution.nodes()[self.node(solution)].demand();
        solution.vehicles()[self.to_vehicle].load() - demand >= 0
    }

    /// Position the node occupies in the target route after [`apply`](Self::apply).
    pub fn landing_pos(&self) -> usize {
        if self.is_intra_route() && self.from_pos < self.after {
            self.after
        } else {
            self.after + 1
        }
    }

    /// Performs the move and books `delta` onto both vehicles.
    pub fn apply(&self, solution: &mut Solution, delta: &RelocationDelta) {
        debug_assert!(self.is_within_bounds(solution));
        debug_assert!(!self.is_noop());

        let node = self.node(solution);
        let demand = solution.nodes()[node].demand();
        let at = self.landing_pos();
        let vehicles = solution.vehicles_mut();

        let src = &mut vehicles[self.from_vehicle];
        src.route.remove(self.from_pos);
        src.load += demand;
        src.cost += delta.removal;

        let dst = &mut vehicles[self.to_vehicle];
        dst.route.insert(at, node);
        dst.load -= demand;
        dst.cost += delta.insertion;
    }

    /// The move that undoes this one once it has been applied.
    pub fn inverse(&self) -> Self {
        let after = if self.is_intra_route() && self.from_pos > self.after {
            self.from_pos
        } else {
            self.from_pos - 1
        };
        Self::new(self.to_vehicle, self.landing_pos(), self.from_vehicle, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Node, Vehicle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn state(routes: Vec<Vec<usize>>, capacity: i32) -> Solution {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10),
            Node::new(2, 2.0, 0.0, 10),
            Node::new(3, 3.0, 0.0, 10),
            Node::new(4, 0.0, 4.0, 5),
            Node::new(5, 0.0, 7.0, 5),
        ];
        let dm = DistanceMatrix::from_nodes(&nodes);
        let demands: Vec<i32> = nodes.iter().map(|n| n.demand()).collect();
        let vehicles = routes
            .into_iter()
            .enumerate()
            .map(|(id, r)| Vehicle::with_route(id, capacity, r, &demands, &dm))
            .collect();
        Solution::new(nodes, vehicles, Arc::new(dm))
    }

    fn assert_consistent(sol: &Solution) {
        assert!(sol.cost_drift() < 1e-9, "drift {}", sol.cost_drift());
        for v in sol.vehicles() {
            let served: i32 = v.served().map(|n| sol.nodes()[n].demand()).sum();
            assert_eq!(v.load(), v.capacity() - served);
        }
    }

    #[test]
    fn test_noop_detection() {
        assert!(Relocation::new(0, 2, 0, 2).is_noop());
        assert!(Relocation::new(0, 2, 0, 1).is_noop());
        assert!(!Relocation::new(0, 2, 0, 3).is_noop());
        assert!(!Relocation::new(0, 2, 1, 1).is_noop());
    }

    #[test]
    fn test_inter_route_move() {
        let mut sol = state(vec![vec![0, 1, 2, 3, 0], vec![0, 4, 5, 0]], 30);
        let mv = Relocation::new(0, 3, 1, 0);
        assert!(mv.is_feasible(&sol));
        let delta = mv.evaluate(&sol);
        let before = sol.total_cost();
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[0].route(), &[0, 1, 2, 0]);
        assert_eq!(sol.vehicles()[1].route(), &[0, 3, 4, 5, 0]);
        assert!((sol.total_cost() - (before + delta.total())).abs() < 1e-9);
        assert_consistent(&sol);
        assert!(sol.is_valid());
    }

    #[test]
    fn test_intra_route_forward_move() {
        let mut sol = state(vec![vec![0, 2, 1, 3, 0]], 30);
        // Node 2 (pos 1) goes behind node 3 (pos 3) and lands at pos 3.
        let mv = Relocation::new(0, 1, 0, 3);
        let delta = mv.evaluate(&sol);
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[0].route(), &[0, 1, 3, 2, 0]);
        assert_consistent(&sol);
    }

    #[test]
    fn test_intra_route_backward_move() {
        let mut sol = state(vec![vec![0, 3, 1, 2, 0]], 30);
        let mv = Relocation::new(0, 1, 0, 3);
        let delta = mv.evaluate(&sol);
        // 0-3-1-2-0 costs 8, 0-1-2-3-0 costs 6.
        assert!((delta.total() + 2.0).abs() < 1e-10);
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[0].route(), &[0, 1, 2, 3, 0]);

        let mut sol = state(vec![vec![0, 2, 3, 1, 0]], 30);
        let mv = Relocation::new(0, 3, 0, 0);
        let delta = mv.evaluate(&sol);
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[0].route(), &[0, 1, 2, 3, 0]);
        assert_consistent(&sol);
    }

    #[test]
    fn test_infeasible_inter_route() {
        let sol = state(vec![vec![0, 1, 2, 0], vec![0, 3, 4, 5, 0]], 30);
        // Vehicle 1 has 10 left, node 1 demands 10: fits exactly.
        assert!(Relocation::new(0, 1, 1, 0).is_feasible(&sol));
        let sol = state(vec![vec![0, 1, 2, 0], vec![0, 3, 4, 5, 0]], 25);
        assert!(!Relocation::new(0, 1, 1, 0).is_feasible(&sol));
        // Intra-route moves ignore load.
        assert!(Relocation::new(1, 1, 1, 2).is_feasible(&sol));
    }

    #[test]
    fn test_move_into_empty_route() {
        let mut sol = state(vec![vec![0, 1, 2, 3, 4, 5, 0], vec![0, 0]], 50);
        let mv = Relocation::new(0, 4, 1, 0);
        let delta = mv.evaluate(&sol);
        assert!((delta.insertion - 8.0).abs() < 1e-10);
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[1].route(), &[0, 4, 0]);
        assert_consistent(&sol);
    }

    #[test]
    fn test_move_empties_route() {
        let mut sol = state(vec![vec![0, 1, 2, 3, 0], vec![0, 4, 0], vec![0, 5, 0]], 50);
        let mv = Relocation::new(1, 1, 2, 1);
        let delta = mv.evaluate(&sol);
        mv.apply(&mut sol, &delta);
        assert_eq!(sol.vehicles()[1].route(), &[0, 0]);
        assert_eq!(sol.vehicles()[1].load(), 50);
        assert!(sol.vehicles()[1].cost().abs() < 1e-9);
        assert_consistent(&sol);
        assert!(sol.is_valid());
    }

    #[test]
    fn test_inverse_restores_state() {
        let moves = [
            Relocation::new(0, 1, 1, 2),
            Relocation::new(1, 2, 0, 0),
            Relocation::new(0, 1, 0, 3),
            Relocation::new(0, 3, 0, 0),
            Relocation::new(0, 2, 0, 3),
        ];
        for mv in moves {
            let original = state(vec![vec![0, 1, 2, 3, 0], vec![0, 4, 5, 0]], 50);
            let mut sol = original.clone();
            let delta = mv.evaluate(&sol);
            mv.apply(&mut sol, &delta);

            let inv = mv.inverse();
            assert!(!inv.is_noop(), "{mv:?} inverse is a no-op");
            assert!(inv.is_within_bounds(&sol));
            let back = inv.evaluate(&sol);
            assert!((back.total() + delta.total()).abs() < 1e-9);
            inv.apply(&mut sol, &back);

            for (a, b) in sol.vehicles().iter().zip(original.vehicles()) {
                assert_eq!(a.route(), b.route(), "{mv:?}");
                assert_eq!(a.load(), b.load());
                assert!((a.cost() - b.cost()).abs() < 1e-9);
            }
            assert!((sol.total_cost() - original.total_cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_within_bounds() {
        let sol = state(vec![vec![0, 1, 2, 3, 0], vec![0, 0], vec![0, 4, 5, 0]], 50);
        let mut rng = StdRng::seed_from_u64(42);
        let mut sampled = 0;
        for _ in 0..500 {
            if let Some(mv) = Relocation::sample(&sol, &mut rng) {
                assert!(mv.is_within_bounds(&sol));
                assert_ne!(mv.from_vehicle, 1);
                sampled += 1;
            }
        }
        assert!(sampled > 0);
    }

    #[test]
    fn test_sample_none_for_empty_routes() {
        let sol = state(vec![vec![0, 0], vec![0, 0]], 50);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Relocation::sample(&sol, &mut rng).is_none());
    }

    #[test]
    fn test_out_of_bounds() {
        let sol = state(vec![vec![0, 1, 0]], 50);
        assert!(!Relocation::new(0, 0, 0, 0).is_within_bounds(&sol));
        assert!(!Relocation::new(0, 2, 0, 0).is_within_bounds(&sol));
        assert!(!Relocation::new(0, 1, 0, 2).is_within_bounds(&sol));
        assert!(!Relocation::new(3, 1, 0, 0).is_within_bounds(&sol));
        assert!(Relocation::new(0, 1, 0, 1).is_within_bounds(&sol));
    }
}
