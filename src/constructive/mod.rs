//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`nearest_neighbor`] — Single-pass greedy nearest-feasible-neighbor, O(V·n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
