//! # cvrp-anneal
//!
//! Capacitated vehicle routing with a nearest-neighbor constructor and a
//! reheated simulated annealing optimizer driven by O(1) relocation deltas.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Vehicle, Problem, Solution)
//! - [`distance`] — Precomputed distance matrix
//! - [`evaluation`] — Coverage and capacity validation
//! - [`constructive`] — Nearest-neighbor construction
//! - [`annealing`] — Simulated annealing over relocation moves
//! - [`solver`] — Greedy, annealing and hybrid strategies
//! - [`instance`] — Instance file reader and random generator

pub mod annealing;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod instance;
pub mod models;
pub mod solver;

pub use error::RoutingError;
