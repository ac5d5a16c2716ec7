//! Precomputed pairwise distances.
//!
//! Provides a dense distance matrix shared read-only by solvers.

mod matrix;

pub use matrix::DistanceMatrix;
