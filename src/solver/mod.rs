//! Greedy, annealing and hybrid solver entry points.
//!
//! All strategies build and return the same [`Solution`](crate::models::Solution)
//! type; they differ only in which construction and improvement steps run.

mod strategy;

pub use strategy::{solve, Strategy};
