//! Simulated annealing with reheats.
//!
//! Improves a routing state through random single-node relocations whose
//! cost change is computed from four distance lookups. Worsening moves are
//! accepted with the Metropolis probability `exp(-delta / T)`; the
//! temperature is reset on every reheat and the best state seen is
//! returned.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Osman (1993), "Metastrategy simulated annealing and tabu search
//!   algorithms for the vehicle routing problem"

mod config;
mod relocation;
mod runner;

pub use config::AnnealingConfig;
pub use relocation::{Relocation, RelocationDelta};
pub use runner::{Annealer, AnnealingResult, EPSILON};
