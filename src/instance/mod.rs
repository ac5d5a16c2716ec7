//! Problem instance sources.
//!
//! - [`read_cvrp`] — Fixed-format CVRP text files (`NODE_COORD_SECTION` / `DEMAND_SECTION`)
//! - [`generate`] — Uniform or clustered random instances

mod generator;
mod reader;

pub use generator::{generate, Distribution, GeneratorConfig};
pub use reader::read_cvrp;
