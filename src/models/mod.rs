//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides nodes with demands, vehicles that carry their own route and
//! load/cost bookkeeping, the assembled problem instance, and the mutable
//! routing state that constructors and optimizers operate on.

mod node;
mod problem;
mod solution;
mod vehicle;

pub use node::Node;
pub use problem::Problem;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::{Vehicle, DEPOT};
