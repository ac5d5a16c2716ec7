//! Reheated simulated annealing over relocation moves.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AnnealingConfig;
use super::relocation::Relocation;
use crate::constructive::nearest_neighbor;
use crate::error::RoutingError;
use crate::models::{Problem, Solution};

/// Tolerance for "strictly better" comparisons on accumulated costs.
pub const EPSILON: f64 = 1e-10;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// Best state seen during the run.
    pub solution: Solution,

    /// Running cost at which `solution` was captured.
    pub best_cost: f64,

    /// Attempted moves, including skipped ones.
    pub iterations: usize,

    /// Applied moves (including worsening ones).
    pub accepted_moves: usize,

    /// Applied moves with a negative delta.
    pub improving_moves: usize,

    /// Best cost before the first cycle and after every cycle.
    pub best_history: Vec<f64>,
}

/// Owns the working state of one annealing run.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::{Annealer, AnnealingConfig};
/// use cvrp_anneal::constructive::nearest_neighbor;
/// use cvrp_anneal::models::{Node, Problem, Solution};
/// use rand::SeedableRng;
///
/// let nodes = vec![
///     Node::depot(38.0, 46.0),
///     Node::new(1, 59.0, 46.0, 16),
///     Node::new(2, 96.0, 42.0, 18),
///     Node::new(3, 47.0, 61.0, 1),
///     Node::new(4, 26.0, 15.0, 13),
///     Node::new(5, 66.0, 6.0, 8),
/// ];
/// let problem = Problem::new(nodes, 4, 30);
/// let mut greedy = Solution::from_problem(&problem);
/// nearest_neighbor(&mut greedy);
///
/// let config = AnnealingConfig::new(2_000, 50.0, 0.99, 3);
/// let annealer = Annealer::from_seed(&greedy, config).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let result = annealer.run(&mut rng);
///
/// assert!(result.solution.is_valid());
/// assert!(result.solution.total_cost() <= greedy.total_cost() + 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Annealer {
    working: Solution,
    config: AnnealingConfig,
}

impl Annealer {
    /// Builds the starting state with [`nearest_neighbor`] and anneals it.
    ///
    /// The greedy state is not validated: nodes it strands stay unrouted.
    pub fn from_problem(problem: &Problem, config: AnnealingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::InvalidConfig)?;
        let mut working = Solution::from_problem(problem);
        nearest_neighbor(&mut working);
        Ok(Self { working, config })
    }

    /// Anneals a copy of an existing state.
    ///
    /// Fails with [`RoutingError::InvalidSeed`] if the seed does not pass
    /// validation, since its load and cost bookkeeping cannot be trusted.
    pub fn from_seed(seed: &Solution, config: AnnealingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::InvalidConfig)?;
        let violations = seed.violations();
        if !violations.is_empty() {
            return Err(RoutingError::InvalidSeed(violations));
        }
        Ok(Self {
            working: seed.clone(),
            config,
        })
    }

    /// The state annealing will start from.
    pub fn initial(&self) -> &Solution {
        &self.working
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Runs with an rng seeded from `config.seed`, or from entropy if unset.
    pub fn run_seeded(self) -> AnnealingResult {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng)
    }

    /// Runs every cooling cycle and returns the best state seen.
    pub fn run<R: Rng>(self, rng: &mut R) -> AnnealingResult {
        let Self {
            mut working,
            config,
        } = self;

        let mut current_cost = working.total_cost();
        let mut best_cost = current_cost;
        let mut best_vehicles = working.vehicles().to_vec();
        let mut best_history = vec![best_cost];

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let movable = !working.vehicles().is_empty();

        for cycle in 0..config.reheats {
            let mut stagnation = config.stagnation_limit;
            let mut temperature = config.initial_temperature;

            while movable && stagnation > 0 {
                stagnation -= 1;
                temperature *= config.cooling_rate;
                iterations += 1;

                let Some(mv) = Relocation::sample(&working, rng) else {
                    continue;
                };
                if mv.is_noop() {
                    continue;
                }

                let delta = mv.evaluate(&working);
                // Infeasible moves are rejected before the Metropolis draw.
                if !mv.is_feasible(&working) || !accept(delta.total(), temperature, rng) {
                    continue;
                }

                mv.apply(&mut working, &delta);
                current_cost += delta.total();
                accepted_moves += 1;
                if delta.total() < -EPSILON {
                    improving_moves += 1;
                }

                if current_cost < best_cost - EPSILON {
                    stagnation = config.stagnation_limit;
                    best_cost = current_cost;
                    best_vehicles.clone_from_slice(working.vehicles());
                }
            }

            best_history.push(best_cost);
            debug!(
                "reheat {}/{}: best {:.4}, current {:.4}, temperature {:.6}",
                cycle + 1,
                config.reheats,
                best_cost,
                current_cost,
                temperature
            );
        }

        working.replace_vehicles(best_vehicles);

        info!(
            "annealing finished: cost {:.4} after {} iterations ({} accepted, {} improving), valid {}",
            working.total_cost(),
            iterations,
            accepted_moves,
            improving_moves,
            working.is_valid()
        );
        for node in working.unreached_nodes() {
            warn!("node {node} is unreached");
        }

        AnnealingResult {
            solution: working,
            best_cost,
            iterations,
            accepted_moves,
            improving_moves,
            best_history,
        }
    }
}

/// Metropolis criterion: improving moves always pass, others with
/// probability `exp(-delta / temperature)`.
fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    delta < -EPSILON || rng.random::<f64>() < (-delta / temperature).exp()
}
