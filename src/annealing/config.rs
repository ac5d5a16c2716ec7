//! Annealing configuration.

use serde::{Deserialize, Serialize};

/// Parameters of the reheated simulated annealing run.
///
/// The search runs `reheats` cooling cycles. Each cycle starts again at
/// `initial_temperature` and multiplies the temperature by `cooling_rate`
/// once per attempted move. A cycle ends after `stagnation_limit` attempts
/// without a new best; every new best refills that budget.
///
/// `Default` carries the values the solver has historically been tuned
/// with; callers are expected to set their own for large instances.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_stagnation_limit(10_000)
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.9899)
///     .with_reheats(5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Move attempts tolerated without a new best before the cycle ends.
    pub stagnation_limit: usize,

    /// Temperature at the start of every cycle.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor applied per attempted move.
    pub cooling_rate: f64,

    /// Number of cooling cycles.
    pub reheats: usize,

    /// Random seed used by [`Annealer::run_seeded`](super::Annealer::run_seeded).
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            stagnation_limit: 500_000,
            initial_temperature: 5000.0,
            cooling_rate: 0.9999,
            reheats: 20,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Creates a configuration from the four search parameters.
    pub fn new(
        stagnation_limit: usize,
        initial_temperature: f64,
        cooling_rate: f64,
        reheats: usize,
    ) -> Self {
        Self {
            stagnation_limit,
            initial_temperature,
            cooling_rate,
            reheats,
            seed: None,
        }
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_reheats(mut self, n: usize) -> Self {
        self.reheats = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.stagnation_limit == 0 {
            return Err("stagnation_limit must be positive".into());
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            ));
        }
        Ok(())
    }
}
