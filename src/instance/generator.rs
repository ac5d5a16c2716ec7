//! Synthetic instance generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::models::{Node, Problem};

/// Spatial layout of generated demand points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Integer coordinates drawn uniformly from `[-grid_range, grid_range]`.
    Uniform,
    /// Points scattered around `clusters` uniform centers, each coordinate
    /// offset by at most `cluster_range`. The remainder of
    /// `customers / clusters` goes to one extra center.
    Clustered {
        clusters: usize,
        cluster_range: i32,
    },
}

/// Parameters for [`generate`].
///
/// # Examples
///
/// ```
/// use cvrp_anneal::instance::{generate, Distribution, GeneratorConfig};
/// use rand::SeedableRng;
///
/// let config = GeneratorConfig::default()
///     .with_customers(50)
///     .with_vehicles(5)
///     .with_distribution(Distribution::Clustered { clusters: 3, cluster_range: 10 });
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let problem = generate(&config, &mut rng).unwrap();
/// assert_eq!(problem.num_customers(), 50);
/// assert_eq!(problem.vehicles().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of demand points (the depot is added on top).
    pub customers: usize,
    /// Demands are drawn from `[0, demand_range]`.
    pub demand_range: i32,
    /// Fleet size.
    pub vehicles: usize,
    /// Capacity of every vehicle.
    pub capacity: i32,
    /// Half-width of the square the points (or cluster centers) live in.
    pub grid_range: i32,
    pub distribution: Distribution,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customers: 1000,
            demand_range: 40,
            vehicles: 50,
            capacity: 800,
            grid_range: 1000,
            distribution: Distribution::Uniform,
        }
    }
}

impl GeneratorConfig {
    pub fn with_customers(mut self, n: usize) -> Self {
        self.customers = n;
        self
    }

    pub fn with_demand_range(mut self, range: i32) -> Self {
        self.demand_range = range;
        self
    }

    pub fn with_vehicles(mut self, n: usize) -> Self {
        self.vehicles = n;
        self
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_grid_range(mut self, range: i32) -> Self {
        self.grid_range = range;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.demand_range < 0 {
            return Err("demand_range must be non-negative".into());
        }
        if self.capacity < 0 {
            return Err("capacity must be non-negative".into());
        }
        if self.grid_range < 0 {
            return Err("grid_range must be non-negative".into());
        }
        if let Distribution::Clustered {
            clusters,
            cluster_range,
        } = self.distribution
        {
            if clusters == 0 {
                return Err("clusters must be positive".into());
            }
            if cluster_range < 0 {
                return Err("cluster_range must be non-negative".into());
            }
        }
        Ok(())
    }
}

/// Generates a random instance with the depot at the origin.
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Problem, RoutingError> {
    config.validate().map_err(RoutingError::InvalidConfig)?;

    let grid = config.grid_range;
    let mut nodes = Vec::with_capacity(config.customers + 1);
    nodes.push(Node::depot(0.0, 0.0));

    match config.distribution {
        Distribution::Uniform => {
            for id in 1..=config.customers {
                let x = rng.random_range(-grid..=grid);
                let y = rng.random_range(-grid..=grid);
                let demand = rng.random_range(0..=config.demand_range);
                nodes.push(Node::new(id, f64::from(x), f64::from(y), demand));
            }
        }
        Distribution::Clustered {
            clusters,
            cluster_range,
        } => {
            let per_cluster = config.customers / clusters;
            let remainder = config.customers % clusters;
            let sizes = std::iter::repeat_n(per_cluster, clusters).chain(std::iter::once(remainder));
            for size in sizes {
                let cx = rng.random_range(-grid..=grid);
                let cy = rng.random_range(-grid..=grid);
                for _ in 0..size {
                    let x = cx + rng.random_range(-cluster_range..=cluster_range);
                    let y = cy + rng.random_range(-cluster_range..=cluster_range);
                    let demand = rng.random_range(0..=config.demand_range);
                    nodes.push(Node::new(nodes.len(), f64::from(x), f64::from(y), demand));
                }
            }
        }
    }

    Ok(Problem::new(nodes, config.vehicles, config.capacity))
}
