//! Solver strategies sharing one routing state type.

use rand::Rng;

use crate::annealing::{Annealer, AnnealingConfig};
use crate::constructive::nearest_neighbor;
use crate::error::RoutingError;
use crate::models::{Problem, Solution};

/// How to turn a problem into a solution.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Nearest-neighbor construction only.
    Greedy,
    /// Annealing started from an internally built greedy state, without
    /// validating it first.
    Annealing(AnnealingConfig),
    /// Greedy construction, validation, then annealing of a copy.
    ///
    /// Fails if the greedy state is invalid (e.g. it stranded nodes).
    Hybrid(AnnealingConfig),
}

impl Strategy {
    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Annealing(_) => "annealing",
            Strategy::Hybrid(_) => "hybrid",
        }
    }
}

/// Solves `problem` with the given strategy.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::AnnealingConfig;
/// use cvrp_anneal::models::{Node, Problem};
/// use cvrp_anneal::solver::{solve, Strategy};
/// use rand::SeedableRng;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 10),
///     Node::new(2, 0.0, 1.0, 10),
///     Node::new(3, -1.0, 0.0, 10),
/// ];
/// let problem = Problem::new(nodes, 2, 20);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
///
/// let greedy = solve(&problem, &Strategy::Greedy, &mut rng).unwrap();
/// let hybrid = solve(
///     &problem,
///     &Strategy::Hybrid(AnnealingConfig::new(1_000, 10.0, 0.99, 2)),
///     &mut rng,
/// )
/// .unwrap();
/// assert!(hybrid.is_valid());
/// assert!(hybrid.total_cost() <= greedy.total_cost() + 1e-9);
/// ```
pub fn solve<R: Rng>(
    problem: &Problem,
    strategy: &Strategy,
    rng: &mut R,
) -> Result<Solution, RoutingError> {
    let solution = match strategy {
        Strategy::Greedy => {
            let mut solution = Solution::from_problem(problem);
            nearest_neighbor(&mut solution);
            solution
        }
        Strategy::Annealing(config) => {
            Annealer::from_problem(problem, config.clone())?
                .run(rng)
                .solution
        }
        Strategy::Hybrid(config) => {
            let mut seed = Solution::from_problem(problem);
            nearest_neighbor(&mut seed);
            Annealer::from_seed(&seed, config.clone())?.run(rng).solution
        }
    };
    log::info!(
        "{} solution: cost {:.4}, valid {}",
        strategy.name(),
        solution.total_cost(),
        solution.is_valid()
    );
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_problem() -> Problem {
        let nodes = vec![
            Node::depot(38.0, 46.0),
            Node::new(1, 59.0, 46.0, 16),
            Node::new(2, 96.0, 42.0, 18),
            Node::new(3, 47.0, 61.0, 1),
            Node::new(4, 26.0, 15.0, 13),
            Node::new(5, 66.0, 6.0, 8),
        ];
        Problem::new(nodes, 4, 30)
    }

    fn config() -> AnnealingConfig {
        AnnealingConfig::new(2_000, 50.0, 0.9899, 3)
    }

    #[test]
    fn test_all_strategies_valid() {
        let problem = sample_problem();
        let mut rng = StdRng::seed_from_u64(42);
        let greedy = solve(&problem, &Strategy::Greedy, &mut rng).expect("greedy");
        let sa = solve(&problem, &Strategy::Annealing(config()), &mut rng).expect("sa");
        let hybrid = solve(&problem, &Strategy::Hybrid(config()), &mut rng).expect("hybrid");

        for sol in [&greedy, &sa, &hybrid] {
            assert!(sol.is_valid());
        }
        assert!(sa.total_cost() <= greedy.total_cost() + 1e-9);
        assert!(hybrid.total_cost() <= greedy.total_cost() + 1e-9);
    }

    #[test]
    fn test_hybrid_rejects_stranded_greedy() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10),
            Node::new(2, 2.0, 0.0, 10),
        ];
        let problem = Problem::new(nodes, 1, 15);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            solve(&problem, &Strategy::Hybrid(config()), &mut rng),
            Err(RoutingError::InvalidSeed(_))
        ));
        // Plain annealing proceeds and reports the stranded node.
        let sol = solve(&problem, &Strategy::Annealing(config()), &mut rng).expect("sa");
        assert_eq!(sol.unreached_nodes(), vec![2]);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Greedy.name(), "greedy");
        assert_eq!(Strategy::Annealing(config()).name(), "annealing");
        assert_eq!(Strategy::Hybrid(config()).name(), "hybrid");
    }
}
