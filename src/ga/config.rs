//! Run parameters for the genetic search.

use serde::{Deserialize, Serialize};

use crate::error::CvrpError;

/// How parents are drawn from the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// Draw `size` distinct members; the better one of each comparison wins
    /// with probability `win_probability`.
    Tournament {
        /// Number of members drawn per tournament.
        size: usize,
        /// Probability that the lower-cost contestant wins.
        win_probability: f64,
    },
    /// Fitness-proportional draw with weight 1/cost.
    RouletteWheel,
}

impl Default for SelectionKind {
    fn default() -> Self {
        SelectionKind::Tournament {
            size: 3,
            win_probability: 0.85,
        }
    }
}

/// How two parents are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    /// Greedy-edge crossover, one child.
    #[default]
    #[serde(rename = "hgrex")]
    HGreX,
    /// Order crossover, two children.
    Ox,
}

/// Population update scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One offspring batch per generation, inserted through the
    /// similarity-aware replacement policy.
    #[default]
    SteadyState,
    /// Whole-population refresh: keep `elite` best, refill from a selected
    /// reproduction pool.
    Generational {
        /// Number of lowest-cost individuals carried over unchanged.
        elite: usize,
    },
}

/// Configuration of a genetic search run.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::ga::{CrossoverKind, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_generations(200)
///     .with_crossover(CrossoverKind::Ox)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals kept in the population.
    pub population_size: usize,
    /// Exact number of generations to run.
    pub generations: usize,
    /// Probability of the mutation step in a generation.
    pub mutation_probability: f64,
    /// Relative cost difference under which two costs count as similar.
    pub diff_rate: f64,
    /// Parent selection operator.
    pub selection: SelectionKind,
    /// Crossover operator.
    pub crossover: CrossoverKind,
    /// Population update scheme.
    pub strategy: Strategy,
    /// Descend offspring and mutants to a local optimum.
    pub descent: bool,
    /// Evaluate descent neighborhoods on the rayon thread pool.
    pub parallel_descent: bool,
    /// Seed for the run's random stream; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 1000,
            mutation_probability: 0.1,
            diff_rate: 0.01,
            selection: SelectionKind::default(),
            crossover: CrossoverKind::default(),
            strategy: Strategy::default(),
            descent: true,
            parallel_descent: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the similarity threshold.
    pub fn with_diff_rate(mut self, rate: f64) -> Self {
        self.diff_rate = rate;
        self
    }

    /// Sets the selection operator.
    pub fn with_selection(mut self, selection: SelectionKind) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the population update scheme.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables local-search descent.
    pub fn with_descent(mut self, descent: bool) -> Self {
        self.descent = descent;
        self
    }

    /// Enables or disables the parallel neighborhood sweep.
    pub fn with_parallel_descent(mut self, parallel: bool) -> Self {
        self.parallel_descent = parallel;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<(), CvrpError> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if !is_probability(self.mutation_probability) {
            return Err(invalid("mutation_probability must lie in [0, 1]"));
        }
        if !(self.diff_rate.is_finite() && self.diff_rate >= 0.0) {
            return Err(invalid("diff_rate must be a non-negative number"));
        }
        if let SelectionKind::Tournament {
            size,
            win_probability,
        } = self.selection
        {
            if size == 0 {
                return Err(invalid("tournament size must be at least 1"));
            }
            if !is_probability(win_probability) {
                return Err(invalid("tournament win_probability must lie in [0, 1]"));
            }
        }
        if let Strategy::Generational { elite } = self.strategy {
            if elite == 0 || elite >= self.population_size {
                return Err(invalid(
                    "generational elite must be at least 1 and below population_size",
                ));
            }
        }
        Ok(())
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

fn invalid(msg: &str) -> CvrpError {
    CvrpError::InvalidConfig(msg.to_string())
}
