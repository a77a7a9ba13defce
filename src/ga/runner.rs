//! Search loop.
//!
//! # Steady state
//!
//! Each generation draws, in this order: parent 1, parent 2, the OX cut
//! points (OX only), the replacement draw for each child, the mutation coin,
//! then, if mutating, the target slot, the operator coin and the operator's
//! own indices. The same seed therefore always replays the same run.
//!
//! 1. Select two parents.
//! 2. Cross them (one HGreX child or two OX children).
//! 3. Optionally descend each child, then offer it through
//!    [`Population::add_considering_similarities`].
//! 4. With probability `mutation_probability`, mutate a member whose cost
//!    differs from the best, optionally descend, and overwrite that member.
//!
//! # Generational
//!
//! Each generation builds a reproduction pool by repeated selection, keeps
//! the `elite` cheapest members and refills the population from the pool by
//! mutation or crossover.
//!
//! Both schemes run exactly `generations` generations; there is no early
//! stop.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use super::config::{CrossoverKind, GaConfig, Strategy};
use super::crossover::{hgrex, ox};
use super::mutation::mutate;
use super::population::Population;
use super::reconstruct::reconstruct;
use super::selection::select;
use crate::error::CvrpError;
use crate::evaluation::{objective, validate};
use crate::local_search::descent;
use crate::models::{Individual, Problem};

/// Outcome of a search run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual found.
    pub best: Individual,
    /// Objective value of `best`.
    pub best_cost: f64,
    /// Best cost keyed by the generation that reached it; generation 0 is the
    /// initial population.
    pub history: BTreeMap<usize, f64>,
    /// Number of generations run.
    pub generations: usize,
}

impl GaResult {
    /// One-line description of the run.
    pub fn summary(&self, config: &GaConfig) -> String {
        format!(
            "final cost = {:.3}, vehicles = {}, individuals = {}, generations = {}, mutation probability = {}",
            self.best_cost,
            self.best.num_vehicles(),
            config.population_size,
            self.generations,
            config.mutation_probability,
        )
    }
}

/// Runs the genetic search.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::ga::{GaConfig, GaRunner};
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 1.0, 0.0, 4),
///         Location::new(2, 2.0, 1.0, 3),
///         Location::new(3, 0.0, 3.0, 5),
///         Location::new(4, -2.0, 1.0, 2),
///     ],
///     8,
/// )
/// .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(30)
///     .with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_cost.is_finite());
/// assert_eq!(result.best.num_customers(), 4);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs with a random stream seeded from `config.seed`, or from the OS
    /// when no seed is set.
    #[instrument(skip_all)]
    pub fn run(problem: &Problem, config: &GaConfig) -> Result<GaResult, CvrpError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-provided random stream; `config.seed` is ignored.
    #[instrument(skip_all)]
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, CvrpError> {
        config.validate()?;
        info!(
            customers = problem.num_customers(),
            capacity = problem.capacity(),
            population = config.population_size,
            generations = config.generations,
            strategy = ?config.strategy,
            crossover = ?config.crossover,
            "starting genetic search"
        );

        let mut population = initial_population(problem, config, rng)?;
        info!(initial_cost = population.best_cost(), "initial population built");

        for generation in 1..=config.generations {
            let before = population.best_cost();
            match config.strategy {
                Strategy::SteadyState => {
                    steady_state_generation(&mut population, generation, problem, config, rng)
                }
                Strategy::Generational { elite } => {
                    generational_generation(&mut population, elite, generation, problem, config, rng)
                }
            }
            if population.best_cost() < before {
                debug!(generation, best_cost = population.best_cost(), "new best");
            }
        }

        info!(
            best_cost = population.best_cost(),
            vehicles = population.best().num_vehicles(),
            improvements = population.history().len() - 1,
            "genetic search finished"
        );

        Ok(GaResult {
            best: population.best().clone(),
            best_cost: population.best_cost(),
            history: population.history().clone(),
            generations: config.generations,
        })
    }
}

/// Random feasible individuals from shuffled customer orders.
fn initial_population<R: Rng>(
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Population, CvrpError> {
    use rand::seq::SliceRandom;

    let mut order = problem.customer_ids();
    let members = (0..config.population_size)
        .map(|_| {
            order.shuffle(rng);
            let individual = reconstruct(&order, problem);
            let cost = objective(&individual, problem.distances());
            (individual, cost)
        })
        .collect();
    Population::new(members, config.diff_rate)
        .ok_or_else(|| CvrpError::InvalidConfig("population_size must be at least 1".into()))
}

fn improve(individual: Individual, problem: &Problem, config: &GaConfig) -> Individual {
    if config.descent {
        descent(&individual, problem, config.parallel_descent)
    } else {
        individual
    }
}

fn evaluated(individual: Individual, problem: &Problem, config: &GaConfig) -> (Individual, f64) {
    let individual = improve(individual, problem, config);
    debug_assert!(validate(&individual, problem).is_empty());
    let cost = objective(&individual, problem.distances());
    (individual, cost)
}

fn crossover<R: Rng>(
    p1: &Individual,
    p2: &Individual,
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<Individual> {
    match config.crossover {
        CrossoverKind::HGreX => vec![hgrex(p1, p2, problem)],
        CrossoverKind::Ox => {
            let (a, b) = ox(p1, p2, rng, problem);
            vec![a, b]
        }
    }
}

fn steady_state_generation<R: Rng>(
    population: &mut Population,
    generation: usize,
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) {
    let p1 = select(&config.selection, population.costs(), rng);
    let p2 = select(&config.selection, population.costs(), rng);
    let children = crossover(population.get(p1), population.get(p2), problem, config, rng);

    for child in children {
        let (child, cost) = evaluated(child, problem, config);
        population.add_considering_similarities(child, cost, generation, rng);
    }

    if rng.random_bool(config.mutation_probability) {
        let target = population.random_not_best(rng);
        let mutant = mutate(population.get(target), rng, problem);
        let (mutant, cost) = evaluated(mutant, problem, config);
        population.replace(target, mutant, cost, generation);
    }
}

fn generational_generation<R: Rng>(
    population: &mut Population,
    elite: usize,
    generation: usize,
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) {
    let size = population.len();
    let pool: Vec<usize> = (0..size)
        .map(|_| select(&config.selection, population.costs(), rng))
        .collect();

    let mut next: Vec<(Individual, f64)> = population
        .ranked()
        .into_iter()
        .take(elite)
        .map(|i| (population.get(i).clone(), population.cost(i)))
        .collect();

    while next.len() < size {
        let p1 = population.get(pool[rng.random_range(0..pool.len())]);
        if rng.random_bool(config.mutation_probability) {
            let mutant = mutate(p1, rng, problem);
            next.push(evaluated(mutant, problem, config));
        } else {
            let p2 = population.get(pool[rng.random_range(0..pool.len())]);
            for child in crossover(p1, p2, problem, config, rng) {
                if next.len() == size {
                    break;
                }
                next.push(evaluated(child, problem, config));
            }
        }
    }

    population.reset(next, generation);
    debug!(generation, best_cost = population.best_cost(), "population refreshed");
}
