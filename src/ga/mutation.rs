//! Mutation operators on customer orders.
//!
//! Each operator flattens the individual, perturbs the permutation and
//! rebuilds routes through [`reconstruct`]. The input is never modified.
//! Degenerate draws (empty segment, reinsertion at the origin) are resampled,
//! and an individual with fewer than two customers comes back unchanged.

use rand::Rng;

use super::crossover::distinct_cuts;
use super::reconstruct::reconstruct;
use crate::models::{Individual, Problem};

/// Applies inversion or displacement with equal probability.
pub fn mutate<R: Rng>(individual: &Individual, rng: &mut R, problem: &Problem) -> Individual {
    if rng.random_bool(0.5) {
        inversion(individual, rng, problem)
    } else {
        displacement(individual, rng, problem)
    }
}

/// Inversion mutation: reverses the customers between two distinct
/// positions `i < j` (inclusive).
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::ga::{inversion, reconstruct};
/// use rand::SeedableRng;
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 1.0, 0.0, 1),
///         Location::new(2, 2.0, 0.0, 1),
///     ],
///     10,
/// )
/// .unwrap();
/// let ind = reconstruct(&[1, 2], &problem);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// // With two customers the only segment is the whole order.
/// assert_eq!(inversion(&ind, &mut rng, &problem).customer_order(), vec![2, 1]);
/// ```
pub fn inversion<R: Rng>(individual: &Individual, rng: &mut R, problem: &Problem) -> Individual {
    let mut order = individual.customer_order();
    if order.len() < 2 {
        return individual.clone();
    }
    let (i, j) = distinct_cuts(order.len(), rng);
    order[i..=j].reverse();
    reconstruct(&order, problem)
}

/// Displacement mutation: cuts out the segment `[i..=j]` and reinserts it
/// elsewhere.
///
/// The segment may be a single customer but never the whole order; the
/// insertion point, counted in the order with the segment removed, always
/// differs from where the segment came from.
pub fn displacement<R: Rng>(individual: &Individual, rng: &mut R, problem: &Problem) -> Individual {
    let order = individual.customer_order();
    let n = order.len();
    if n < 2 {
        return individual.clone();
    }

    let (i, j) = loop {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        let (i, j) = (a.min(b), a.max(b));
        if j - i + 1 < n {
            break (i, j);
        }
    };

    let segment = &order[i..=j];
    let mut rest: Vec<usize> = order[..i].iter().chain(&order[j + 1..]).copied().collect();
    let at = loop {
        let at = rng.random_range(0..=rest.len());
        if at != i {
            break at;
        }
    };
    rest.splice(at..at, segment.iter().copied());
    reconstruct(&rest, problem)
}
