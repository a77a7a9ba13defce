//! Steepest descent over the 2-opt and tail-exchange neighborhood.
//!
//! # Algorithm
//!
//! One sweep visits every route pair `(a, b)` with `a ≤ b` in ascending
//! order: `a == b` proposes 2-opt moves inside route `a`, `a < b` proposes
//! tail exchanges between routes `a` and `b`. The sweep keeps the move with
//! the lowest cost, accepting only strict improvements of more than `1e-10`;
//! among equal costs the first one found wins. [`descent`] repeats sweeps
//! until none improves.
//!
//! The neighborhood is finite and every accepted move lowers the cost by a
//! positive amount, so descent always terminates.
//!
//! With `parallel` set the route pairs are scored on the rayon pool. Per-pair
//! results are collected in pair order and reduced sequentially, so the chosen
//! neighbor is the same either way.

use rayon::prelude::*;
use tracing::trace;

use super::exchange::{apply_exchange, best_exchange};
use super::two_opt::{apply_two_opt, best_two_opt};
use crate::evaluation::objective;
use crate::models::{Individual, Problem};

const IMPROVEMENT_EPS: f64 = 1e-10;

/// A neighborhood move on an individual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    /// Reverse `route[from..=to]` of one vehicle.
    TwoOpt {
        /// Vehicle index.
        route: usize,
        /// First reversed position.
        from: usize,
        /// Last reversed position.
        to: usize,
    },
    /// Swap the tails after `from` in vehicle `a` and after `to` in vehicle `b`.
    Exchange {
        /// First vehicle index.
        a: usize,
        /// Second vehicle index (`a < b`).
        b: usize,
        /// Cut position in `a`.
        from: usize,
        /// Cut position in `b`.
        to: usize,
    },
}

/// Finds the best improving move and its distance change.
///
/// Returns `None` when no move improves by more than `1e-10`.
pub fn best_move(individual: &Individual, problem: &Problem, parallel: bool) -> Option<(Move, f64)> {
    let n = individual.num_vehicles();
    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|a| (a..n).map(move |b| (a, b))).collect();

    let scored: Vec<Option<(Move, f64)>> = if parallel {
        pairs
            .par_iter()
            .map(|&(a, b)| best_for_pair(individual, problem, a, b))
            .collect()
    } else {
        pairs
            .iter()
            .map(|&(a, b)| best_for_pair(individual, problem, a, b))
            .collect()
    };

    scored
        .into_iter()
        .flatten()
        .fold(None, |best: Option<(Move, f64)>, (mv, delta)| match best {
            Some((_, bd)) if bd <= delta => best,
            _ => Some((mv, delta)),
        })
}

fn best_for_pair(individual: &Individual, problem: &Problem, a: usize, b: usize) -> Option<(Move, f64)> {
    let vehicles = individual.vehicles();
    if a == b {
        best_two_opt(vehicles[a].route(), problem.distances(), -IMPROVEMENT_EPS)
            .map(|(from, to, delta)| (Move::TwoOpt { route: a, from, to }, delta))
    } else {
        best_exchange(&vehicles[a], &vehicles[b], problem, -IMPROVEMENT_EPS)
            .map(|(from, to, delta)| (Move::Exchange { a, b, from, to }, delta))
    }
}

/// Applies `mv` to a copy of `individual`.
///
/// Returns `None` if the move would break capacity.
pub fn apply_move(individual: &Individual, mv: Move, problem: &Problem) -> Option<Individual> {
    let mut out = individual.clone();
    match mv {
        Move::TwoOpt { route, from, to } => {
            let v = apply_two_opt(&individual.vehicles()[route], from, to, problem);
            out.set_vehicle(route, v);
        }
        Move::Exchange { a, b, from, to } => {
            let vehicles = individual.vehicles();
            let (va, vb) = apply_exchange(&vehicles[a], &vehicles[b], from, to, problem)?;
            out.set_vehicle(a, va);
            out.set_vehicle(b, vb);
        }
    }
    Some(out)
}

/// Returns the best strictly improving neighbor and its cost, or `None` at a
/// local optimum.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::evaluation::objective;
/// use cvrp_genetic::ga::reconstruct;
/// use cvrp_genetic::local_search::best_neighbor;
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 0.0, 10.0, 1),
///         Location::new(2, 10.0, 10.0, 1),
///         Location::new(3, 10.0, 0.0, 1),
///     ],
///     10,
/// )
/// .unwrap();
/// let crossed = reconstruct(&[2, 1, 3], &problem);
/// let (better, cost) = best_neighbor(&crossed, &problem, false).unwrap();
/// assert!(cost < objective(&crossed, problem.distances()));
/// assert!(best_neighbor(&better, &problem, false).is_none());
/// ```
pub fn best_neighbor(
    individual: &Individual,
    problem: &Problem,
    parallel: bool,
) -> Option<(Individual, f64)> {
    let (mv, _) = best_move(individual, problem, parallel)?;
    let neighbor = apply_move(individual, mv, problem)?;
    let cost = objective(&neighbor, problem.distances());
    Some((neighbor, cost))
}

/// Steepest descent to a local optimum.
///
/// The input is not modified; the returned individual costs no more than it.
pub fn descent(individual: &Individual, problem: &Problem, parallel: bool) -> Individual {
    let mut current = individual.clone();
    let mut sweeps = 0usize;
    while let Some((neighbor, cost)) = best_neighbor(&current, problem, parallel) {
        sweeps += 1;
        trace!(sweeps, cost, "descent step");
        current = neighbor;
    }
    current
}
