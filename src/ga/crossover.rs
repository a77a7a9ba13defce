//! Crossover operators on customer orders.
//!
//! Both operators flatten the parents with [`Individual::customer_order`],
//! recombine the permutations and rebuild routes with [`reconstruct`], so
//! children always cover every customer exactly once and respect capacity.
//!
//! # Operators
//!
//! - [`hgrex`]: heuristic greedy edge recombination, one child
//! - [`ox`]: order crossover, two children
//!
//! # References
//!
//! Grefenstette (1987), "Incorporating problem specific knowledge into
//! genetic algorithms"; Davis (1985), "Applying adaptive algorithms to
//! epistatic domains".

use rand::Rng;

use super::reconstruct::reconstruct;
use crate::models::{Individual, Problem};

/// Heuristic greedy edge crossover (HGreX).
///
/// # Algorithm
///
/// Each parent order contributes one directed edge per customer (to its
/// successor). The child starts with parent 1's first two customers, then
/// repeatedly extends from the last placed customer along the cheaper of the
/// two parent edges whose head is still unplaced (parent 1 wins ties). When
/// both heads are already placed, the nearest unplaced customer by true
/// distance is taken instead (ties resolved by parent 1's order).
///
/// With fewer than two customers the child is parent 1's order.
///
/// # Complexity
///
/// O(n²) worst case, from the nearest-unplaced fallback.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::ga::{hgrex, reconstruct};
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 1.0, 0.0, 1),
///         Location::new(2, 2.0, 0.0, 1),
///         Location::new(3, 3.0, 0.0, 1),
///     ],
///     10,
/// )
/// .unwrap();
/// let p = reconstruct(&[3, 1, 2], &problem);
/// let child = hgrex(&p, &p, &problem);
/// assert_eq!(child.customer_order(), vec![3, 1, 2]);
/// ```
pub fn hgrex(parent1: &Individual, parent2: &Individual, problem: &Problem) -> Individual {
    let order1 = parent1.customer_order();
    let order2 = parent2.customer_order();
    let n = order1.len();
    if n < 2 {
        return reconstruct(&order1, problem);
    }

    let bound = problem.id_bound();
    let succ1 = successors(&order1, bound);
    let succ2 = successors(&order2, bound);
    let distances = problem.distances();

    let mut placed = vec![false; bound];
    let mut child = Vec::with_capacity(n);
    for &id in &order1[..2] {
        placed[id] = true;
        child.push(id);
    }

    while child.len() < n {
        let last = child[child.len() - 1];
        let heads = [succ1[last], succ2[last]];
        let next = heads
            .into_iter()
            .flatten()
            .filter(|&c| !placed[c])
            .fold(None::<(usize, f64)>, |best, c| {
                let d = distances.get(last, c);
                match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((c, d)),
                }
            })
            .map(|(c, _)| c)
            .or_else(|| {
                distances.nearest(last, order1.iter().copied().filter(|&c| !placed[c]))
            });

        match next {
            Some(c) => {
                placed[c] = true;
                child.push(c);
            }
            None => break,
        }
    }

    reconstruct(&child, problem)
}

/// Successor of each customer in `order`, indexed by id; the last has none.
fn successors(order: &[usize], bound: usize) -> Vec<Option<usize>> {
    let mut succ = vec![None; bound];
    for w in order.windows(2) {
        succ[w[0]] = Some(w[1]);
    }
    succ
}

/// Order crossover (OX).
///
/// Draws two distinct cut points `i < j` over the customer order. The first
/// child keeps `parent1[i..=j]` in place and fills the remaining positions
/// left to right with the genes of parent 2 in parent 2's order, skipping
/// genes already present. The second child is built the same way with the
/// parents swapped and the same cuts.
///
/// With fewer than two customers both children copy their first parent.
pub fn ox<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut R,
    problem: &Problem,
) -> (Individual, Individual) {
    let order1 = parent1.customer_order();
    let order2 = parent2.customer_order();
    let n = order1.len();
    if n < 2 {
        return (reconstruct(&order1, problem), reconstruct(&order2, problem));
    }

    let (i, j) = distinct_cuts(n, rng);
    let bound = problem.id_bound();
    let child1 = ox_child(&order1, &order2, i, j, bound);
    let child2 = ox_child(&order2, &order1, i, j, bound);
    (reconstruct(&child1, problem), reconstruct(&child2, problem))
}

/// Draws `i < j` in `0..n`, resampling while the two draws coincide.
pub(crate) fn distinct_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(n >= 2);
    loop {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a != b {
            return (a.min(b), a.max(b));
        }
    }
}

fn ox_child(keep: &[usize], fill: &[usize], i: usize, j: usize, bound: usize) -> Vec<usize> {
    let mut placed = vec![false; bound];
    for &id in &keep[i..=j] {
        placed[id] = true;
    }

    let mut donors = fill.iter().copied().filter(|&id| !placed[id]);
    let mut child = Vec::with_capacity(keep.len());
    for pos in 0..keep.len() {
        if (i..=j).contains(&pos) {
            child.push(keep[pos]);
        } else if let Some(id) = donors.next() {
            child.push(id);
        }
    }
    child
}
