//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Given depot-anchored routes A (size `sa`) and B (size `sb`), cutting A
//! after position `from` and B after position `to` and swapping the tails
//! gives:
//!
//! ```text
//! A' = A[..=from] + B[to+1..]
//! B' = B[..=to]   + A[from+1..]
//! ```
//!
//! Candidate cuts are `from ∈ [1, sa-2]`; `to ∈ [0, sb-2]`, narrowed to
//! `[1, sb-3]` when `from = sa-2` so B' never collapses to a bare depot round
//! trip. Moves where either new route overflows the capacity are skipped.
//! Only the two cut edges change, so the distance change is
//!
//! ```text
//! delta = d(A[from], B[to+1]) + d(B[to], A[from+1]) - d(A[from], A[from+1]) - d(B[to], B[to+1])
//! ```
//!
//! # Complexity
//!
//! O(sa × sb) per route pair.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::models::{Problem, Vehicle};

/// Finds the best improving tail exchange between two vehicles.
///
/// Returns `(from, to, delta)` for the first feasible move with the lowest
/// delta below `threshold`. Pairs whose combined load exceeds twice the
/// capacity are not searched.
pub fn best_exchange(
    a: &Vehicle,
    b: &Vehicle,
    problem: &Problem,
    threshold: f64,
) -> Option<(usize, usize, f64)> {
    let capacity = problem.capacity();
    if a.load() + b.load() > capacity.saturating_mul(2) {
        return None;
    }

    let ra = a.route();
    let rb = b.route();
    let (sa, sb) = (ra.len(), rb.len());
    if sa < 3 || sb < 2 {
        return None;
    }

    let prefix_a = prefix_loads(ra, problem);
    let prefix_b = prefix_loads(rb, problem);
    let (load_a, load_b) = (prefix_a[sa - 1], prefix_b[sb - 1]);
    let distances = problem.distances();

    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_delta = threshold;

    for from in 1..=sa - 2 {
        let to_range = if from == sa - 2 {
            1..sb.saturating_sub(2)
        } else {
            0..sb - 1
        };
        for to in to_range {
            let new_a = prefix_a[from] + (load_b - prefix_b[to]);
            let new_b = prefix_b[to] + (load_a - prefix_a[from]);
            if new_a > capacity || new_b > capacity {
                continue;
            }
            let delta = distances.get(ra[from], rb[to + 1]) + distances.get(rb[to], ra[from + 1])
                - distances.get(ra[from], ra[from + 1])
                - distances.get(rb[to], rb[to + 1]);
            if delta < best_delta {
                best_delta = delta;
                best = Some((from, to, delta));
            }
        }
    }
    best
}

/// Builds the two vehicles produced by exchanging tails after `from` in `a`
/// and `to` in `b`.
///
/// Returns `None` if either new route would exceed the capacity.
pub fn apply_exchange(
    a: &Vehicle,
    b: &Vehicle,
    from: usize,
    to: usize,
    problem: &Problem,
) -> Option<(Vehicle, Vehicle)> {
    let (ra, rb) = (a.route(), b.route());
    let new_a = build(ra[..=from].iter().chain(&rb[to + 1..]), problem)?;
    let new_b = build(rb[..=to].iter().chain(&ra[from + 1..]), problem)?;
    Some((new_a, new_b))
}

fn build<'a>(ids: impl Iterator<Item = &'a usize>, problem: &Problem) -> Option<Vehicle> {
    let mut v = Vehicle::new(problem.capacity());
    for &id in ids {
        if !v.try_route(problem.location(id)) {
            return None;
        }
    }
    Some(v)
}

/// `prefix[k]` = total demand of `route[..=k]`.
fn prefix_loads(route: &[usize], problem: &Problem) -> Vec<u32> {
    route
        .iter()
        .scan(0u32, |acc, &id| {
            *acc += problem.location(id).demand();
            Some(*acc)
        })
        .collect()
}
