//! Intra-route 2-opt move.
//!
//! # Algorithm
//!
//! On a depot-anchored route `r` of size `s`, reversing the customer segment
//! `r[from..=to]` replaces edges `(r[from-1], r[from])` and `(r[to], r[to+1])`:
//!
//! ```text
//! delta = d(r[from-1], r[to]) + d(r[from], r[to+1]) - d(r[from-1], r[from]) - d(r[to], r[to+1])
//! ```
//!
//! Candidate positions are `from ∈ [1, s-3]`, `to ∈ [from+1, s-2]`, except
//! that `to` stops at `s-3` when `from = 1`, so a whole-route reversal (which
//! leaves the cost unchanged on a symmetric table) is never proposed.
//!
//! # Complexity
//!
//! O(s²) per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::models::{Problem, Vehicle};

/// Finds the best improving 2-opt move on one route.
///
/// Returns `(from, to, delta)` for the first move with the lowest delta below
/// `threshold`, or `None` if no move gets there.
pub fn best_two_opt(
    route: &[usize],
    distances: &DistanceMatrix,
    threshold: f64,
) -> Option<(usize, usize, f64)> {
    let s = route.len();
    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_delta = threshold;

    for from in 1..s.saturating_sub(2) {
        let last = if from == 1 { s - 3 } else { s - 2 };
        for to in from + 1..=last {
            let delta = two_opt_delta(route, distances, from, to);
            if delta < best_delta {
                best_delta = delta;
                best = Some((from, to, delta));
            }
        }
    }
    best
}

/// Distance change from reversing `route[from..=to]`.
pub fn two_opt_delta(route: &[usize], distances: &DistanceMatrix, from: usize, to: usize) -> f64 {
    let before = route[from - 1];
    let after = route[to + 1];
    let old_cost = distances.get(before, route[from]) + distances.get(route[to], after);
    let new_cost = distances.get(before, route[to]) + distances.get(route[from], after);
    new_cost - old_cost
}

/// Builds the vehicle obtained by reversing `route[from..=to]`.
///
/// The load is unchanged, so the result is always feasible.
pub fn apply_two_opt(vehicle: &Vehicle, from: usize, to: usize, problem: &Problem) -> Vehicle {
    let mut route = vehicle.route().to_vec();
    route[from..=to].reverse();
    let mut out = Vehicle::new(problem.capacity());
    for id in route {
        let routed = out.try_route(problem.location(id));
        debug_assert!(routed, "reversal of a feasible route overflowed at {id}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::route_distance;
    use crate::models::Location;

    fn square() -> Problem {
        Problem::new(
            vec![
                Location::depot(0.0, 0.0),
                Location::new(1, 0.0, 10.0, 1),
                Location::new(2, 10.0, 10.0, 1),
                Location::new(3, 10.0, 0.0, 1),
            ],
            10,
        )
        .expect("valid")
    }

    fn vehicle(problem: &Problem, route: &[usize]) -> Vehicle {
        let mut v = Vehicle::new(problem.capacity());
        for &id in route {
            assert!(v.try_route(problem.location(id)));
        }
        v
    }

    #[test]
    fn test_delta_matches_recomputed_distance() {
        let p = square();
        let route = [0, 2, 1, 3, 0];
        let (from, to) = (1, 2);
        let delta = two_opt_delta(&route, p.distances(), from, to);
        let moved = apply_two_opt(&vehicle(&p, &route), from, to, &p);
        let diff = route_distance(moved.route(), p.distances()) - route_distance(&route, p.distances());
        assert!((delta - diff).abs() < 1e-10);
    }

    #[test]
    fn test_best_two_opt_fixes_crossing() {
        let p = square();
        // 0 → 2 → 1 → 3 → 0 crosses itself.
        let route = [0, 2, 1, 3, 0];
        let (from, to, delta) = best_two_opt(&route, p.distances(), -1e-10).expect("improving");
        assert!(delta < 0.0);
        let moved = apply_two_opt(&vehicle(&p, &route), from, to, &p);
        assert!((route_distance(moved.route(), p.distances()) - 40.0).abs() < 1e-10);
        assert_eq!(moved.load(), 3);
    }

    #[test]
    fn test_no_move_on_optimal_route() {
        let p = square();
        assert!(best_two_opt(&[0, 1, 2, 3, 0], p.distances(), -1e-10).is_none());
    }

    #[test]
    fn test_short_routes_have_no_moves() {
        let p = square();
        assert!(best_two_opt(&[0, 0], p.distances(), f64::INFINITY).is_none());
        assert!(best_two_opt(&[0, 1, 0], p.distances(), f64::INFINITY).is_none());
        // Two customers: the only segment is the whole route.
        assert!(best_two_opt(&[0, 1, 2, 0], p.distances(), f64::INFINITY).is_none());
    }

    #[test]
    fn test_range_excludes_whole_reversal() {
        let p = square();
        let route = [0, 1, 2, 3, 0];
        // With an infinite threshold every candidate qualifies; the first one wins
        // unless a later one is strictly lower.
        let (from, to, _) = best_two_opt(&route, p.distances(), f64::INFINITY).expect("some");
        assert!(!(from == 1 && to == 3));
    }

    #[test]
    fn test_apply_on_full_vehicle_keeps_every_stop() {
        let full = Problem::new(
            vec![
                Location::depot(0.0, 0.0),
                Location::new(1, 0.0, 10.0, 2),
                Location::new(2, 10.0, 10.0, 3),
                Location::new(3, 10.0, 0.0, 5),
            ],
            10,
        )
        .expect("valid");
        let v = vehicle(&full, &[0, 2, 1, 3, 0]);
        assert_eq!(v.load(), full.capacity());
        let moved = apply_two_opt(&v, 1, 2, &full);
        assert_eq!(moved.route(), &[0, 1, 2, 3, 0]);
        assert_eq!(moved.load(), full.capacity());
    }
}
