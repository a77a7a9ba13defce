//! Parent selection operators.
//!
//! Both operators work on the population's cost vector and return the index
//! of the chosen member, so the caller decides whether to clone it.
//!
//! - [`tournament`] — k distinct contestants, noisy pairwise reduction
//! - [`roulette_wheel`] — probability proportional to 1/cost

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::index;
use rand::Rng;

use super::config::SelectionKind;

/// Selects a member index using the configured operator.
///
/// # Panics
///
/// Panics if `costs` is empty.
pub fn select<R: Rng>(kind: &SelectionKind, costs: &[f64], rng: &mut R) -> usize {
    match *kind {
        SelectionKind::Tournament {
            size,
            win_probability,
        } => tournament(costs, size, win_probability, rng),
        SelectionKind::RouletteWheel => roulette_wheel(costs, rng),
    }
}

/// Tournament selection.
///
/// Draws `min(size, costs.len())` distinct members uniformly, then reduces
/// them left to right: of the current champion and the next contestant, the
/// lower-cost one (the champion on ties) wins with probability
/// `win_probability`, otherwise the other one wins. The noise keeps weaker
/// members in play.
///
/// # Panics
///
/// Panics if `costs` is empty.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::ga::tournament;
/// use rand::SeedableRng;
///
/// let costs = [12.0, 7.5];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// // Deterministic tournament over the whole population picks the best.
/// assert_eq!(tournament(&costs, 2, 1.0, &mut rng), 1);
/// ```
pub fn tournament<R: Rng>(costs: &[f64], size: usize, win_probability: f64, rng: &mut R) -> usize {
    assert!(!costs.is_empty(), "tournament on an empty population");
    let k = size.clamp(1, costs.len());
    let drawn = index::sample(rng, costs.len(), k);

    let mut contestants = drawn.iter();
    let mut champion = contestants.next().unwrap_or(0);
    for challenger in contestants {
        let (better, worse) = if costs[challenger] < costs[champion] {
            (challenger, champion)
        } else {
            (champion, challenger)
        };
        champion = if rng.random_bool(win_probability) {
            better
        } else {
            worse
        };
    }
    champion
}

/// Roulette-wheel selection with weight 1/cost.
///
/// Costs are normalised over the whole population. If any cost is
/// non-positive, all costs are shifted so the smallest becomes 1 before
/// inverting. Non-finite costs get zero weight; if nothing has weight the
/// draw falls back to uniform.
///
/// # Panics
///
/// Panics if `costs` is empty.
pub fn roulette_wheel<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    assert!(!costs.is_empty(), "roulette wheel on an empty population");

    let min = costs
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(f64::INFINITY, f64::min);
    let shift = if min.is_finite() && min <= 0.0 {
        1.0 - min
    } else {
        0.0
    };

    let weights: Vec<f64> = costs
        .iter()
        .map(|&c| {
            let shifted = c + shift;
            if shifted.is_finite() && shifted > 0.0 {
                1.0 / shifted
            } else {
                0.0
            }
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.random_range(0..costs.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tournament_deterministic_pair_picks_lower() {
        let costs = [30.0, 10.0, 20.0, 40.0];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let chosen = tournament(&costs, 2, 1.0, &mut rng);
            // Whatever pair was drawn, the winner is never the worse of it,
            // so the global worst can never win.
            assert_ne!(chosen, 3);
        }
    }

    #[test]
    fn test_tournament_whole_population_deterministic() {
        let costs = [30.0, 10.0, 20.0];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(tournament(&costs, 3, 1.0, &mut rng), 1);
        }
    }

    #[test]
    fn test_tournament_two_members_p1_matches_min() {
        let costs = [5.0, 4.0];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(tournament(&costs, 2, 1.0, &mut rng), 1);
        }
    }

    #[test]
    fn test_tournament_p0_picks_worse() {
        let costs = [5.0, 4.0];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(tournament(&costs, 2, 0.0, &mut rng), 0);
        }
    }

    #[test]
    fn test_tournament_size_clamped() {
        let costs = [1.0];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(tournament(&costs, 5, 0.85, &mut rng), 0);
    }

    #[test]
    fn test_roulette_prefers_cheaper() {
        let costs = [1.0, 100.0];
        let mut rng = StdRng::seed_from_u64(5);
        let hits = (0..1000)
            .filter(|_| roulette_wheel(&costs, &mut rng) == 0)
            .count();
        // Expected share is 100/101.
        assert!(hits > 950);
    }

    #[test]
    fn test_roulette_handles_non_positive_costs() {
        let costs = [-5.0, 0.0, 10.0];
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            counts[roulette_wheel(&costs, &mut rng)] += 1;
        }
        // Shifted costs 1, 6, 16 → the most negative cost is the favourite.
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
    }

    #[test]
    fn test_roulette_all_infinite_falls_back_to_uniform() {
        let costs = [f64::INFINITY, f64::INFINITY];
        let mut rng = StdRng::seed_from_u64(1);
        let idx = roulette_wheel(&costs, &mut rng);
        assert!(idx < 2);
    }

    #[test]
    fn test_select_dispatch() {
        let costs = [3.0, 1.0, 2.0];
        let mut rng = StdRng::seed_from_u64(8);
        let kind = SelectionKind::Tournament {
            size: 3,
            win_probability: 1.0,
        };
        assert_eq!(select(&kind, &costs, &mut rng), 1);
        assert!(select(&SelectionKind::RouletteWheel, &costs, &mut rng) < 3);
    }
}
