//! Population manager and replacement policy.
//!
//! The population keeps each member next to its cost, so selection and
//! replacement never re-evaluate. Members are never modified in place: a slot
//! is overwritten with a new individual instead.
//!
//! # Replacement policy
//!
//! [`Population::add_considering_similarities`] limits how many members sit
//! within `diff_rate` of the best cost:
//!
//! 1. If the candidate is similar to the best cost, scan the members in slot
//!    order. The first near-best member the candidate strictly beats is
//!    replaced. If near-best members exist but none is beaten, the candidate
//!    is dropped.
//! 2. Otherwise a uniformly chosen member with strictly higher cost than the
//!    candidate is replaced. If there is none, the candidate is dropped.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::Individual;

/// Returns `true` if `a` and `b` differ by at most `rate` relative to the
/// smaller of the two.
///
/// Equal values are always similar.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::ga::similar;
///
/// assert!(similar(100.0, 100.5, 0.01));
/// assert!(!similar(100.0, 102.0, 0.01));
/// ```
pub fn similar(a: f64, b: f64, rate: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() / a.min(b) <= rate
}

/// A fixed-size set of individuals with best-so-far tracking.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    costs: Vec<f64>,
    best: Individual,
    best_cost: f64,
    history: BTreeMap<usize, f64>,
    diff_rate: f64,
}

impl Population {
    /// Builds a population from evaluated members.
    ///
    /// The lowest cost (first on ties) becomes the best and is recorded in the
    /// history under generation 0. Returns `None` if `members` is empty.
    pub fn new(members: Vec<(Individual, f64)>, diff_rate: f64) -> Option<Self> {
        let best_idx = members
            .iter()
            .enumerate()
            .fold(None::<usize>, |best, (i, (_, c))| match best {
                Some(b) if members[b].1 <= *c => Some(b),
                _ => Some(i),
            })?;
        let best = members[best_idx].0.clone();
        let best_cost = members[best_idx].1;
        let (individuals, costs) = members.into_iter().unzip();

        let mut history = BTreeMap::new();
        history.insert(0, best_cost);

        Some(Self {
            individuals,
            costs,
            best,
            best_cost,
            history,
            diff_rate,
        })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// Cost of the member at `index`.
    pub fn cost(&self, index: usize) -> f64 {
        self.costs[index]
    }

    /// Member costs in slot order.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Members in slot order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Best individual seen so far.
    pub fn best(&self) -> &Individual {
        &self.best
    }

    /// Cost of the best individual seen so far.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Best cost after each generation that improved it.
    pub fn history(&self) -> &BTreeMap<usize, f64> {
        &self.history
    }

    /// Similarity threshold used by the replacement policy.
    pub fn diff_rate(&self) -> f64 {
        self.diff_rate
    }

    /// Offers `candidate` to the population under the similarity rule.
    ///
    /// Returns `true` if the candidate replaced a member.
    pub fn add_considering_similarities<R: Rng>(
        &mut self,
        candidate: Individual,
        cost: f64,
        generation: usize,
        rng: &mut R,
    ) -> bool {
        if similar(self.best_cost, cost, self.diff_rate) {
            let mut has_similar = false;
            for idx in 0..self.len() {
                if !similar(self.best_cost, self.costs[idx], self.diff_rate) {
                    continue;
                }
                has_similar = true;
                if cost < self.costs[idx] {
                    self.replace(idx, candidate, cost, generation);
                    return true;
                }
            }
            if has_similar {
                return false;
            }
        }

        let worse: Vec<usize> = (0..self.len()).filter(|&i| cost < self.costs[i]).collect();
        match worse.choose(rng) {
            Some(&idx) => {
                self.replace(idx, candidate, cost, generation);
                true
            }
            None => false,
        }
    }

    /// Uniformly picks a slot whose cost differs from the best cost.
    ///
    /// Falls back to slot 0 when every member ties the best.
    pub fn random_not_best<R: Rng>(&self, rng: &mut R) -> usize {
        let others: Vec<usize> = (0..self.len())
            .filter(|&i| self.costs[i] != self.best_cost)
            .collect();
        others.choose(rng).copied().unwrap_or(0)
    }

    /// Overwrites slot `index` and updates the best-so-far.
    pub fn replace(&mut self, index: usize, individual: Individual, cost: f64, generation: usize) {
        if cost < self.best_cost {
            self.best = individual.clone();
            self.best_cost = cost;
            self.history.insert(generation, cost);
        }
        self.individuals[index] = individual;
        self.costs[index] = cost;
    }

    /// Replaces the whole membership, keeping best-so-far and history.
    ///
    /// Used by the generational scheme; the best member of the new set is
    /// compared against the best-so-far. Returns `false` and leaves the
    /// population unchanged if `members` is empty.
    pub fn reset(&mut self, members: Vec<(Individual, f64)>, generation: usize) -> bool {
        if members.is_empty() {
            return false;
        }
        let (individuals, costs): (Vec<Individual>, Vec<f64>) = members.into_iter().unzip();
        self.individuals = individuals;
        self.costs = costs;
        self.refresh_best(generation);
        true
    }

    /// Slot indices sorted by ascending cost (stable on ties).
    pub fn ranked(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.len()).collect();
        idx.sort_by(|&a, &b| self.costs[a].total_cmp(&self.costs[b]));
        idx
    }

    fn refresh_best(&mut self, generation: usize) {
        let Some(&top) = self.ranked().first() else {
            return;
        };
        if self.costs[top] < self.best_cost {
            self.best = self.individuals[top].clone();
            self.best_cost = self.costs[top];
            self.history.insert(generation, self.best_cost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::reconstruct;
    use crate::models::{Location, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn problem() -> Problem {
        Problem::new(
            vec![
                Location::depot(0.0, 0.0),
                Location::new(1, 1.0, 0.0, 1),
                Location::new(2, 2.0, 0.0, 1),
                Location::new(3, 3.0, 0.0, 1),
            ],
            10,
        )
        .expect("valid")
    }

    /// Distinguishable individuals; costs are assigned by the test.
    fn members(costs: &[f64]) -> Vec<(Individual, f64)> {
        let p = problem();
        let orders = [[1, 2, 3], [1, 3, 2], [2, 1, 3], [2, 3, 1], [3, 1, 2], [3, 2, 1]];
        costs
            .iter()
            .enumerate()
            .map(|(i, &c)| (reconstruct(&orders[i % orders.len()], &p), c))
            .collect()
    }

    fn marker() -> Individual {
        reconstruct(&[3, 2, 1], &problem())
    }

    #[test]
    fn test_similar() {
        assert!(similar(10.0, 10.0, 0.0));
        assert!(similar(100.0, 101.0, 0.01));
        assert!(similar(101.0, 100.0, 0.01));
        assert!(!similar(100.0, 101.5, 0.01));
    }

    #[test]
    fn test_new_tracks_best() {
        let pop = Population::new(members(&[30.0, 10.0, 20.0, 10.0]), 0.01).expect("non-empty");
        assert_eq!(pop.len(), 4);
        assert_eq!(pop.best_cost(), 10.0);
        assert_eq!(pop.best(), pop.get(1));
        assert_eq!(pop.history().get(&0), Some(&10.0));
        assert!(Population::new(Vec::new(), 0.01).is_none());
    }

    #[test]
    fn test_similar_candidate_replaces_first_beaten_near_best() {
        let mut pop = Population::new(members(&[50.0, 100.0, 100.5, 80.0]), 0.01).expect("ok");
        let mut rng = StdRng::seed_from_u64(0);
        let mut near = Population::new(members(&[100.0, 100.8, 130.0, 100.5]), 0.01).expect("ok");
        assert!(near.add_considering_similarities(marker(), 100.3, 1, &mut rng));
        // Slot 0 (100.0) is similar but not beaten; slot 1 (100.8) is beaten.
        assert_eq!(near.cost(1), 100.3);
        assert_eq!(near.cost(2), 130.0);
        assert_eq!(near.best_cost(), 100.0);

        // A far candidate goes through the worse-member path.
        assert!(pop.add_considering_similarities(marker(), 90.0, 1, &mut rng));
        assert!(pop.costs().contains(&90.0));
        assert_eq!(pop.cost(0), 50.0);
        assert_eq!(pop.cost(3), 80.0);
    }

    #[test]
    fn test_similar_candidate_dropped_when_no_near_best_beaten() {
        let mut pop = Population::new(members(&[100.0, 100.2, 200.0]), 0.01).expect("ok");
        let mut rng = StdRng::seed_from_u64(1);
        let before = pop.costs().to_vec();
        assert!(!pop.add_considering_similarities(marker(), 100.5, 1, &mut rng));
        assert_eq!(pop.costs(), &before[..]);
    }

    #[test]
    fn test_new_best_recorded_in_history() {
        let mut pop = Population::new(members(&[100.0, 150.0, 200.0]), 0.01).expect("ok");
        let mut rng = StdRng::seed_from_u64(2);
        assert!(pop.add_considering_similarities(marker(), 99.5, 7, &mut rng));
        assert_eq!(pop.cost(0), 99.5);
        assert_eq!(pop.best_cost(), 99.5);
        assert_eq!(pop.best(), &marker());
        assert_eq!(pop.history().get(&7), Some(&99.5));
    }

    #[test]
    fn test_no_worse_member_discards() {
        let mut pop = Population::new(members(&[10.0, 20.0]), 0.0).expect("ok");
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!pop.add_considering_similarities(marker(), 25.0, 1, &mut rng));
        assert!(!pop.add_considering_similarities(marker(), 20.0, 1, &mut rng));
        assert_eq!(pop.costs(), &[10.0, 20.0]);
    }

    #[test]
    fn test_random_not_best() {
        let pop = Population::new(members(&[10.0, 20.0, 10.0, 30.0]), 0.01).expect("ok");
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let idx = pop.random_not_best(&mut rng);
            assert!(idx == 1 || idx == 3);
        }

        let flat = Population::new(members(&[5.0, 5.0, 5.0]), 0.01).expect("ok");
        assert_eq!(flat.random_not_best(&mut rng), 0);
    }

    #[test]
    fn test_replace_is_unconditional() {
        let mut pop = Population::new(members(&[10.0, 20.0]), 0.01).expect("ok");
        pop.replace(1, marker(), 500.0, 3);
        assert_eq!(pop.cost(1), 500.0);
        assert_eq!(pop.best_cost(), 10.0);
        assert_eq!(pop.history().len(), 1);
    }

    #[test]
    fn test_reset_keeps_best_so_far() {
        let mut pop = Population::new(members(&[10.0, 20.0]), 0.01).expect("ok");
        assert!(pop.reset(members(&[15.0, 12.0]), 1));
        assert_eq!(pop.best_cost(), 10.0);
        assert!(pop.reset(members(&[15.0, 8.0]), 2));
        assert_eq!(pop.best_cost(), 8.0);
        assert_eq!(pop.history().get(&2), Some(&8.0));
        assert!(!pop.reset(Vec::new(), 3));
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_ranked() {
        let pop = Population::new(members(&[3.0, 1.0, 2.0, 1.0]), 0.01).expect("ok");
        assert_eq!(pop.ranked(), vec![1, 3, 2, 0]);
    }
}
