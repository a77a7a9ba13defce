//! Objective function.
//!
//! ```text
//! cost = Σ_routes Σ_consecutive (a, b) d(a, b) + number of routes
//! ```
//!
//! The vehicle count term breaks ties in favour of fewer vehicles. Costs are
//! never cached on the individual; callers recompute after any change.

use crate::distance::DistanceMatrix;
use crate::models::Individual;

/// Computes the objective value of an individual (lower is better).
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::evaluation::objective;
/// use cvrp_genetic::ga::reconstruct;
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
/// // 0→1→2→0 = 4, plus one vehicle
/// assert!((objective(&ind, problem.distances()) - 5.0).abs() < 1e-10);
/// ```
pub fn objective(individual: &Individual, distances: &DistanceMatrix) -> f64 {
    let travelled: f64 = individual
        .vehicles()
        .iter()
        .map(|v| route_distance(v.route(), distances))
        .sum();
    travelled + individual.num_vehicles() as f64
}

/// Sums the distances between consecutive stops of a route.
///
/// Every edge counts, including a depot-to-depot edge.
pub fn route_distance(route: &[usize], distances: &DistanceMatrix) -> f64 {
    route.windows(2).map(|w| distances.get(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Vehicle};

    fn line() -> (Vec<Location>, DistanceMatrix) {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, 1.0, 0.0, 10),
            Location::new(2, 2.0, 0.0, 10),
            Location::new(3, 3.0, 0.0, 10),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        (locations, dm)
    }

    fn vehicle(locations: &[Location], ids: &[usize]) -> Vehicle {
        let mut v = Vehicle::anchored(100);
        for &id in ids {
            v.try_route(&locations[id]);
        }
        v.close();
        v
    }

    #[test]
    fn test_route_distance() {
        let (_, dm) = line();
        assert!((route_distance(&[0, 1, 2, 3, 0], &dm) - 6.0).abs() < 1e-10);
        assert_eq!(route_distance(&[0], &dm), 0.0);
        assert_eq!(route_distance(&[], &dm), 0.0);
    }

    #[test]
    fn test_objective_counts_vehicles() {
        let (locs, dm) = line();
        let one = Individual::new(vec![vehicle(&locs, &[1, 2, 3])]);
        let two = Individual::new(vec![vehicle(&locs, &[1]), vehicle(&locs, &[2, 3])]);
        // 6 + 1
        assert!((objective(&one, &dm) - 7.0).abs() < 1e-10);
        // (2) + (6) + 2
        assert!((objective(&two, &dm) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_objective_empty_route_still_counts() {
        let (locs, dm) = line();
        let ind = Individual::new(vec![vehicle(&locs, &[])]);
        // 0→0 contributes 0 distance but the vehicle counts
        assert!((objective(&ind, &dm) - 1.0).abs() < 1e-10);
    }
}
