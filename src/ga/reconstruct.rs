//! Route builder: greedy first-fit split of a customer order into routes.
//!
//! # Algorithm
//!
//! Walk the customer sequence in order, appending each customer to the
//! current vehicle. When a customer does not fit, the vehicle returns to the
//! depot and a fresh vehicle takes the customer. The last vehicle is closed
//! after the loop.
//!
//! The partition depends only on the order; it is never globally optimal.
//! Every operator that works on a flat permutation (initialisation, both
//! crossovers, both mutations) comes back through here, so the route
//! invariants (depot anchoring, capacity) hold by construction.
//!
//! # Complexity
//!
//! O(n) where n = number of customers.

use crate::models::{Individual, Problem, Vehicle};

/// Splits a customer order into capacity-feasible, depot-anchored vehicles.
///
/// Every single demand fits in an empty vehicle because [`Problem`] rejects
/// instances where it does not.
///
/// # Arguments
///
/// * `order` — Customer IDs in visiting order (depot excluded)
/// * `problem` — Instance supplying demands and capacity
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::ga::reconstruct;
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 1.0, 0.0, 3),
///         Location::new(2, 2.0, 0.0, 4),
///         Location::new(3, 3.0, 0.0, 2),
///         Location::new(4, 4.0, 0.0, 5),
///         Location::new(5, 5.0, 0.0, 1),
///     ],
///     10,
/// )
/// .unwrap();
///
/// let ind = reconstruct(&[1, 2, 3, 4, 5], &problem);
/// assert_eq!(ind.routes(), vec![vec![0, 1, 2, 3, 0], vec![0, 4, 5, 0]]);
/// ```
pub fn reconstruct(order: &[usize], problem: &Problem) -> Individual {
    let capacity = problem.capacity();
    let mut vehicles = Vec::new();
    let mut current = Vehicle::anchored(capacity);

    for &id in order {
        let location = problem.location(id);
        if !current.try_route(location) {
            current.close();
            vehicles.push(current);
            current = Vehicle::anchored(capacity);
            let routed = current.try_route(location);
            debug_assert!(routed, "demand of {id} exceeds capacity");
        }
    }

    current.close();
    vehicles.push(current);
    Individual::new(vehicles)
}
