//! Structural checks for individuals.

use crate::models::{Individual, Problem, DEPOT};

/// A type of invariant violation in an individual.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the individual.
        route_index: usize,
        /// Summed demand on the route.
        load: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Route does not start and end at the depot.
    NotAnchored {
        /// Route index.
        route_index: usize,
    },
    /// Customer is not visited by any route.
    CustomerMissing {
        /// Customer ID.
        customer_id: usize,
    },
    /// Customer is visited more than once.
    CustomerRepeated {
        /// Customer ID.
        customer_id: usize,
        /// Number of visits found.
        visits: usize,
    },
    /// Route visits an ID that is not part of the problem.
    UnknownLocation {
        /// Route index.
        route_index: usize,
        /// Offending ID.
        location_id: usize,
    },
}

/// An invariant violation in an individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks coverage, capacity, and depot anchoring of an individual.
///
/// Loads are recomputed from the problem's demands rather than trusted from
/// the vehicles. An empty result means the individual is a valid solution.
///
/// # Examples
///
/// ```
/// use cvrp_genetic::models::{Location, Problem};
/// use cvrp_genetic::evaluation::validate;
/// use cvrp_genetic::ga::reconstruct;
///
/// let problem = Problem::new(
///     vec![
///         Location::depot(0.0, 0.0),
///         Location::new(1, 3.0, 4.0, 6),
///         Location::new(2, 6.0, 8.0, 6),
///     ],
///     10,
/// )
/// .unwrap();
/// let ind = reconstruct(&[2, 1], &problem);
/// assert!(validate(&ind, &problem).is_empty());
/// ```
pub fn validate(individual: &Individual, problem: &Problem) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut visits = vec![0usize; problem.id_bound()];

    for (idx, vehicle) in individual.vehicles().iter().enumerate() {
        if !vehicle.is_anchored() {
            violations.push(Violation::new(ViolationType::NotAnchored { route_index: idx }));
        }

        let mut load: u32 = 0;
        for &id in vehicle.route() {
            if id == DEPOT {
                continue;
            }
            if !problem.contains(id) {
                violations.push(Violation::new(ViolationType::UnknownLocation {
                    route_index: idx,
                    location_id: id,
                }));
                continue;
            }
            visits[id] += 1;
            load = load.saturating_add(problem.location(id).demand());
        }

        if load > problem.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: idx,
                load,
                capacity: problem.capacity(),
            }));
        }
    }

    for customer in problem.customers() {
        match visits[customer.id()] {
            0 => violations.push(Violation::new(ViolationType::CustomerMissing {
                customer_id: customer.id(),
            })),
            1 => {}
            n => violations.push(Violation::new(ViolationType::CustomerRepeated {
                customer_id: customer.id(),
                visits: n,
            })),
        }
    }

    violations
}
