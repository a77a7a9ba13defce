//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the core abstractions: locations with demands, vehicles that
//! carry one depot-anchored route each, individuals (candidate solutions),
//! and the validated problem instance that ties everything together.

mod individual;
mod location;
mod problem;
mod vehicle;

pub use individual::Individual;
pub use location::{Location, DEPOT};
pub use problem::Problem;
pub use vehicle::Vehicle;
