//! Solution evaluation.
//!
//! - [`objective`] — total distance plus vehicle count
//! - [`validate`] — coverage, capacity, and depot-anchoring checks

mod objective;
mod validate;

pub use objective::{objective, route_distance};
pub use validate::{validate, Violation, ViolationType};
