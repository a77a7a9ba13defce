//! Distance table.
//!
//! Provides the dense, ID-indexed distance matrix shared read-only by the
//! objective function and every search operator.

mod matrix;

pub use matrix::DistanceMatrix;
