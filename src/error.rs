//! Error type shared by the library.

use thiserror::Error;

/// Errors raised while building a problem instance, validating a
/// configuration, or reading/writing data files.
///
/// Conditions that are part of normal search dynamics (no improving
/// neighbor, degenerate operator draws, no worse individual to replace)
/// are not errors and never appear here.
#[derive(Error, Debug)]
pub enum CvrpError {
    /// A single customer cannot fit in an empty vehicle.
    #[error("location {id} has demand {demand} exceeding vehicle capacity {capacity}")]
    InfeasibleDemand {
        /// Offending location ID.
        id: usize,
        /// Its demand.
        demand: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// No location with ID 0 was supplied.
    #[error("no depot (location id 0) in input")]
    MissingDepot,
    /// The depot was given a non-zero demand.
    #[error("depot must have zero demand, found {0}")]
    DepotDemand(u32),
    /// Two locations share an ID.
    #[error("duplicate location id {0}")]
    DuplicateLocation(usize),
    /// The instance has a depot but nothing to deliver.
    #[error("instance has no customers")]
    NoCustomers,
    /// An explicit distance table does not cover every location ID.
    #[error("distance table covers {size} ids but location id {id} is present")]
    DistanceTableTooSmall {
        /// Number of IDs covered by the table.
        size: usize,
        /// First uncovered location ID.
        id: usize,
    },
    /// An explicit distance table is not a symmetric table of finite,
    /// non-negative distances.
    #[error("invalid distance table: {0}")]
    InvalidDistanceTable(String),
    /// A location ID is too large for the ID-indexed tables.
    #[error("location id {id} is out of range for {count} locations (limit {limit})")]
    LocationIdOutOfRange {
        /// Offending location ID.
        id: usize,
        /// Number of locations supplied.
        count: usize,
        /// Exclusive upper bound on IDs.
        limit: usize,
    },
    /// A run parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Underlying file error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed delimited text or a failed CSV write.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
