//! Location file reader.
//!
//! Format: one header line, then one row per location, fields separated by
//! `;`:
//!
//! ```text
//! id;x;y;demand
//! 0;50;50;0
//! 1;12;83;7
//! ```
//!
//! Blank lines are skipped and surrounding whitespace is trimmed. Coordinates
//! may be integers or decimals.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::CvrpError;
use crate::models::Location;

/// Reads locations from a file.
pub fn read_locations(path: impl AsRef<Path>) -> Result<Vec<Location>, CvrpError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let locations = read_locations_from(file)?;
    debug!(path = %path.display(), count = locations.len(), "locations read");
    Ok(locations)
}

/// Reads locations from any byte source.
pub fn read_locations_from<R: Read>(reader: R) -> Result<Vec<Location>, CvrpError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut locations = Vec::new();
    for row in reader.deserialize() {
        let (id, x, y, demand): (usize, f64, f64, u32) = row?;
        locations.push(Location::new(id, x, y, demand));
    }
    Ok(locations)
}
