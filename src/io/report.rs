//! CSV run reports.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error::CvrpError;
use crate::models::Individual;

/// Writes `generation,best_cost` rows, one per history entry.
pub fn write_history(path: impl AsRef<Path>, history: &BTreeMap<usize, f64>) -> Result<(), CvrpError> {
    write_history_to(std::fs::File::create(path)?, history)
}

/// Writes the history to any byte sink.
pub fn write_history_to<W: Write>(sink: W, history: &BTreeMap<usize, f64>) -> Result<(), CvrpError> {
    let mut wtr = Writer::from_writer(sink);
    wtr.write_record(["generation", "best_cost"])?;
    for (generation, cost) in history {
        wtr.write_record([generation.to_string(), cost.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `vehicle,position,location_id` rows for every stop, depot visits
/// included. Vehicles are numbered from 1.
pub fn write_routes(path: impl AsRef<Path>, individual: &Individual) -> Result<(), CvrpError> {
    write_routes_to(std::fs::File::create(path)?, individual)
}

/// Writes the routes to any byte sink.
pub fn write_routes_to<W: Write>(sink: W, individual: &Individual) -> Result<(), CvrpError> {
    let mut wtr = Writer::from_writer(sink);
    wtr.write_record(["vehicle", "position", "location_id"])?;
    for (v, vehicle) in individual.vehicles().iter().enumerate() {
        for (pos, id) in vehicle.route().iter().enumerate() {
            wtr.write_record([(v + 1).to_string(), pos.to_string(), id.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
