//! Reading instances and writing run reports.
//!
//! - [`read_locations`] — semicolon-delimited `id;x;y;demand` files
//! - [`write_history`] — best cost per improving generation
//! - [`write_routes`] — one row per stop of the best individual

mod locations;
mod report;

pub use locations::{read_locations, read_locations_from};
pub use report::{write_history, write_history_to, write_routes, write_routes_to};
