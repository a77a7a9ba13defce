//! # cvrp-genetic
//!
//! Evolutionary search for the capacitated vehicle routing problem (CVRP):
//! a population of route plans improved by selection, crossover, mutation
//! and steepest-descent local search.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, Vehicle, Individual, Problem)
//! - [`distance`] — Distance table indexed by location ID
//! - [`evaluation`] — Objective function and solution validation
//! - [`ga`] — Route builder, genetic operators, population and search loop
//! - [`local_search`] — 2-opt, tail exchange and steepest descent
//! - [`io`] — Location file reader and CSV report writers
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use cvrp_genetic::models::{Location, Problem};
//! use cvrp_genetic::ga::{GaConfig, GaRunner};
//!
//! let problem = Problem::new(
//!     vec![
//!         Location::depot(0.0, 0.0),
//!         Location::new(1, 4.0, 1.0, 3),
//!         Location::new(2, -2.0, 5.0, 4),
//!         Location::new(3, 1.0, -6.0, 2),
//!     ],
//!     6,
//! )?;
//! let config = GaConfig::default().with_generations(20).with_seed(1);
//! let result = GaRunner::run(&problem, &config)?;
//! println!("{}", result.best.describe(problem.distances()));
//! # Ok::<(), cvrp_genetic::CvrpError>(())
//! ```

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod local_search;
pub mod models;

pub use error::CvrpError;
