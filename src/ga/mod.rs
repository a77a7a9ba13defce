//! Evolutionary search for the CVRP.
//!
//! - [`reconstruct`] — greedy first-fit split of a customer order into routes
//! - [`tournament`], [`roulette_wheel`] — parent selection
//! - [`hgrex`], [`ox`] — crossover on customer orders
//! - [`inversion`], [`displacement`] — mutation on customer orders
//! - [`Population`] — member store with the similarity-aware replacement policy
//! - [`GaRunner`] — steady-state and generational search loops

mod config;
mod crossover;
mod mutation;
mod population;
pub mod reconstruct;
mod runner;
mod selection;

pub use config::{CrossoverKind, GaConfig, SelectionKind, Strategy};
pub use crossover::{hgrex, ox};
pub use mutation::{displacement, inversion, mutate};
pub use population::{similar, Population};
pub use reconstruct::reconstruct;
pub use runner::{GaResult, GaRunner};
pub use selection::{roulette_wheel, select, tournament};
