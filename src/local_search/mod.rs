//! Local search for individuals.
//!
//! - [`two_opt`](best_two_opt) — intra-route segment reversal
//! - [`exchange`](best_exchange) — inter-route tail exchange (2-opt*)
//! - [`descent`] — steepest descent over both neighborhoods

mod descent;
mod exchange;
mod two_opt;

pub use descent::{apply_move, best_move, best_neighbor, descent, Move};
pub use exchange::{apply_exchange, best_exchange};
pub use two_opt::{apply_two_opt, best_two_opt, two_opt_delta};
