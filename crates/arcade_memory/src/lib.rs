//! Memory cards for the arcade: find every pair on a square grid.
//!
//! An attempt is two reveals. A matching pair leaves play; a mismatch stays
//! face up until the next reveal or an explicit acknowledgement flips it
//! back. The time limit in [`MemoryConfig`] is enforced by the session layer
//! through [`SessionContract::expire`](arcade_core::SessionContract::expire).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod deck;
mod engine;
pub mod invariants;

pub use config::{GRID_SIDES, MemoryConfig};
pub use deck::{DECK, Symbol};
pub use engine::{
    Card, CardState, CardView, MemoryEngine, MemoryFeedback, MemoryIntent, MemoryView,
};
