//! Snake for the arcade: an actor moving on a bounded grid.
//!
//! The actor grows when its head reaches the food, and the session ends when
//! the head leaves the grid, runs into the body, or the body fills the grid.
//! Food placement draws from the injected [`GameRng`](arcade_core::GameRng).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod grid;
pub mod invariants;

pub use config::{MAX_SIDE, MIN_SIDE, SnakeConfig};
pub use engine::{Crash, SnakeEngine, SnakeState, SnakeView, StepReport};
pub use grid::{Cell, Direction};
