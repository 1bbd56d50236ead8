//! Arcade core - shared contracts for the arcade game engines.
//!
//! - **Score model**: pure functions from session metrics to a [`ScoreRecord`]
//! - **Session contract**: the lifecycle every engine implements
//! - **Errors**: [`GameError`] with recoverable kinds
//! - **Randomness**: the injected, seeded [`GameRng`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod error;
pub mod invariant;
mod outcome;
mod rng;
pub mod score;
mod session;

pub use difficulty::{Difficulty, GameKind};
pub use error::{GameError, GameErrorKind};
pub use invariant::{Invariant, InvariantSet, InvariantViolation};
pub use outcome::Outcome;
pub use rng::GameRng;
pub use score::{Metrics, Quality, ScoreRecord, Seat, score};
pub use session::{SessionContract, ensure_active, ensure_finished};
