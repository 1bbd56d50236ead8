//! Number guessing: a secret in a bounded range, found through hints.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;

pub use config::GuessConfig;
pub use engine::{GuessEngine, GuessView, Hint};
