//! Difficulty levels and game identifiers.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Difficulty level selected at session start.
///
/// Each game maps a level onto its own parameters (range, grid size, AI
/// strength); the level's [`weight`](Difficulty::weight) scales the score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Gentle settings.
    Easy,
    /// Default settings.
    #[default]
    Medium,
    /// Tight settings.
    Hard,
    /// Tightest settings.
    Expert,
}

impl Difficulty {
    /// Score multiplier for this level (1-4).
    #[instrument]
    pub fn weight(self) -> u64 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Expert => 4,
        }
    }
}

/// The four game variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameKind {
    /// Number guessing.
    Guess,
    /// Tic-tac-toe against the minimax opponent.
    TicTacToe,
    /// Snake.
    Snake,
    /// Memory card matching.
    Memory,
}

impl GameKind {
    /// Display title of the game.
    #[instrument]
    pub fn title(self) -> &'static str {
        match self {
            Self::Guess => "Number Guessing",
            Self::TicTacToe => "Tic-Tac-Toe",
            Self::Snake => "Snake Game",
            Self::Memory => "Memory Card Game",
        }
    }
}
