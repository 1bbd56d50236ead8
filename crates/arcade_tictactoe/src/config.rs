//! Tic-tac-toe session configuration.

use super::{AiStrength, Mark};
use arcade_core::{Difficulty, GameError};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Construction parameters for a [`TicTacToeEngine`](crate::TicTacToeEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct TicTacToeConfig {
    /// Difficulty: score weight and default AI strength.
    #[serde(default)]
    difficulty: Difficulty,
    /// Explicit AI strength overriding the difficulty preset.
    #[serde(default)]
    ai_strength: Option<f64>,
    /// Mark played by the human; X moves first.
    #[serde(default = "default_player_mark")]
    player_mark: Mark,
}

fn default_player_mark() -> Mark {
    Mark::X
}

impl TicTacToeConfig {
    /// Config for a difficulty level with the human playing X.
    #[instrument]
    pub fn preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ai_strength: None,
            player_mark: default_player_mark(),
        }
    }

    /// Effective AI strength.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the explicit strength is outside `[0, 1]`.
    #[instrument]
    pub fn strength(&self) -> Result<AiStrength, GameError> {
        match self.ai_strength {
            Some(p) => AiStrength::new(p),
            None => AiStrength::new(match self.difficulty {
                Difficulty::Easy => 0.3,
                Difficulty::Medium => 0.7,
                Difficulty::Hard | Difficulty::Expert => 1.0,
            }),
        }
    }
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self::preset(Difficulty::default())
    }
}
