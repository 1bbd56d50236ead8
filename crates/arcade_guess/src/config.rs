//! Guess game configuration and difficulty presets.

use arcade_core::{Difficulty, GameError};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Construction parameters for a [`GuessEngine`](crate::GuessEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct GuessConfig {
    /// Smallest allowed guess.
    low: i64,
    /// Largest allowed guess.
    high: i64,
    /// Optional attempt cap; the session is lost when it runs out.
    #[serde(default)]
    max_attempts: Option<u32>,
    /// Difficulty used for score weighting.
    #[serde(default)]
    difficulty: Difficulty,
}

impl GuessConfig {
    /// Range and attempt cap for a difficulty level.
    #[instrument]
    pub fn preset(difficulty: Difficulty) -> Self {
        let (high, cap) = match difficulty {
            Difficulty::Easy => (50, 10),
            Difficulty::Medium => (100, 8),
            Difficulty::Hard => (200, 6),
            Difficulty::Expert => (500, 5),
        };
        Self {
            low: 1,
            high,
            max_attempts: Some(cap),
            difficulty,
        }
    }

    /// Checks the range and cap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `low >= high` or the cap is zero.
    #[instrument]
    pub fn validate(&self) -> Result<(), GameError> {
        if self.low >= self.high {
            return Err(GameError::invalid_config(format!(
                "range [{}, {}] must contain at least two numbers",
                self.low, self.high
            )));
        }
        if self.max_attempts == Some(0) {
            return Err(GameError::invalid_config("attempt cap must be positive"));
        }
        debug!("Guess config valid");
        Ok(())
    }

    /// Number of values in the range, saturating for the full `i64` domain.
    pub fn span(&self) -> u64 {
        self.high.abs_diff(self.low).saturating_add(1)
    }

    /// Attempts a bisecting player needs in the worst case.
    pub fn bisection_bound(&self) -> u32 {
        // ceil(log2(span)) from span - 1, which cannot overflow
        (u64::BITS - self.high.abs_diff(self.low).leading_zeros()) + 1
    }

    /// Attempt budget used by the score: the cap, or the bisection bound.
    pub fn budget(&self) -> u32 {
        self.max_attempts.unwrap_or_else(|| self.bisection_bound())
    }
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self::preset(Difficulty::default())
    }
}
