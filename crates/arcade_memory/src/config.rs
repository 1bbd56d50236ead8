//! Memory game configuration and difficulty presets.

use arcade_core::{Difficulty, GameError};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Accepted grid sides.
pub const GRID_SIDES: [usize; 3] = [4, 6, 8];

/// Construction parameters for a [`MemoryEngine`](crate::MemoryEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct MemoryConfig {
    /// Cards per row and column.
    side: usize,
    /// Seconds allowed before the session is lost; `None` for no limit.
    #[serde(default)]
    time_limit_secs: Option<u64>,
    /// Difficulty used for score weighting.
    #[serde(default)]
    difficulty: Difficulty,
}

impl MemoryConfig {
    /// Grid side and time limit for a difficulty level.
    #[instrument]
    pub fn preset(difficulty: Difficulty) -> Self {
        let (side, secs) = match difficulty {
            Difficulty::Easy => (4, 120),
            Difficulty::Medium => (6, 180),
            Difficulty::Hard => (8, 240),
            Difficulty::Expert => (8, 180),
        };
        Self {
            side,
            time_limit_secs: Some(secs),
            difficulty,
        }
    }

    /// Checks the grid side and limit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the side is not one of [`GRID_SIDES`] or the
    /// time limit is zero.
    #[instrument]
    pub fn validate(&self) -> Result<(), GameError> {
        if !GRID_SIDES.contains(&self.side) {
            return Err(GameError::invalid_config(format!(
                "grid side {} not one of {GRID_SIDES:?}",
                self.side
            )));
        }
        if self.time_limit_secs == Some(0) {
            return Err(GameError::invalid_config("time limit must be positive"));
        }
        debug!("Memory config valid");
        Ok(())
    }

    /// Number of cards.
    pub fn cells(&self) -> usize {
        self.side * self.side
    }

    /// Number of pairs.
    pub fn pairs(&self) -> usize {
        self.cells() / 2
    }

    /// Time limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::preset(Difficulty::Easy)
    }
}
