//! Snake configuration and difficulty presets.

use arcade_core::{Difficulty, GameError};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest accepted grid side.
pub const MIN_SIDE: usize = 2;
/// Largest accepted grid side.
pub const MAX_SIDE: usize = 128;

/// Construction parameters for a [`SnakeEngine`](crate::SnakeEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct SnakeConfig {
    /// Columns.
    width: usize,
    /// Rows.
    height: usize,
    /// Foods eaten per level increase.
    #[serde(default = "default_foods_per_level")]
    foods_per_level: u32,
    /// Difficulty used for score weighting.
    #[serde(default)]
    difficulty: Difficulty,
}

fn default_foods_per_level() -> u32 {
    5
}

impl SnakeConfig {
    /// Grid size for a difficulty level; harder means less room.
    #[instrument]
    pub fn preset(difficulty: Difficulty) -> Self {
        let (width, height) = match difficulty {
            Difficulty::Easy => (20, 10),
            Difficulty::Medium => (16, 8),
            Difficulty::Hard => (12, 6),
            Difficulty::Expert => (10, 5),
        };
        Self {
            width,
            height,
            foods_per_level: default_foods_per_level(),
            difficulty,
        }
    }

    /// Checks grid extent and level pacing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a side outside `[MIN_SIDE, MAX_SIDE]` or
    /// zero foods per level.
    #[instrument]
    pub fn validate(&self) -> Result<(), GameError> {
        for (name, side) in [("width", self.width), ("height", self.height)] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(GameError::invalid_config(format!(
                    "{name} {side} outside [{MIN_SIDE}, {MAX_SIDE}]"
                )));
            }
        }
        if self.foods_per_level == 0 {
            return Err(GameError::invalid_config("foods per level must be positive"));
        }
        debug!("Snake config valid");
        Ok(())
    }

    /// Number of cells on the grid.
    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self::preset(Difficulty::Easy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_grid() {
        let config = SnakeConfig::default();
        assert_eq!((config.width, config.height), (20, 10));
        assert_eq!(config.foods_per_level, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        assert!(SnakeConfig::default().with_width(1).validate().is_err());
        assert!(SnakeConfig::default().with_height(500).validate().is_err());
        assert!(SnakeConfig::default().with_foods_per_level(0).validate().is_err());
    }
}
