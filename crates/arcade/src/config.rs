//! Driver configuration loaded from TOML.

use crate::session::GameConfig;
use arcade_core::{Difficulty, GameKind};
use arcade_guess::GuessConfig;
use arcade_memory::MemoryConfig;
use arcade_snake::SnakeConfig;
use arcade_tictactoe::TicTacToeConfig;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Per-game settings plus session-wide options.
///
/// Every table is optional; missing games fall back to their
/// [`Difficulty::Medium`] presets.
///
/// ```toml
/// player = "ada"
/// seed = 7
///
/// [guess]
/// low = 1
/// high = 1000
/// max_attempts = 12
/// difficulty = "hard"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ArcadeConfig {
    /// Player the scores are recorded for.
    #[serde(default = "default_player")]
    player: String,
    /// Fixed seed; `None` lets the driver pick one.
    #[serde(default)]
    seed: Option<u64>,
    /// Session time cap in seconds for games without their own limit.
    #[serde(default)]
    time_cap_secs: Option<u64>,
    /// Number guessing.
    #[serde(default = "GuessConfig::default")]
    guess: GuessConfig,
    /// Tic-tac-toe.
    #[serde(default = "TicTacToeConfig::default")]
    tictactoe: TicTacToeConfig,
    /// Snake.
    #[serde(default = "snake_default")]
    snake: SnakeConfig,
    /// Memory cards.
    #[serde(default = "memory_default")]
    memory: MemoryConfig,
}

fn default_player() -> String {
    "player".to_string()
}

fn snake_default() -> SnakeConfig {
    SnakeConfig::preset(Difficulty::Medium)
}

fn memory_default() -> MemoryConfig {
    MemoryConfig::preset(Difficulty::Medium)
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self::preset(Difficulty::Medium)
    }
}

impl ArcadeConfig {
    /// All four games at one difficulty.
    #[instrument]
    pub fn preset(difficulty: Difficulty) -> Self {
        Self {
            player: default_player(),
            seed: None,
            time_cap_secs: None,
            guess: GuessConfig::preset(difficulty),
            tictactoe: TicTacToeConfig::preset(difficulty),
            snake: SnakeConfig::preset(difficulty),
            memory: MemoryConfig::preset(difficulty),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text does not parse.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(player = %config.player, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(player = %config.player, "Config loaded successfully");
        Ok(config)
    }

    /// Session config for one game.
    pub fn game(&self, kind: GameKind) -> GameConfig {
        match kind {
            GameKind::Guess => GameConfig::Guess(self.guess.clone()),
            GameKind::TicTacToe => GameConfig::TicTacToe(self.tictactoe.clone()),
            GameKind::Snake => GameConfig::Snake(self.snake.clone()),
            GameKind::Memory => GameConfig::Memory(self.memory.clone()),
        }
    }

    /// Session-wide time cap.
    pub fn time_cap(&self) -> Option<Duration> {
        self.time_cap_secs.map(Duration::from_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_medium_presets() {
        let config = ArcadeConfig::from_toml_str("").unwrap();
        assert_eq!(config, ArcadeConfig::default());
        assert_eq!(config.player(), "player");
    }

    #[test]
    fn test_partial_tables() {
        let config = ArcadeConfig::from_toml_str(
            r#"
            player = "ada"
            seed = 7

            [guess]
            low = 1
            high = 1000
            difficulty = "hard"

            [tictactoe]
            ai_strength = 0.5
            player_mark = "O"
            "#,
        )
        .unwrap();
        assert_eq!(config.player(), "ada");
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.guess().high(), 1000);
        assert_eq!(*config.guess().max_attempts(), None);
        assert_eq!(config.tictactoe().strength().unwrap().probability(), 0.5);
        assert_eq!(config.game(GameKind::Snake), GameConfig::Snake(snake_default()));
    }

    #[test]
    fn test_bad_toml_reports_location() {
        let err = ArcadeConfig::from_toml_str("seed = \"seven\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }
}
