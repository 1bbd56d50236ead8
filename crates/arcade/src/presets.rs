//! Difficulty preset catalogue.

use crate::config::ArcadeConfig;
use crate::session::GameConfig;
use arcade_core::{Difficulty, GameKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// One game at one difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Which game.
    pub kind: GameKind,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Score weight of the level.
    pub weight: u64,
    /// Full game config.
    pub config: GameConfig,
}

impl Preset {
    /// One-line description of the preset's parameters.
    pub fn summary(&self) -> String {
        match &self.config {
            GameConfig::Guess(c) => match c.max_attempts() {
                Some(cap) => format!("range {}-{}, {cap} attempts", c.low(), c.high()),
                None => format!("range {}-{}, unlimited attempts", c.low(), c.high()),
            },
            GameConfig::TicTacToe(c) => match c.strength() {
                Ok(strength) => format!("AI plays optimally {:.0}% of moves", strength.probability() * 100.0),
                Err(_) => "invalid AI strength".to_string(),
            },
            GameConfig::Snake(c) => format!(
                "{}x{} grid, level up every {} foods",
                c.width(),
                c.height(),
                c.foods_per_level()
            ),
            GameConfig::Memory(c) => match c.time_limit_secs() {
                Some(secs) => format!("{0}x{0} grid, {secs}s limit", c.side()),
                None => format!("{0}x{0} grid, no time limit", c.side()),
            },
        }
    }
}

/// Every game at every difficulty, grouped by game.
pub fn presets() -> Vec<Preset> {
    GameKind::iter()
        .flat_map(|kind| {
            Difficulty::iter().map(move |difficulty| Preset {
                kind,
                difficulty,
                weight: difficulty.weight(),
                config: ArcadeConfig::preset(difficulty).game(kind),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_covers_every_pair() {
        let all = presets();
        assert_eq!(all.len(), 16);
        assert!(all.iter().all(|p| p.config.kind() == p.kind));
    }

    #[test]
    fn test_summaries() {
        let all = presets();
        let find = |kind, difficulty| {
            all.iter()
                .find(|p| p.kind == kind && p.difficulty == difficulty)
                .map(Preset::summary)
        };
        assert_eq!(
            find(GameKind::Guess, Difficulty::Expert).as_deref(),
            Some("range 1-500, 5 attempts")
        );
        assert_eq!(
            find(GameKind::TicTacToe, Difficulty::Easy).as_deref(),
            Some("AI plays optimally 30% of moves")
        );
        assert_eq!(
            find(GameKind::Memory, Difficulty::Medium).as_deref(),
            Some("6x6 grid, 180s limit")
        );
    }
}
