//! Player-record collaborator interface and an in-memory implementation.

use arcade_core::{GameKind, ScoreRecord};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Receives finished sessions' scores.
pub trait ScoreSink {
    /// Stores one record.
    fn record(&mut self, kind: GameKind, record: &ScoreRecord);
}

/// Running totals for one player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct PlayerStats {
    /// Player name.
    name: String,
    /// Sessions recorded.
    games_played: u32,
    /// Sum of all scores.
    total_score: u64,
    /// Sessions flagged perfect.
    perfect_games: u32,
    /// Best score per game.
    high_scores: BTreeMap<GameKind, u64>,
}

impl PlayerStats {
    /// Empty stats for a named player.
    #[instrument(skip(name))]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a score. Returns true when it sets a new best for the game; the
    /// first score for a game always does.
    #[instrument(skip(self, record), fields(player = %self.name, score = record.score()))]
    pub fn add_score(&mut self, kind: GameKind, record: &ScoreRecord) -> bool {
        self.games_played += 1;
        self.total_score += record.score();
        if *record.perfect() {
            self.perfect_games += 1;
        }

        let score = *record.score();
        let best = self.high_scores.get(&kind).copied();
        if best.is_none_or(|best| score > best) {
            self.high_scores.insert(kind, score);
            info!(%kind, score, "New high score");
            true
        } else {
            debug!(%kind, score, ?best, "Score below best");
            false
        }
    }

    /// Best score for a game, if it has been played.
    pub fn high_score(&self, kind: GameKind) -> Option<u64> {
        self.high_scores.get(&kind).copied()
    }

    /// Mean score over all sessions, rounded to two decimals.
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            let mean = self.total_score as f64 / f64::from(self.games_played);
            (mean * 100.0).round() / 100.0
        }
    }
}

impl ScoreSink for PlayerStats {
    fn record(&mut self, kind: GameKind, record: &ScoreRecord) {
        self.add_score(kind, record);
    }
}
