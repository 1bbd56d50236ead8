//! Headless replay of a scripted session.
//!
//! A script fixes everything a session consumes from outside: the game
//! config, the seed, and each intent with the clock offset it arrives at.
//! Replaying the same script always produces the same report.

use crate::clock::{Clock, ManualClock};
use crate::config::ConfigError;
use crate::session::{Feedback, GameConfig, GameSession, Intent, SessionView};
use arcade_core::{GameError, ScoreRecord};
use chrono::{DateTime, TimeDelta, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// One scripted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ScriptStep {
    /// Milliseconds after the session start at which the intent arrives.
    #[serde(default)]
    pub at_ms: u64,
    /// The intent.
    pub intent: Intent,
}

/// A complete replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct ReplayScript {
    /// Random seed for the engine.
    seed: u64,
    /// Session time cap override in seconds.
    #[serde(default)]
    time_cap_secs: Option<u64>,
    /// Game to play.
    config: GameConfig,
    /// Intents in arrival order.
    #[serde(default)]
    steps: Vec<ScriptStep>,
}

impl ReplayScript {
    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text does not parse.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text)
            .map_err(|e| ConfigError::new(format!("Failed to parse replay script: {}", e)))
    }

    /// Loads a script from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read replay script: {}", e)))?;
        Self::from_toml_str(&content)
    }
}

/// What happened to one scripted intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEntry {
    /// Arrival offset.
    pub at_ms: u64,
    /// The intent.
    pub intent: Intent,
    /// Feedback when accepted.
    pub feedback: Option<Feedback>,
    /// Error message when rejected.
    pub error: Option<String>,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// One entry per scripted intent, in order.
    pub entries: Vec<ReplayEntry>,
    /// Final session state.
    pub view: SessionView,
    /// Score, if the session reached a terminal state.
    pub record: Option<ScoreRecord>,
}

/// Runs a script on a fresh session with a manual clock at the Unix epoch.
///
/// Rejected intents are reported and skipped, as a live driver would.
///
/// # Errors
///
/// Returns the start error if the config is invalid.
#[instrument(skip(script), fields(seed = script.seed, steps = script.steps.len()))]
pub fn replay(script: &ReplayScript) -> Result<ReplayReport, GameError> {
    let clock = ManualClock::starting_at(DateTime::UNIX_EPOCH);
    let mut session = GameSession::start(
        script.config.clone(),
        script.seed,
        clock.clone(),
        script.time_cap_secs.map(Duration::from_secs),
    )?;

    let mut entries = Vec::with_capacity(script.steps.len());
    for step in &script.steps {
        let at = i64::try_from(step.at_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|offset| session.started_at().checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        clock.set(at);

        let entry = match session.apply(step.intent) {
            Ok(feedback) => {
                debug!(at_ms = step.at_ms, ?feedback, "Step accepted");
                ReplayEntry {
                    at_ms: step.at_ms,
                    intent: step.intent,
                    feedback: Some(feedback),
                    error: None,
                }
            }
            Err(err) => {
                warn!(at_ms = step.at_ms, error = %err.kind(), "Step rejected");
                ReplayEntry {
                    at_ms: step.at_ms,
                    intent: step.intent,
                    feedback: None,
                    error: Some(err.kind().to_string()),
                }
            }
        };
        entries.push(entry);
    }

    let record = session.score_record().ok();
    info!(
        outcome = %session.outcome(),
        score = ?record.as_ref().map(|r| *r.score()),
        at = %clock.now(),
        "Replay finished"
    );
    Ok(ReplayReport {
        entries,
        view: session.view(),
        record,
    })
}
