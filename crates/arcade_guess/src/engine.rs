//! Bounded-range secret number state machine.

use crate::GuessConfig;
use arcade_core::{
    GameError, GameKind, GameRng, Metrics, Outcome, Quality, SessionContract, ensure_active,
    ensure_finished,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Feedback for an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Hint {
    /// The secret is higher.
    #[strum(to_string = "Too low")]
    TooLow,
    /// The secret is lower.
    #[strum(to_string = "Too high")]
    TooHigh,
    /// Found it.
    Correct,
}

/// What the driver may show: never the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessView {
    /// Smallest allowed guess.
    pub low: i64,
    /// Largest allowed guess.
    pub high: i64,
    /// Accepted guesses so far.
    pub attempts: u32,
    /// Guesses left under the cap, if any.
    pub remaining: Option<u32>,
    /// Hint for the most recent guess.
    pub last_hint: Option<Hint>,
    /// Session outcome.
    pub outcome: Outcome,
}

/// Number guessing session.
#[derive(Clone)]
pub struct GuessEngine {
    config: GuessConfig,
    secret: i64,
    attempts: u32,
    last_hint: Option<Hint>,
    outcome: Outcome,
}

impl std::fmt::Debug for GuessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuessEngine")
            .field("config", &self.config)
            .field("secret", &"<hidden>")
            .field("attempts", &self.attempts)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl GuessEngine {
    /// Builds a session around a known secret.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config is invalid or the secret lies
    /// outside its range.
    #[instrument(skip(secret))]
    pub fn with_secret(config: GuessConfig, secret: i64) -> Result<Self, GameError> {
        config.validate()?;
        if !(*config.low()..=*config.high()).contains(&secret) {
            return Err(GameError::invalid_config("secret outside the configured range"));
        }
        info!(low = config.low(), high = config.high(), "Starting guess session");
        Ok(Self {
            config,
            secret,
            attempts: 0,
            last_hint: None,
            outcome: Outcome::Pending,
        })
    }

    /// Compares a guess with the secret.
    ///
    /// Out-of-range guesses are rejected without consuming an attempt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for out-of-range values and `SessionOver`
    /// once the session has ended.
    #[instrument(skip(self), fields(attempts = self.attempts))]
    pub fn guess(&mut self, value: i64) -> Result<Hint, GameError> {
        ensure_active(self.outcome)?;

        let (low, high) = (*self.config.low(), *self.config.high());
        if value < low || value > high {
            warn!(value, low, high, "Guess outside range");
            return Err(GameError::invalid_input(format!(
                "guess {} outside [{}, {}]",
                value, low, high
            )));
        }

        self.attempts += 1;
        let hint = match value.cmp(&self.secret) {
            std::cmp::Ordering::Less => Hint::TooLow,
            std::cmp::Ordering::Greater => Hint::TooHigh,
            std::cmp::Ordering::Equal => Hint::Correct,
        };
        self.last_hint = Some(hint);

        if hint == Hint::Correct {
            info!(attempts = self.attempts, "Secret found");
            self.outcome = Outcome::Won;
        } else if self.remaining() == Some(0) {
            info!(attempts = self.attempts, "Out of attempts");
            self.outcome = Outcome::Lost;
        } else {
            debug!(?hint, "Guess missed");
        }

        Ok(hint)
    }

    /// Accepted guesses so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Guesses left under the cap.
    pub fn remaining(&self) -> Option<u32> {
        self.config
            .max_attempts()
            .map(|cap| cap.saturating_sub(self.attempts))
    }

    /// The configuration this session was started with.
    pub fn config(&self) -> &GuessConfig {
        &self.config
    }
}

impl SessionContract for GuessEngine {
    type Config = GuessConfig;
    type Intent = i64;
    type Feedback = Hint;
    type View = GuessView;

    const KIND: GameKind = GameKind::Guess;

    #[instrument(skip(rng))]
    fn start(config: GuessConfig, mut rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let secret = rng.gen_inclusive(*config.low(), *config.high());
        Self::with_secret(config, secret)
    }

    fn step(&mut self, intent: i64) -> Result<Hint, GameError> {
        self.guess(intent)
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn view(&self) -> GuessView {
        GuessView {
            low: *self.config.low(),
            high: *self.config.high(),
            attempts: self.attempts,
            remaining: self.remaining(),
            last_hint: self.last_hint,
            outcome: self.outcome,
        }
    }

    #[instrument(skip(self))]
    fn quit(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!(attempts = self.attempts, "Guess session quit");
        self.outcome = Outcome::Quit;
        Ok(())
    }

    #[instrument(skip(self))]
    fn expire(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!("Guess session timed out");
        self.outcome = Outcome::Lost;
        Ok(())
    }

    fn metrics(&self, elapsed: Duration) -> Result<Metrics, GameError> {
        ensure_finished(self.outcome)?;
        Ok(Metrics::new(
            self.outcome,
            self.attempts,
            elapsed,
            *self.config.difficulty(),
            Quality::Guess {
                budget: self.config.budget(),
            },
        ))
    }
}
