//! Lifecycle contract every game engine satisfies.

use crate::score::{Metrics, ScoreRecord, score};
use crate::{GameError, GameErrorKind, GameKind, GameRng, Outcome};
use std::time::Duration;

/// Shared lifecycle: start, step until terminal, then score.
///
/// Transitions are synchronous and bounded. A failing call leaves the
/// engine in its previous state.
pub trait SessionContract: Sized {
    /// Construction parameters, validated by [`start`](Self::start).
    type Config;
    /// One driver intent.
    type Intent;
    /// Feedback for one accepted intent.
    type Feedback;
    /// Render snapshot that never leaks hidden information.
    type View;

    /// Which game this engine plays.
    const KIND: GameKind;

    /// Validates the config and builds a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidConfig`] when a parameter is out of range.
    fn start(config: Self::Config, rng: GameRng) -> Result<Self, GameError>;

    /// Applies one intent.
    fn step(&mut self, intent: Self::Intent) -> Result<Self::Feedback, GameError>;

    /// Current outcome; [`Outcome::Pending`] until terminal.
    fn outcome(&self) -> Outcome;

    /// Side-effect free terminal check.
    fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Render snapshot.
    fn view(&self) -> Self::View;

    /// Ends the session with [`Outcome::Quit`].
    fn quit(&mut self) -> Result<(), GameError>;

    /// Ends the session because its time cap elapsed.
    fn expire(&mut self) -> Result<(), GameError>;

    /// Raw metrics; only defined once terminal.
    fn metrics(&self, elapsed: Duration) -> Result<Metrics, GameError>;

    /// Score of a terminated session.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::SessionNotFinished`] while pending.
    fn score(&self, elapsed: Duration) -> Result<ScoreRecord, GameError> {
        self.metrics(elapsed).map(|metrics| score(&metrics))
    }
}

/// Fails with [`GameErrorKind::SessionOver`] once `outcome` is terminal.
#[track_caller]
pub fn ensure_active(outcome: Outcome) -> Result<(), GameError> {
    if outcome.is_terminal() {
        Err(GameError::new(GameErrorKind::SessionOver))
    } else {
        Ok(())
    }
}

/// Fails with [`GameErrorKind::SessionNotFinished`] while `outcome` is pending.
#[track_caller]
pub fn ensure_finished(outcome: Outcome) -> Result<(), GameError> {
    if outcome.is_terminal() {
        Ok(())
    } else {
        Err(GameError::new(GameErrorKind::SessionNotFinished))
    }
}
