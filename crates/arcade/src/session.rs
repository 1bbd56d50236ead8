//! Game sessions: one engine, its timestamps and its time cap.

use crate::clock::{Clock, SystemClock};
use crate::record::ScoreSink;
use arcade_core::{
    Difficulty, GameError, GameKind, GameRng, Outcome, ScoreRecord, SessionContract,
    ensure_finished,
};
use arcade_guess::{GuessConfig, GuessEngine, GuessView, Hint};
use arcade_memory::{MemoryConfig, MemoryEngine, MemoryFeedback, MemoryIntent, MemoryView};
use arcade_snake::{Direction, SnakeConfig, SnakeEngine, SnakeView, StepReport};
use arcade_tictactoe::{MoveReport, TicTacToeConfig, TicTacToeEngine, TicTacToeIntent, TicTacToeView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for one of the four games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameConfig {
    /// Number guessing.
    Guess(GuessConfig),
    /// Tic-tac-toe.
    TicTacToe(TicTacToeConfig),
    /// Snake.
    Snake(SnakeConfig),
    /// Memory cards.
    Memory(MemoryConfig),
}

impl GameConfig {
    /// Which game this configures.
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::Guess(_) => GameKind::Guess,
            GameConfig::TicTacToe(_) => GameKind::TicTacToe,
            GameConfig::Snake(_) => GameKind::Snake,
            GameConfig::Memory(_) => GameKind::Memory,
        }
    }

    /// Difficulty used for score weighting.
    pub fn difficulty(&self) -> Difficulty {
        match self {
            GameConfig::Guess(c) => *c.difficulty(),
            GameConfig::TicTacToe(c) => *c.difficulty(),
            GameConfig::Snake(c) => *c.difficulty(),
            GameConfig::Memory(c) => *c.difficulty(),
        }
    }

    /// Time cap the game itself imposes.
    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            GameConfig::Memory(c) => c.time_limit(),
            _ => None,
        }
    }
}

/// The engine behind a session.
#[derive(Debug, Clone)]
pub enum Engine {
    /// Number guessing.
    Guess(GuessEngine),
    /// Tic-tac-toe.
    TicTacToe(TicTacToeEngine),
    /// Snake.
    Snake(SnakeEngine),
    /// Memory cards.
    Memory(MemoryEngine),
}

/// One driver intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A number guess.
    Guess(i64),
    /// A tic-tac-toe placement or opponent turn.
    TicTacToe(TicTacToeIntent),
    /// A snake step.
    Snake(Direction),
    /// A memory reveal or acknowledgement.
    Memory(MemoryIntent),
    /// End the session early.
    Quit,
}

/// Feedback for an applied intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Guess hint.
    Guess(Hint),
    /// Tic-tac-toe move.
    TicTacToe(MoveReport),
    /// Snake step.
    Snake(StepReport),
    /// Memory reveal.
    Memory(MemoryFeedback),
    /// The session was quit.
    Quit,
    /// The time cap elapsed before the intent could apply.
    TimeUp,
}

/// Game-specific render state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameView {
    /// Number guessing.
    Guess(GuessView),
    /// Tic-tac-toe.
    TicTacToe(TicTacToeView),
    /// Snake.
    Snake(SnakeView),
    /// Memory cards.
    Memory(MemoryView),
}

/// Render snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Session identifier.
    pub id: String,
    /// Which game.
    pub kind: GameKind,
    /// Selected difficulty.
    pub difficulty: Difficulty,
    /// Start stamp.
    pub started_at: DateTime<Utc>,
    /// Stamp of the terminal transition.
    pub finished_at: Option<DateTime<Utc>>,
    /// Session outcome.
    pub outcome: Outcome,
    /// Game state.
    pub game: GameView,
}

macro_rules! dispatch {
    ($engine:expr, $e:ident => $body:expr) => {
        match $engine {
            Engine::Guess($e) => $body,
            Engine::TicTacToe($e) => $body,
            Engine::Snake($e) => $body,
            Engine::Memory($e) => $body,
        }
    };
}

/// A play session driven one intent at a time.
#[derive(Debug, Clone)]
pub struct GameSession<C: Clock = SystemClock> {
    id: String,
    kind: GameKind,
    difficulty: Difficulty,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    time_cap: Option<Duration>,
    engine: Engine,
    clock: C,
    recorded: bool,
}

impl<C: Clock> GameSession<C> {
    /// Starts a session; the game's own time limit applies unless `time_cap`
    /// overrides it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the game config does not validate.
    #[instrument(skip(config, clock), fields(kind = %config.kind()))]
    pub fn start(
        config: GameConfig,
        seed: u64,
        clock: C,
        time_cap: Option<Duration>,
    ) -> Result<Self, GameError> {
        let kind = config.kind();
        let difficulty = config.difficulty();
        let time_cap = time_cap.or_else(|| config.time_limit());
        let rng = GameRng::new(seed);

        let engine = match config {
            GameConfig::Guess(c) => Engine::Guess(GuessEngine::start(c, rng)?),
            GameConfig::TicTacToe(c) => Engine::TicTacToe(TicTacToeEngine::start(c, rng)?),
            GameConfig::Snake(c) => Engine::Snake(SnakeEngine::start(c, rng)?),
            GameConfig::Memory(c) => Engine::Memory(MemoryEngine::start(c, rng)?),
        };

        let started_at = clock.now();
        let id = format!("{kind}-{seed:016x}-{}", started_at.timestamp_millis());
        info!(%id, %difficulty, ?time_cap, "Session started");
        Ok(Self {
            id,
            kind,
            difficulty,
            started_at,
            finished_at: None,
            time_cap,
            engine,
            clock,
            recorded: false,
        })
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Which game.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Selected difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Start stamp.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stamp of the terminal transition.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Effective time cap.
    pub fn time_cap(&self) -> Option<Duration> {
        self.time_cap
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The injected clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        dispatch!(&self.engine, e => e.outcome())
    }

    /// Side-effect free terminal check.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Time since start, frozen at the terminal transition.
    pub fn elapsed(&self) -> Duration {
        let end = self.finished_at.unwrap_or_else(|| self.clock.now());
        (end - self.started_at).to_std().unwrap_or_default()
    }

    /// Expires the session if its time cap has elapsed. Returns whether it
    /// did.
    ///
    /// # Errors
    ///
    /// Propagates engine errors from the expiry transition.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn tick(&mut self) -> Result<bool, GameError> {
        let Some(cap) = self.time_cap else {
            return Ok(false);
        };
        if self.is_terminal() || self.elapsed() < cap {
            return Ok(false);
        }
        warn!(?cap, "Time cap elapsed");
        dispatch!(&mut self.engine, e => e.expire())?;
        self.stamp_if_finished();
        Ok(true)
    }

    /// Applies one intent after checking the time cap.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an intent meant for another game; otherwise the
    /// engine's own error, with the session unchanged.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn apply(&mut self, intent: Intent) -> Result<Feedback, GameError> {
        if self.tick()? {
            return Ok(Feedback::TimeUp);
        }

        let feedback = match (&mut self.engine, intent) {
            (engine, Intent::Quit) => {
                dispatch!(engine, e => e.quit())?;
                Feedback::Quit
            }
            (Engine::Guess(e), Intent::Guess(value)) => Feedback::Guess(e.step(value)?),
            (Engine::TicTacToe(e), Intent::TicTacToe(i)) => Feedback::TicTacToe(e.step(i)?),
            (Engine::Snake(e), Intent::Snake(direction)) => Feedback::Snake(e.step(direction)?),
            (Engine::Memory(e), Intent::Memory(i)) => Feedback::Memory(e.step(i)?),
            (_, intent) => {
                warn!(?intent, kind = %self.kind, "Intent for another game");
                return Err(GameError::invalid_input(format!(
                    "intent {intent:?} does not apply to {}",
                    self.kind
                )));
            }
        };

        debug!(?feedback, "Intent applied");
        self.stamp_if_finished();
        Ok(feedback)
    }

    /// Ends the session with [`Outcome::Quit`].
    ///
    /// # Errors
    ///
    /// Returns `SessionOver` if already terminal.
    pub fn quit(&mut self) -> Result<(), GameError> {
        self.apply(Intent::Quit).map(|_| ())
    }

    fn stamp_if_finished(&mut self) {
        if self.is_terminal() && self.finished_at.is_none() {
            let now = self.clock.now();
            info!(id = %self.id, outcome = %self.outcome(), "Session finished");
            self.finished_at = Some(now);
        }
    }

    /// Render snapshot.
    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id.clone(),
            kind: self.kind,
            difficulty: self.difficulty,
            started_at: self.started_at,
            finished_at: self.finished_at,
            outcome: self.outcome(),
            game: match &self.engine {
                Engine::Guess(e) => GameView::Guess(e.view()),
                Engine::TicTacToe(e) => GameView::TicTacToe(e.view()),
                Engine::Snake(e) => GameView::Snake(e.view()),
                Engine::Memory(e) => GameView::Memory(e.view()),
            },
        }
    }

    /// Score over `finished_at - started_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFinished` while pending.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn score_record(&self) -> Result<ScoreRecord, GameError> {
        ensure_finished(self.outcome())?;
        let elapsed = self.elapsed();
        dispatch!(&self.engine, e => e.score(elapsed))
    }

    /// Hands the score to the player-record collaborator, once.
    ///
    /// # Errors
    ///
    /// `SessionNotFinished` while pending; `InvalidInput` if already recorded.
    #[instrument(skip(self, sink), fields(id = %self.id))]
    pub fn record_to(&mut self, sink: &mut impl ScoreSink) -> Result<ScoreRecord, GameError> {
        let record = self.score_record()?;
        if self.recorded {
            return Err(GameError::invalid_input("score already recorded"));
        }
        sink.record(self.kind, &record);
        self.recorded = true;
        info!(score = record.score(), perfect = record.perfect(), "Score recorded");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::record::PlayerStats;
    use arcade_core::GameErrorKind;
    use chrono::TimeDelta;

    fn guess_session(clock: ManualClock, cap: Option<Duration>) -> GameSession<ManualClock> {
        GameSession::start(GameConfig::Guess(GuessConfig::default()), 1, clock, cap).unwrap()
    }

    #[test]
    fn test_foreign_intent_rejected() {
        let mut session = guess_session(ManualClock::default(), None);
        let err = session.apply(Intent::Snake(Direction::Up)).unwrap_err();
        assert!(matches!(err.kind(), GameErrorKind::InvalidInput(_)));
        assert_eq!(session.outcome(), Outcome::Pending);
    }

    #[test]
    fn test_time_cap_expires_before_intent() {
        let clock = ManualClock::default();
        let mut session = guess_session(clock.clone(), Some(Duration::from_secs(30)));
        assert!(!session.tick().unwrap());

        clock.advance(TimeDelta::seconds(31));
        assert_eq!(session.apply(Intent::Guess(50)).unwrap(), Feedback::TimeUp);
        assert_eq!(session.outcome(), Outcome::Lost);
        assert_eq!(session.elapsed(), Duration::from_secs(31));

        let err = session.apply(Intent::Guess(50)).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::SessionOver);
    }

    #[test]
    fn test_finished_at_freezes_elapsed() {
        let clock = ManualClock::default();
        let mut session = guess_session(clock.clone(), None);
        clock.advance(TimeDelta::seconds(5));
        session.quit().unwrap();
        clock.advance(TimeDelta::seconds(100));
        assert_eq!(session.elapsed(), Duration::from_secs(5));
        assert_eq!(*session.score_record().unwrap().elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_record_once() {
        let mut session = guess_session(ManualClock::default(), None);
        let mut stats = PlayerStats::new("ada");
        assert_eq!(
            session.record_to(&mut stats).unwrap_err().kind(),
            &GameErrorKind::SessionNotFinished
        );
        session.quit().unwrap();
        session.record_to(&mut stats).unwrap();
        assert!(session.record_to(&mut stats).is_err());
        assert_eq!(*stats.games_played(), 1);
    }

    #[test]
    fn test_memory_limit_becomes_cap() {
        let session = GameSession::start(
            GameConfig::Memory(MemoryConfig::default()),
            3,
            ManualClock::default(),
            None,
        )
        .unwrap();
        assert_eq!(session.time_cap(), Some(Duration::from_secs(120)));
    }
}
