//! Arcade session layer.
//!
//! Wraps the four game engines in a single [`GameSession`] that owns one
//! engine, stamps start and finish times from an injected [`Clock`], applies
//! the session time cap, and hands finished scores to a [`ScoreSink`].
//!
//! # Example
//!
//! ```
//! use arcade::{GameConfig, GameSession, Intent, ManualClock, PlayerStats};
//! use arcade_guess::GuessConfig;
//!
//! let mut session =
//!     GameSession::start(GameConfig::Guess(GuessConfig::default()), 7, ManualClock::default(), None)?;
//! session.apply(Intent::Guess(50))?;
//! if !session.is_terminal() {
//!     session.apply(Intent::Quit)?;
//! }
//!
//! let mut stats = PlayerStats::new("ada");
//! session.record_to(&mut stats)?;
//! assert_eq!(*stats.games_played(), 1);
//! # Ok::<(), arcade_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod presets;
mod record;
mod replay;
mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ArcadeConfig, ConfigError};
pub use presets::{Preset, presets};
pub use record::{PlayerStats, ScoreSink};
pub use replay::{ReplayEntry, ReplayReport, ReplayScript, ScriptStep, replay};
pub use session::{Engine, Feedback, GameConfig, GameSession, GameView, Intent, SessionView};
