//! Error types shared by every arcade engine.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong with an engine operation.
///
/// Every kind except [`GameErrorKind::InvalidConfig`] is recoverable: the
/// engine state is left exactly as it was and the driver may re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Value outside the declared domain.
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),

    /// Construction parameter violates an invariant; no session was created.
    #[display("Invalid config: {}", _0)]
    InvalidConfig(String),

    /// Cell index out of range or not selectable.
    #[display("Invalid cell {}", _0)]
    InvalidCell(usize),

    /// The board is already terminal.
    #[display("No legal move available")]
    NoLegalMove,

    /// Score requested before the session reached a terminal outcome.
    #[display("Session has not finished")]
    SessionNotFinished,

    /// Intent sent to a session that already reached a terminal outcome.
    #[display("Session is already over")]
    SessionOver,
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`GameErrorKind::InvalidInput`].
    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::InvalidInput(message.into()))
    }

    /// Shorthand for [`GameErrorKind::InvalidConfig`].
    #[track_caller]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(GameErrorKind::InvalidConfig(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// Whether the driver can recover by re-prompting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind, GameErrorKind::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tracks_caller_location() {
        let err = GameError::new(GameErrorKind::NoLegalMove);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("No legal move"));
    }

    #[test]
    fn test_only_config_errors_are_fatal() {
        assert!(!GameError::invalid_config("grid").is_recoverable());
        assert!(GameError::invalid_input("guess").is_recoverable());
        assert!(GameError::new(GameErrorKind::SessionNotFinished).is_recoverable());
    }
}
