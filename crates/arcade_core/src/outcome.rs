//! Terminal outcomes shared by all sessions.

use serde::{Deserialize, Serialize};

/// Outcome of a session from the scored player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Session still accepts intents.
    #[default]
    Pending,
    /// Player won.
    Won,
    /// Player lost (crash, cap exhausted, time up, AI win).
    Lost,
    /// Neither side won.
    Draw,
    /// Player quit.
    Quit,
}

impl Outcome {
    /// Returns true for every outcome except [`Outcome::Pending`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pending => write!(f, "In progress"),
            Outcome::Won => write!(f, "Won"),
            Outcome::Lost => write!(f, "Lost"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Quit => write!(f, "Quit"),
        }
    }
}
