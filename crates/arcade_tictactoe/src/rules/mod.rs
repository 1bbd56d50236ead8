//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are separated from
//! board storage so the search and the session engine share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use super::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Terminal evaluation of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The mark has three in a row.
    Win(Mark),
    /// Full board, no line.
    Draw,
    /// Play continues.
    NonTerminal,
}

impl Verdict {
    /// Returns true for a win or a draw.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Verdict::NonTerminal)
    }
}

/// Classifies a board as won, drawn, or still in play.
pub fn evaluate_terminal(board: &Board) -> Verdict {
    if let Some(winner) = check_winner(board) {
        Verdict::Win(winner)
    } else if is_full(board) {
        Verdict::Draw
    } else {
        Verdict::NonTerminal
    }
}
