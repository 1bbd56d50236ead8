//! Balanced marks invariant.

use crate::{Mark, TicTacToeEngine};
use arcade_core::Invariant;

/// Invariant: X has as many marks as O or exactly one more.
pub struct BalancedMarksInvariant;

impl Invariant<TicTacToeEngine> for BalancedMarksInvariant {
    fn holds(game: &TicTacToeEngine) -> bool {
        let x = game.board().count(Mark::X);
        let o = game.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X leads O by at most one mark"
    }
}
