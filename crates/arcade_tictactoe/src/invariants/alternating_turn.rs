//! Alternating turn invariant: X, O, X, O, ...

use crate::{Mark, TicTacToeEngine};
use arcade_core::Invariant;

/// Invariant: history starts with X and alternates; the side to move
/// follows the last mark.
pub struct AlternatingTurnInvariant;

impl Invariant<TicTacToeEngine> for AlternatingTurnInvariant {
    fn holds(game: &TicTacToeEngine) -> bool {
        let history = game.history();

        if let Some(first) = history.first()
            && first.mark != Mark::X
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 { Mark::X } else { Mark::O };
        game.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
