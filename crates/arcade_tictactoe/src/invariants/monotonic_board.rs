//! Monotonic board invariant: squares never change once set.

use crate::{Board, Square, TicTacToeEngine};
use arcade_core::Invariant;

/// Invariant: replaying the move history reproduces the board, and no
/// move ever landed on an occupied square.
pub struct MonotonicBoardInvariant;

impl Invariant<TicTacToeEngine> for MonotonicBoardInvariant {
    fn holds(game: &TicTacToeEngine) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.mark));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
