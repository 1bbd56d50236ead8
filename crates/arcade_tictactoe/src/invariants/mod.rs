//! Board invariants checked after every placed mark.

mod alternating_turn;
mod balanced_marks;
mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use balanced_marks::BalancedMarksInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All tic-tac-toe invariants as a composable set.
pub type TicTacToeInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    BalancedMarksInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position, TicTacToeConfig, TicTacToeEngine, TicTacToeIntent};
    use arcade_core::{GameRng, InvariantSet, SessionContract};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = TicTacToeEngine::start(TicTacToeConfig::default(), GameRng::new(0)).unwrap();
        assert!(TicTacToeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game =
            TicTacToeEngine::start(TicTacToeConfig::default(), GameRng::new(0)).unwrap();
        game.step(TicTacToeIntent::Place(Position::Center)).unwrap();
        game.step(TicTacToeIntent::Respond).unwrap();
        assert!(TicTacToeInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_corruption() {
        let mut game =
            TicTacToeEngine::start(TicTacToeConfig::default(), GameRng::new(0)).unwrap();
        game.step(TicTacToeIntent::Place(Position::Center)).unwrap();
        game.corrupt_for_test(Position::TopLeft, Mark::X);

        let violations = TicTacToeInvariants::check_all(&game).unwrap_err();
        assert!(violations.len() >= 2);
    }
}
