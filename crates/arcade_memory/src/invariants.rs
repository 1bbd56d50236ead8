//! Grid invariants checked after every reveal.

use super::{CardState, MemoryEngine};
use arcade_core::Invariant;

/// Invariant: matched cards come in same-symbol pairs and agree with the
/// pair counter.
pub struct MatchedPairsInvariant;

impl Invariant<MemoryEngine> for MatchedPairsInvariant {
    fn holds(game: &MemoryEngine) -> bool {
        let matched: Vec<_> = game
            .cards()
            .iter()
            .filter(|card| card.state == CardState::Matched)
            .collect();
        let paired = matched.iter().all(|card| {
            matched
                .iter()
                .filter(|other| other.symbol == card.symbol)
                .count()
                == 2
        });
        paired && matched.len() == 2 * game.matched_pairs() as usize
    }

    fn description() -> &'static str {
        "Matched cards form complete pairs"
    }
}

/// Invariant: the face-up cards are exactly the open attempt plus any
/// unresolved mismatch.
pub struct FaceUpInvariant;

impl Invariant<MemoryEngine> for FaceUpInvariant {
    fn holds(game: &MemoryEngine) -> bool {
        let mut expected: Vec<usize> = game.awaiting().into_iter().collect();
        if let Some((a, b)) = game.pending_mismatch() {
            expected.extend([a, b]);
        }
        expected.sort_unstable();

        let face_up: Vec<usize> = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.state == CardState::Revealed)
            .map(|(index, _)| index)
            .collect();
        face_up == expected
    }

    fn description() -> &'static str {
        "Face-up cards belong to the open attempt"
    }
}

/// All memory invariants as a composable set.
pub type MemoryInvariants = (MatchedPairsInvariant, FaceUpInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryConfig;
    use arcade_core::{GameRng, InvariantSet, SessionContract};

    #[test]
    fn test_holds_through_an_attempt() {
        let mut game = MemoryEngine::start(MemoryConfig::default(), GameRng::new(4)).unwrap();
        assert!(MemoryInvariants::check_all(&game).is_ok());
        game.reveal(0).unwrap();
        game.reveal(1).unwrap();
        assert!(MemoryInvariants::check_all(&game).is_ok());
    }
}
