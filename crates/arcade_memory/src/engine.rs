//! Card matching state machine.

use super::invariants::MemoryInvariants;
use super::{DECK, MemoryConfig, Symbol};
use arcade_core::invariant::describe;
use arcade_core::{
    GameError, GameErrorKind, GameKind, GameRng, InvariantSet, Metrics, Outcome, Quality,
    SessionContract, ensure_active, ensure_finished,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Face of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum CardState {
    /// Face down.
    Hidden,
    /// Face up in the current or last unresolved attempt.
    Revealed,
    /// Paired and out of play.
    Matched,
}

/// A card on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// What the card shows when face up.
    pub symbol: Symbol,
    /// Whether it is face up.
    pub state: CardState,
}

/// Driver intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryIntent {
    /// Turn a card face up.
    Reveal(usize),
    /// Flip a mismatched pair back without revealing anything.
    Acknowledge,
}

/// Feedback for an accepted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryFeedback {
    /// First card of an attempt is face up.
    AwaitingSecond {
        /// Card revealed.
        index: usize,
        /// Its symbol.
        symbol: Symbol,
    },
    /// The two cards match and leave play.
    Match {
        /// First card of the attempt.
        first: usize,
        /// Second card of the attempt.
        second: usize,
        /// Shared symbol.
        symbol: Symbol,
    },
    /// The two cards differ; they stay face up until resolved.
    Mismatch {
        /// First card and its symbol.
        first: (usize, Symbol),
        /// Second card and its symbol.
        second: (usize, Symbol),
    },
    /// A pending mismatch was flipped back, if there was one.
    Acknowledged {
        /// Whether anything was face up.
        flipped: bool,
    },
}

/// What the driver may show of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    /// Face down; the symbol is withheld.
    Hidden,
    /// Face up in an open attempt.
    FaceUp(Symbol),
    /// Paired.
    Matched(Symbol),
}

/// Render snapshot; face-down symbols never leave the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryView {
    /// Cards per row.
    pub side: usize,
    /// Cards in row-major order.
    pub cards: Vec<CardView>,
    /// Pairs found.
    pub matched_pairs: u32,
    /// Pairs on the grid.
    pub pairs: u32,
    /// Completed attempts (pairs of reveals).
    pub attempts: u32,
    /// Session outcome.
    pub outcome: Outcome,
}

/// Memory card session engine.
#[derive(Clone)]
pub struct MemoryEngine {
    config: MemoryConfig,
    cards: Vec<Card>,
    first: Option<usize>,
    pending_mismatch: Option<(usize, usize)>,
    attempts: u32,
    matched_pairs: u32,
    mismatches: u32,
    outcome: Outcome,
}

impl std::fmt::Debug for MemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEngine")
            .field("config", &self.config)
            .field("cards", &"<hidden>")
            .field("attempts", &self.attempts)
            .field("matched_pairs", &self.matched_pairs)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl MemoryEngine {
    /// Builds a session over a known layout in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config is invalid, the layout has the
    /// wrong size, or a symbol does not appear exactly twice.
    #[instrument(skip(layout), fields(cards = layout.len()))]
    pub fn with_layout(config: MemoryConfig, layout: Vec<Symbol>) -> Result<Self, GameError> {
        config.validate()?;
        if layout.len() != config.cells() {
            return Err(GameError::invalid_config(format!(
                "layout has {} cards, grid needs {}",
                layout.len(),
                config.cells()
            )));
        }
        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for symbol in &layout {
            *counts.entry(*symbol).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(GameError::invalid_config(format!(
                "symbol {symbol} appears {count} times"
            )));
        }

        info!(side = config.side(), "Starting memory session");
        Ok(Self {
            config,
            cards: layout
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    state: CardState::Hidden,
                })
                .collect(),
            first: None,
            pending_mismatch: None,
            attempts: 0,
            matched_pairs: 0,
            mismatches: 0,
            outcome: Outcome::Pending,
        })
    }

    /// Draws `pairs` distinct symbols from the deck and shuffles them in pairs.
    fn shuffled_layout(config: &MemoryConfig, rng: &mut GameRng) -> Result<Vec<Symbol>, GameError> {
        let mut deck: Vec<Symbol> = (0..DECK.len()).filter_map(Symbol::new).collect();
        if config.pairs() > deck.len() {
            return Err(GameError::invalid_config("not enough symbols for the grid"));
        }
        rng.shuffle(&mut deck);
        deck.truncate(config.pairs());

        let mut layout: Vec<Symbol> = deck.iter().chain(deck.iter()).copied().collect();
        rng.shuffle(&mut layout);
        Ok(layout)
    }

    /// Session configuration.
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// All cards, row-major.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Pairs found so far.
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs on the grid.
    pub fn pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// Completed attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Attempts that ended in a mismatch.
    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    /// First card of the open attempt, if any.
    pub fn awaiting(&self) -> Option<usize> {
        self.first
    }

    /// Mismatched pair still face up, if any.
    pub fn pending_mismatch(&self) -> Option<(usize, usize)> {
        self.pending_mismatch
    }

    /// Turns a card face up, first resolving any pending mismatch.
    ///
    /// # Errors
    ///
    /// `InvalidCell` when the index is out of range, the card is matched, or
    /// the card is the open first pick; `SessionOver` once finished.
    #[instrument(skip(self), fields(attempts = self.attempts))]
    pub fn reveal(&mut self, index: usize) -> Result<MemoryFeedback, GameError> {
        ensure_active(self.outcome)?;

        let Some(card) = self.cards.get(index) else {
            warn!(index, "Reveal out of range");
            return Err(GameError::new(GameErrorKind::InvalidCell(index)));
        };
        // Cards of a pending mismatch are about to be flipped back, so they stay pickable.
        if card.state == CardState::Matched || self.first == Some(index) {
            warn!(index, state = %card.state, "Card not available");
            return Err(GameError::new(GameErrorKind::InvalidCell(index)));
        }

        self.flip_back();
        self.cards[index].state = CardState::Revealed;
        let symbol = self.cards[index].symbol;

        let feedback = match self.first.take() {
            None => {
                self.first = Some(index);
                debug!(index, %symbol, "First card up");
                MemoryFeedback::AwaitingSecond { index, symbol }
            }
            Some(first) => {
                self.attempts += 1;
                let first_symbol = self.cards[first].symbol;
                if first_symbol == symbol {
                    self.cards[first].state = CardState::Matched;
                    self.cards[index].state = CardState::Matched;
                    self.matched_pairs += 1;
                    info!(first, second = index, %symbol, "Pair matched");
                    if self.matched_pairs == self.pairs() {
                        info!(attempts = self.attempts, "All pairs matched");
                        self.outcome = Outcome::Won;
                    }
                    MemoryFeedback::Match {
                        first,
                        second: index,
                        symbol,
                    }
                } else {
                    self.pending_mismatch = Some((first, index));
                    self.mismatches += 1;
                    debug!(first, second = index, "Mismatch");
                    MemoryFeedback::Mismatch {
                        first: (first, first_symbol),
                        second: (index, symbol),
                    }
                }
            }
        };

        if cfg!(debug_assertions)
            && let Err(violations) = MemoryInvariants::check_all(self)
        {
            debug_assert!(false, "memory invariants violated: {}", describe(&violations));
        }

        Ok(feedback)
    }

    /// Flips a pending mismatch face down. Returns whether there was one.
    ///
    /// # Errors
    ///
    /// Returns `SessionOver` once finished.
    #[instrument(skip(self))]
    pub fn acknowledge_mismatch(&mut self) -> Result<bool, GameError> {
        ensure_active(self.outcome)?;
        Ok(self.flip_back())
    }

    fn flip_back(&mut self) -> bool {
        match self.pending_mismatch.take() {
            Some((a, b)) => {
                self.cards[a].state = CardState::Hidden;
                self.cards[b].state = CardState::Hidden;
                debug!(a, b, "Mismatch flipped back");
                true
            }
            None => false,
        }
    }
}

impl SessionContract for MemoryEngine {
    type Config = MemoryConfig;
    type Intent = MemoryIntent;
    type Feedback = MemoryFeedback;
    type View = MemoryView;

    const KIND: GameKind = GameKind::Memory;

    #[instrument(skip(rng))]
    fn start(config: MemoryConfig, mut rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let layout = Self::shuffled_layout(&config, &mut rng)?;
        Self::with_layout(config, layout)
    }

    fn step(&mut self, intent: MemoryIntent) -> Result<MemoryFeedback, GameError> {
        match intent {
            MemoryIntent::Reveal(index) => self.reveal(index),
            MemoryIntent::Acknowledge => self
                .acknowledge_mismatch()
                .map(|flipped| MemoryFeedback::Acknowledged { flipped }),
        }
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn view(&self) -> MemoryView {
        MemoryView {
            side: *self.config.side(),
            cards: self
                .cards
                .iter()
                .map(|card| match card.state {
                    CardState::Hidden => CardView::Hidden,
                    CardState::Revealed => CardView::FaceUp(card.symbol),
                    CardState::Matched => CardView::Matched(card.symbol),
                })
                .collect(),
            matched_pairs: self.matched_pairs,
            pairs: self.pairs(),
            attempts: self.attempts,
            outcome: self.outcome,
        }
    }

    #[instrument(skip(self))]
    fn quit(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!(matched = self.matched_pairs, "Memory session quit");
        self.outcome = Outcome::Quit;
        Ok(())
    }

    #[instrument(skip(self))]
    fn expire(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!(matched = self.matched_pairs, "Memory session ran out of time");
        self.outcome = Outcome::Lost;
        Ok(())
    }

    fn metrics(&self, elapsed: Duration) -> Result<Metrics, GameError> {
        ensure_finished(self.outcome)?;
        Ok(Metrics::new(
            self.outcome,
            self.attempts,
            elapsed,
            *self.config.difficulty(),
            Quality::Memory {
                pairs: self.pairs(),
                time_limit: self.config.time_limit(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(i: usize) -> Symbol {
        Symbol::new(i).unwrap()
    }

    /// 4x4 layout where card `i` pairs with card `i + 8`.
    fn layout() -> Vec<Symbol> {
        (0..16).map(|i| sym(i % 8)).collect()
    }

    #[test]
    fn test_random_layout_has_pairs() {
        let game = MemoryEngine::start(MemoryConfig::default(), GameRng::new(12)).unwrap();
        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for card in game.cards() {
            *counts.entry(card.symbol).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_layout_validation() {
        let mut bad = layout();
        bad[0] = sym(9);
        assert!(MemoryEngine::with_layout(MemoryConfig::default(), bad).is_err());
        assert!(MemoryEngine::with_layout(MemoryConfig::default(), vec![sym(0); 2]).is_err());
    }

    #[test]
    fn test_open_pick_rejected() {
        let mut game = MemoryEngine::with_layout(MemoryConfig::default(), layout()).unwrap();
        game.reveal(0).unwrap();
        assert_eq!(
            game.reveal(0).unwrap_err().kind(),
            &GameErrorKind::InvalidCell(0)
        );
        assert_eq!(game.awaiting(), Some(0));
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_mismatched_card_can_be_picked_again() {
        let mut game = MemoryEngine::with_layout(MemoryConfig::default(), layout()).unwrap();
        game.reveal(0).unwrap();
        game.reveal(1).unwrap();
        assert_eq!(game.pending_mismatch(), Some((0, 1)));

        let feedback = game.reveal(1).unwrap();
        assert_eq!(feedback, MemoryFeedback::AwaitingSecond { index: 1, symbol: sym(1) });
        assert_eq!(game.pending_mismatch(), None);
        assert_eq!(game.cards()[0].state, CardState::Hidden);
        assert_eq!(game.cards()[1].state, CardState::Revealed);
    }

    #[test]
    fn test_matched_card_rejected() {
        let mut game = MemoryEngine::with_layout(MemoryConfig::default(), layout()).unwrap();
        game.reveal(3).unwrap();
        let feedback = game.reveal(11).unwrap();
        assert!(matches!(feedback, MemoryFeedback::Match { first: 3, second: 11, .. }));
        assert!(game.reveal(11).is_err());
        assert!(game.reveal(16).is_err());
        assert_eq!(game.matched_pairs(), 1);
    }

    #[test]
    fn test_view_hides_face_down_symbols() {
        let mut game = MemoryEngine::with_layout(MemoryConfig::default(), layout()).unwrap();
        game.reveal(2).unwrap();
        let view = game.view();
        assert_eq!(view.cards[2], CardView::FaceUp(sym(2)));
        assert!(view.cards.iter().enumerate().all(|(i, c)| i == 2 || *c == CardView::Hidden));
    }

    #[test]
    fn test_acknowledge_without_mismatch() {
        let mut game = MemoryEngine::with_layout(MemoryConfig::default(), layout()).unwrap();
        assert!(!game.acknowledge_mismatch().unwrap());
    }
}
