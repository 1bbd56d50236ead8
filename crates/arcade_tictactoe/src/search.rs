//! Adversarial search: full minimax over the 3x3 game tree.
//!
//! Terminal positions score `10 - depth` for a win by the searching side,
//! `depth - 10` for a loss and `0` for a draw, so faster wins and slower
//! losses are preferred. Among equal-valued moves the first in ascending
//! index order wins. No pruning: the tree has at most 9 plies.

use super::rules::{Verdict, evaluate_terminal};
use super::{Board, Mark, Position, Square};
use arcade_core::{GameError, GameErrorKind, GameRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

const WIN_SCORE: i32 = 10;

/// Probability in `[0, 1]` that the opponent plays the minimax move.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AiStrength(f64);

impl AiStrength {
    /// Always plays the optimal move.
    pub const PERFECT: AiStrength = AiStrength(1.0);

    /// Validates a probability.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 <= p <= 1`.
    pub fn new(probability: f64) -> Result<Self, GameError> {
        if (0.0..=1.0).contains(&probability) {
            Ok(Self(probability))
        } else {
            Err(GameError::invalid_config(format!(
                "AI strength {} outside [0, 1]",
                probability
            )))
        }
    }

    /// The probability.
    pub fn probability(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AiStrength {
    type Error = GameError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AiStrength> for f64 {
    fn from(value: AiStrength) -> Self {
        value.0
    }
}

/// Empty squares in ascending index order.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::iter().filter(|pos| board.is_empty(*pos)).collect()
}

/// Returns a copy of `board` with `mark` placed at `pos`.
///
/// # Errors
///
/// `NoLegalMove` if the board is already decided, `InvalidCell` if the square
/// is occupied, `InvalidInput` if it is not `mark`'s turn.
pub fn apply(board: &Board, pos: Position, mark: Mark) -> Result<Board, GameError> {
    if evaluate_terminal(board).is_terminal() {
        return Err(GameError::new(GameErrorKind::NoLegalMove));
    }
    if !board.is_empty(pos) {
        return Err(GameError::new(GameErrorKind::InvalidCell(pos.to_index())));
    }
    if mark != board.next_mark() {
        return Err(GameError::invalid_input(format!("{mark} is not to move")));
    }
    let mut next = *board;
    next.set(pos, Square::Occupied(mark));
    Ok(next)
}

/// Squares where `mark` would complete a line right now.
pub fn immediate_wins(board: &Board, mark: Mark) -> Vec<Position> {
    if evaluate_terminal(board).is_terminal() {
        return Vec::new();
    }
    legal_moves(board)
        .into_iter()
        .filter(|&pos| {
            let mut next = *board;
            next.set(pos, Square::Occupied(mark));
            evaluate_terminal(&next) == Verdict::Win(mark)
        })
        .collect()
}

/// Minimax value of `board` for `me`.
///
/// `is_maximizing` is true when `me` is to move.
pub fn minimax(board: &Board, depth: i32, is_maximizing: bool, me: Mark) -> i32 {
    match evaluate_terminal(board) {
        Verdict::Win(winner) if winner == me => return WIN_SCORE - depth,
        Verdict::Win(_) => return depth - WIN_SCORE,
        Verdict::Draw => return 0,
        Verdict::NonTerminal => {}
    }

    let mover = if is_maximizing { me } else { me.opponent() };
    let children = legal_moves(board).into_iter().map(|pos| {
        let mut next = *board;
        next.set(pos, Square::Occupied(mover));
        minimax(&next, depth + 1, !is_maximizing, me)
    });

    if is_maximizing {
        children.max().unwrap_or(0)
    } else {
        children.min().unwrap_or(0)
    }
}

/// Value of the position for the side to move: positive means it can force
/// a win, zero a draw, negative a loss.
pub fn position_value(board: &Board, to_move: Mark) -> i32 {
    minimax(board, 0, true, to_move)
}

/// Minimax value of every legal move for `mark`, in ascending index order.
pub fn move_values(board: &Board, mark: Mark) -> Vec<(Position, i32)> {
    legal_moves(board)
        .into_iter()
        .map(|pos| {
            let mut next = *board;
            next.set(pos, Square::Occupied(mark));
            (pos, minimax(&next, 0, false, mark))
        })
        .collect()
}

/// The optimal move for `mark`; ties go to the lowest index.
///
/// # Errors
///
/// Returns `NoLegalMove` if the board is already terminal.
pub fn best_move(board: &Board, mark: Mark) -> Result<Position, GameError> {
    if evaluate_terminal(board).is_terminal() {
        return Err(GameError::new(GameErrorKind::NoLegalMove));
    }
    optimal(board, mark).ok_or_else(|| GameError::new(GameErrorKind::NoLegalMove))
}

fn optimal(board: &Board, mark: Mark) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for (pos, value) in move_values(board, mark) {
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Picks the opponent's move at the given strength.
///
/// With probability `strength` the minimax move is played; otherwise a
/// legal move is sampled uniformly (which may still be the optimal one).
///
/// # Errors
///
/// Returns `NoLegalMove` if the board is already terminal; callers should
/// check [`evaluate_terminal`] first.
#[instrument(skip(board, rng), fields(strength = strength.probability()))]
pub fn choose_move(
    board: &Board,
    mark: Mark,
    strength: AiStrength,
    rng: &mut GameRng,
) -> Result<Position, GameError> {
    if evaluate_terminal(board).is_terminal() {
        return Err(GameError::new(GameErrorKind::NoLegalMove));
    }

    // A board that is not terminal always has an empty square.
    let pos = if rng.gen_bool(strength.probability()) {
        let pos = optimal(board, mark);
        debug!(position = ?pos, "Playing minimax move");
        pos
    } else {
        let pos = rng.choose(&legal_moves(board)).copied();
        debug!(position = ?pos, "Playing random move");
        pos
    };
    pos.ok_or_else(|| GameError::new(GameErrorKind::NoLegalMove))
}
