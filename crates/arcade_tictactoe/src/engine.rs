//! Tic-tac-toe session: a human against the minimax opponent.

use super::invariants::TicTacToeInvariants;
use super::rules::{Verdict, evaluate_terminal};
use super::search::{self, AiStrength};
use super::{Board, Mark, Move, Position, TicTacToeConfig};
use arcade_core::invariant::describe;
use arcade_core::{
    GameError, GameKind, GameRng, InvariantSet, Metrics, Outcome, Quality, ScoreRecord, Seat,
    SessionContract, ensure_active, ensure_finished, score,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Driver intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicTacToeIntent {
    /// The human places a mark.
    Place(Position),
    /// The opponent picks and places its mark.
    Respond,
}

/// Result of one placed mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The move that was made.
    pub played: Move,
    /// Board verdict after the move.
    pub verdict: Verdict,
}

/// Render snapshot; the whole board is public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeView {
    /// Current board.
    pub board: Board,
    /// Side to move.
    pub to_move: Mark,
    /// The human's mark.
    pub player: Mark,
    /// Most recent move.
    pub last_move: Option<Move>,
    /// Session outcome from the human's side.
    pub outcome: Outcome,
}

/// Per-seat play quality counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SeatStats {
    moves: u32,
    /// Turns begun with an immediate win available.
    chances: u32,
    /// Of those, turns where the win was not taken.
    missed_wins: u32,
}

/// Tic-tac-toe session engine.
#[derive(Debug, Clone)]
pub struct TicTacToeEngine {
    config: TicTacToeConfig,
    strength: AiStrength,
    board: Board,
    to_move: Mark,
    history: Vec<Move>,
    outcome: Outcome,
    rng: GameRng,
    x_stats: SeatStats,
    o_stats: SeatStats,
}

impl TicTacToeEngine {
    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// The human's mark.
    pub fn player(&self) -> Mark {
        *self.config.player_mark()
    }

    /// The opponent's mark.
    pub fn computer(&self) -> Mark {
        self.player().opponent()
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Effective opponent strength.
    pub fn strength(&self) -> AiStrength {
        self.strength
    }

    /// Places the human's mark.
    ///
    /// # Errors
    ///
    /// `InvalidInput` out of turn, `InvalidCell` on an occupied square,
    /// `SessionOver` once finished.
    #[instrument(skip(self), fields(player = %self.player()))]
    pub fn place(&mut self, pos: Position) -> Result<MoveReport, GameError> {
        ensure_active(self.outcome)?;
        if self.to_move != self.player() {
            warn!("Human tried to move out of turn");
            return Err(GameError::invalid_input("not your turn"));
        }
        self.play(pos)
    }

    /// Lets the opponent choose and place its mark.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when it is the human's turn, `SessionOver` once finished.
    #[instrument(skip(self), fields(computer = %self.computer()))]
    pub fn respond(&mut self) -> Result<MoveReport, GameError> {
        ensure_active(self.outcome)?;
        if self.to_move != self.computer() {
            warn!("Opponent asked to move out of turn");
            return Err(GameError::invalid_input("not the opponent's turn"));
        }
        let pos = search::choose_move(&self.board, self.to_move, self.strength, &mut self.rng)?;
        self.play(pos)
    }

    fn play(&mut self, pos: Position) -> Result<MoveReport, GameError> {
        let mark = self.to_move;
        let next = search::apply(&self.board, pos, mark)?;

        let wins = search::immediate_wins(&self.board, mark);
        let stats = self.stats_mut(mark);
        stats.moves += 1;
        if !wins.is_empty() {
            stats.chances += 1;
            if !wins.contains(&pos) {
                stats.missed_wins += 1;
                debug!(%mark, position = %pos, "Immediate win passed up");
            }
        }

        self.board = next;
        let played = Move::new(mark, pos);
        self.history.push(played);
        self.to_move = mark.opponent();

        let verdict = evaluate_terminal(&self.board);
        self.outcome = match verdict {
            Verdict::Win(winner) if winner == self.player() => Outcome::Won,
            Verdict::Win(_) => Outcome::Lost,
            Verdict::Draw => Outcome::Draw,
            Verdict::NonTerminal => Outcome::Pending,
        };

        if cfg!(debug_assertions)
            && let Err(violations) = TicTacToeInvariants::check_all(self)
        {
            debug_assert!(false, "tic-tac-toe invariants violated: {}", describe(&violations));
        }

        info!(%played, ?verdict, "Mark placed");
        Ok(MoveReport { played, verdict })
    }

    fn stats(&self, mark: Mark) -> SeatStats {
        match mark {
            Mark::X => self.x_stats,
            Mark::O => self.o_stats,
        }
    }

    fn stats_mut(&mut self, mark: Mark) -> &mut SeatStats {
        match mark {
            Mark::X => &mut self.x_stats,
            Mark::O => &mut self.o_stats,
        }
    }

    /// Turns where `mark` had an immediate win and played elsewhere.
    pub fn missed_wins(&self, mark: Mark) -> u32 {
        self.stats(mark).missed_wins
    }

    fn seat_metrics(&self, seat: Seat, elapsed: Duration) -> Result<Metrics, GameError> {
        ensure_finished(self.outcome)?;
        let (mark, outcome) = match seat {
            Seat::Player => (self.player(), self.outcome),
            Seat::Computer => (
                self.computer(),
                match self.outcome {
                    Outcome::Won => Outcome::Lost,
                    Outcome::Lost => Outcome::Won,
                    other => other,
                },
            ),
        };
        let own = self.stats(mark);
        let other = self.stats(mark.opponent());
        Ok(Metrics::new(
            outcome,
            own.moves,
            elapsed,
            *self.config.difficulty(),
            Quality::TicTacToe {
                seat,
                missed_wins: own.missed_wins,
                opponent_chances: other.chances,
            },
        ))
    }

    /// Score record from the opponent's side of the board.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFinished` while the game is pending.
    pub fn computer_score(&self, elapsed: Duration) -> Result<ScoreRecord, GameError> {
        self.seat_metrics(Seat::Computer, elapsed)
            .map(|metrics| score(&metrics))
    }

    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self, pos: Position, mark: Mark) {
        self.board.set(pos, super::Square::Occupied(mark));
    }
}

impl SessionContract for TicTacToeEngine {
    type Config = TicTacToeConfig;
    type Intent = TicTacToeIntent;
    type Feedback = MoveReport;
    type View = TicTacToeView;

    const KIND: GameKind = GameKind::TicTacToe;

    #[instrument(skip(rng))]
    fn start(config: TicTacToeConfig, rng: GameRng) -> Result<Self, GameError> {
        let strength = config.strength()?;
        info!(
            player = %config.player_mark(),
            strength = strength.probability(),
            "Starting tic-tac-toe session"
        );
        Ok(Self {
            config,
            strength,
            board: Board::new(),
            to_move: Mark::X,
            history: Vec::new(),
            outcome: Outcome::Pending,
            rng,
            x_stats: SeatStats::default(),
            o_stats: SeatStats::default(),
        })
    }

    fn step(&mut self, intent: TicTacToeIntent) -> Result<MoveReport, GameError> {
        match intent {
            TicTacToeIntent::Place(pos) => self.place(pos),
            TicTacToeIntent::Respond => self.respond(),
        }
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn view(&self) -> TicTacToeView {
        TicTacToeView {
            board: self.board,
            to_move: self.to_move,
            player: self.player(),
            last_move: self.history.last().copied(),
            outcome: self.outcome,
        }
    }

    #[instrument(skip(self))]
    fn quit(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!(moves = self.history.len(), "Tic-tac-toe session quit");
        self.outcome = Outcome::Quit;
        Ok(())
    }

    #[instrument(skip(self))]
    fn expire(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome)?;
        info!("Tic-tac-toe session timed out");
        self.outcome = Outcome::Lost;
        Ok(())
    }

    fn metrics(&self, elapsed: Duration) -> Result<Metrics, GameError> {
        self.seat_metrics(Seat::Player, elapsed)
    }
}
