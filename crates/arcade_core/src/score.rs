//! Score model: pure conversion of session metrics into a [`ScoreRecord`].
//!
//! Every formula is non-increasing in attempts and elapsed time and
//! non-decreasing in the difficulty weight when the other inputs are held
//! fixed. The perfect-play predicate is defined per game in [`Quality`].

use crate::{Difficulty, Outcome};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Lower bound on a winning score for the guess and memory games.
pub const MIN_WINNING_SCORE: u64 = 100;

/// Final result of one terminated session, handed to the player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct ScoreRecord {
    score: u64,
    perfect: bool,
    elapsed: Duration,
    attempts: u32,
}

/// Which seat a tic-tac-toe record is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The human at the keyboard.
    Player,
    /// The minimax opponent.
    Computer,
}

/// Game-specific quality signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Quality {
    /// Number guessing.
    Guess {
        /// Attempt budget: the cap, or the bisection bound when uncapped.
        budget: u32,
    },
    /// Tic-tac-toe, scored for one seat.
    TicTacToe {
        /// Seat the record describes.
        seat: Seat,
        /// Turns where the seat had an immediate win and played elsewhere.
        missed_wins: u32,
        /// Turns the other seat began with an immediate win available.
        opponent_chances: u32,
    },
    /// Snake.
    Snake {
        /// Points accumulated from food, each worth `10 * level` when eaten.
        food_points: u64,
        /// Final body length.
        length: usize,
        /// Final level.
        level: u32,
        /// Whether the body covered every cell of the grid.
        filled: bool,
    },
    /// Memory cards.
    Memory {
        /// Number of pairs on the grid.
        pairs: u32,
        /// Optional time limit; no time bonus without one.
        time_limit: Option<Duration>,
    },
}

/// Raw performance metrics of a terminated session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct Metrics {
    outcome: Outcome,
    attempts: u32,
    elapsed: Duration,
    difficulty: Difficulty,
    quality: Quality,
}

/// Converts metrics into a score record.
#[instrument]
pub fn score(metrics: &Metrics) -> ScoreRecord {
    let weight = metrics.difficulty.weight();
    let attempts = metrics.attempts;
    let outcome = metrics.outcome;

    let (points, perfect) = match metrics.quality {
        Quality::Guess { budget } => guess_points(outcome, attempts, budget, weight),
        Quality::TicTacToe {
            seat,
            missed_wins,
            opponent_chances,
        } => tictactoe_points(outcome, attempts, weight, seat, missed_wins, opponent_chances),
        Quality::Snake {
            food_points,
            length,
            level,
            filled,
        } => {
            let base = food_points + 5 * length as u64 + 50 * u64::from(level);
            (weight * base, filled && outcome == Outcome::Won)
        }
        Quality::Memory { pairs, time_limit } => {
            memory_points(outcome, attempts, metrics.elapsed, weight, pairs, time_limit)
        }
    };

    debug!(points, perfect, ?outcome, "Scored session");
    ScoreRecord::new(points, perfect, metrics.elapsed, attempts)
}

fn guess_points(outcome: Outcome, attempts: u32, budget: u32, weight: u64) -> (u64, bool) {
    match outcome {
        Outcome::Won => {
            let attempt_bonus = 100 * u64::from(budget.saturating_sub(attempts));
            let total = 1000 + attempt_bonus + 200 * weight;
            (total.max(MIN_WINNING_SCORE), attempts == 1)
        }
        Outcome::Lost => (50 * weight, false),
        _ => (0, false),
    }
}

fn tictactoe_points(
    outcome: Outcome,
    moves: u32,
    weight: u64,
    seat: Seat,
    missed_wins: u32,
    opponent_chances: u32,
) -> (u64, bool) {
    let base = match outcome {
        Outcome::Won => 1000 + 50 * u64::from(9u32.saturating_sub(moves)),
        Outcome::Draw => 500,
        Outcome::Lost => 100,
        Outcome::Pending | Outcome::Quit => return (0, false),
    };

    // The computer only counts a win as perfect; a draw is not held against
    // it (missed_wins stays 0) but is not perfect either.
    let perfect = match seat {
        Seat::Player => {
            outcome != Outcome::Lost && missed_wins == 0 && opponent_chances == 0
        }
        Seat::Computer => outcome == Outcome::Won && missed_wins == 0,
    };

    (base + 200 * weight, perfect)
}

fn memory_points(
    outcome: Outcome,
    attempts: u32,
    elapsed: Duration,
    weight: u64,
    pairs: u32,
    time_limit: Option<Duration>,
) -> (u64, bool) {
    if outcome != Outcome::Won {
        return (0, false);
    }

    let time_bonus = time_limit
        .map(|limit| (limit.saturating_sub(elapsed).as_secs_f64() * 5.0) as u64)
        .unwrap_or(0);

    let optimal = u64::from(pairs) + 2;
    let efficiency_bonus = (2 * optimal).saturating_sub(u64::from(attempts)) * 10;

    // A won game needs at least `pairs` attempts, so this means no mismatch.
    let perfect = attempts <= pairs;
    let perfect_bonus = if perfect { 500 } else { 0 };

    let total = 1000 * weight + time_bonus + efficiency_bonus + perfect_bonus;
    (total.max(MIN_WINNING_SCORE), perfect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(attempts: u32, difficulty: Difficulty) -> ScoreRecord {
        score(&Metrics::new(
            Outcome::Won,
            attempts,
            Duration::from_secs(10),
            difficulty,
            Quality::Guess { budget: 8 },
        ))
    }

    #[test]
    fn test_guess_first_try_is_perfect() {
        let record = guess(1, Difficulty::Medium);
        assert!(record.perfect());
        assert_eq!(*record.score(), 1000 + 700 + 400);
    }

    #[test]
    fn test_guess_over_budget_keeps_floor() {
        let record = guess(12, Difficulty::Easy);
        assert_eq!(*record.score(), 1200);
        assert!(!record.perfect());
    }

    #[test]
    fn test_guess_lost_gets_consolation() {
        let record = score(&Metrics::new(
            Outcome::Lost,
            8,
            Duration::ZERO,
            Difficulty::Hard,
            Quality::Guess { budget: 8 },
        ));
        assert_eq!(*record.score(), 150);
    }

    #[test]
    fn test_tictactoe_draw_perfect_for_player_only() {
        let player = score(&Metrics::new(
            Outcome::Draw,
            4,
            Duration::ZERO,
            Difficulty::Hard,
            Quality::TicTacToe {
                seat: Seat::Player,
                missed_wins: 0,
                opponent_chances: 0,
            },
        ));
        let computer = score(&Metrics::new(
            Outcome::Draw,
            5,
            Duration::ZERO,
            Difficulty::Hard,
            Quality::TicTacToe {
                seat: Seat::Computer,
                missed_wins: 0,
                opponent_chances: 0,
            },
        ));
        assert!(player.perfect());
        assert!(!computer.perfect());
        assert_eq!(*player.score(), 1100);
    }

    #[test]
    fn test_quit_scores_zero_except_snake() {
        let quit_guess = score(&Metrics::new(
            Outcome::Quit,
            2,
            Duration::ZERO,
            Difficulty::Easy,
            Quality::Guess { budget: 10 },
        ));
        assert_eq!(*quit_guess.score(), 0);

        let quit_snake = score(&Metrics::new(
            Outcome::Quit,
            1,
            Duration::ZERO,
            Difficulty::Easy,
            Quality::Snake {
                food_points: 30,
                length: 4,
                level: 1,
                filled: false,
            },
        ));
        assert_eq!(*quit_snake.score(), 30 + 20 + 50);
    }

    #[test]
    fn test_memory_time_bonus_and_perfect() {
        let record = score(&Metrics::new(
            Outcome::Won,
            8,
            Duration::from_secs(100),
            Difficulty::Easy,
            Quality::Memory {
                pairs: 8,
                time_limit: Some(Duration::from_secs(120)),
            },
        ));
        // 1000 + 20s * 5 + (20 - 8) * 10 + 500
        assert_eq!(*record.score(), 1000 + 100 + 120 + 500);
        assert!(record.perfect());
    }
}
