//! Monotonicity properties of the score model.

use arcade_core::{Difficulty, Metrics, Outcome, Quality, Seat, score};
use proptest::prelude::*;
use std::time::Duration;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
        Just(Difficulty::Expert),
    ]
}

fn quality() -> impl Strategy<Value = Quality> {
    prop_oneof![
        (1u32..12).prop_map(|budget| Quality::Guess { budget }),
        (0u32..3, 0u32..3, any::<bool>()).prop_map(|(missed_wins, opponent_chances, player)| {
            Quality::TicTacToe {
                seat: if player { Seat::Player } else { Seat::Computer },
                missed_wins,
                opponent_chances,
            }
        }),
        (0u64..500, 1usize..50, 1u32..10, any::<bool>()).prop_map(
            |(food_points, length, level, filled)| Quality::Snake {
                food_points,
                length,
                level,
                filled,
            }
        ),
        (8u32..33, proptest::option::of(60u64..300)).prop_map(|(pairs, limit)| {
            Quality::Memory {
                pairs,
                time_limit: limit.map(Duration::from_secs),
            }
        }),
    ]
}

fn outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Won),
        Just(Outcome::Lost),
        Just(Outcome::Draw),
        Just(Outcome::Quit),
    ]
}

proptest! {
    #[test]
    fn more_attempts_never_score_higher(
        outcome in outcome(),
        attempts in 1u32..40,
        secs in 0u64..400,
        difficulty in difficulty(),
        quality in quality(),
    ) {
        let elapsed = Duration::from_secs(secs);
        let fewer = score(&Metrics::new(outcome, attempts, elapsed, difficulty, quality));
        let more = score(&Metrics::new(outcome, attempts + 1, elapsed, difficulty, quality));
        prop_assert!(more.score() <= fewer.score());
    }

    #[test]
    fn more_time_never_scores_higher(
        outcome in outcome(),
        attempts in 1u32..40,
        secs in 0u64..400,
        extra in 1u64..100,
        difficulty in difficulty(),
        quality in quality(),
    ) {
        let sooner = score(&Metrics::new(outcome, attempts, Duration::from_secs(secs), difficulty, quality));
        let later = score(&Metrics::new(outcome, attempts, Duration::from_secs(secs + extra), difficulty, quality));
        prop_assert!(later.score() <= sooner.score());
    }

    #[test]
    fn harder_difficulty_never_scores_lower(
        outcome in outcome(),
        attempts in 1u32..40,
        secs in 0u64..400,
        quality in quality(),
    ) {
        let elapsed = Duration::from_secs(secs);
        let mut previous = 0;
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
            let record = score(&Metrics::new(outcome, attempts, elapsed, difficulty, quality));
            prop_assert!(*record.score() >= previous);
            previous = *record.score();
        }
    }
}

#[test]
fn test_record_keeps_metrics() {
    let record = score(&Metrics::new(
        Outcome::Won,
        3,
        Duration::from_secs(42),
        Difficulty::Medium,
        Quality::Guess { budget: 8 },
    ));
    assert_eq!(*record.attempts(), 3);
    assert_eq!(*record.elapsed(), Duration::from_secs(42));
}

#[test]
fn test_record_serializes() {
    let record = score(&Metrics::new(
        Outcome::Won,
        1,
        Duration::from_secs(5),
        Difficulty::Easy,
        Quality::Guess { budget: 10 },
    ));
    let json = serde_json::to_string(&record).unwrap();
    let back: arcade_core::ScoreRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
