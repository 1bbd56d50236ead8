//! Tests for the guess engine lifecycle.

use arcade_core::{Difficulty, GameErrorKind, GameRng, Outcome, SessionContract};
use arcade_guess::{GuessConfig, GuessEngine, Hint};
use std::time::Duration;

#[test]
fn test_range_boundaries() {
    let config = GuessConfig::preset(Difficulty::Medium);
    let mut game = GuessEngine::with_secret(config, 50).unwrap();

    for value in [0, 101] {
        let err = game.guess(value).unwrap_err();
        assert!(matches!(err.kind(), GameErrorKind::InvalidInput(_)));
    }
    assert_eq!(game.attempts(), 0, "rejected guesses consume no attempt");

    assert_eq!(game.guess(1).unwrap(), Hint::TooLow);
    assert_eq!(game.guess(100).unwrap(), Hint::TooHigh);
    assert_eq!(game.attempts(), 2);
}

#[test]
fn test_full_domain_session_scores() {
    let config = GuessConfig::default()
        .with_low(i64::MIN)
        .with_high(i64::MAX)
        .with_max_attempts(None);
    let mut game = GuessEngine::start(config, GameRng::new(9)).unwrap();

    game.guess(0).unwrap();
    assert_eq!(game.attempts(), 1);
    game.quit().unwrap();
    let record = game.score(Duration::from_secs(3)).unwrap();
    assert_eq!(*record.score(), 0);
    assert_eq!(*record.attempts(), 1);
}

#[test]
fn test_cap_exhaustion_loses() {
    let config = GuessConfig::preset(Difficulty::Expert);
    let mut game = GuessEngine::with_secret(config, 250).unwrap();

    for _ in 0..4 {
        game.guess(1).unwrap();
        assert_eq!(game.outcome(), Outcome::Pending);
    }
    game.guess(1).unwrap();
    assert_eq!(game.outcome(), Outcome::Lost);

    let record = game.score(Duration::from_secs(30)).unwrap();
    assert_eq!(*record.score(), 50 * 4);
    assert!(!record.perfect());
}

#[test]
fn test_uncapped_never_loses() {
    let config = GuessConfig::default().with_max_attempts(None);
    let mut game = GuessEngine::with_secret(config, 99).unwrap();
    for _ in 0..50 {
        game.guess(1).unwrap();
    }
    assert_eq!(game.outcome(), Outcome::Pending);
    assert_eq!(game.view().remaining, None);
}

#[test]
fn test_score_requires_terminal_session() {
    let game = GuessEngine::with_secret(GuessConfig::default(), 3).unwrap();
    let err = game.score(Duration::ZERO).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::SessionNotFinished);
}

#[test]
fn test_first_try_is_perfect() {
    let mut game = GuessEngine::with_secret(GuessConfig::default(), 64).unwrap();
    game.guess(64).unwrap();
    let record = game.score(Duration::from_secs(2)).unwrap();
    assert!(record.perfect());
    assert_eq!(*record.attempts(), 1);
}

#[test]
fn test_quit_scores_zero() {
    let mut game = GuessEngine::with_secret(GuessConfig::default(), 64).unwrap();
    game.guess(10).unwrap();
    game.quit().unwrap();
    assert_eq!(game.outcome(), Outcome::Quit);
    assert_eq!(*game.score(Duration::ZERO).unwrap().score(), 0);
    assert!(game.quit().is_err());
}

#[test]
fn test_same_seed_replays_identically() {
    let play = |seed: u64| {
        let mut game = GuessEngine::start(GuessConfig::default(), GameRng::new(seed)).unwrap();
        let (mut low, mut high) = (1, 100);
        let mut hints = Vec::new();
        while !game.is_terminal() {
            let mid = (low + high) / 2;
            let hint = game.step(mid).unwrap();
            match hint {
                Hint::TooLow => low = mid + 1,
                Hint::TooHigh => high = mid - 1,
                Hint::Correct => {}
            }
            hints.push(hint);
        }
        (hints, game.score(Duration::from_secs(9)).unwrap())
    };

    assert_eq!(play(11), play(11));
}

#[test]
fn test_invalid_config_aborts_start() {
    let config = GuessConfig::default().with_low(5).with_high(1);
    let err = GuessEngine::start(config, GameRng::new(0)).unwrap_err();
    assert!(!err.is_recoverable());
}
