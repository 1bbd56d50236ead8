//! Session-level tests for the tic-tac-toe engine and its opponent.

use arcade_core::{Difficulty, GameErrorKind, GameRng, Outcome, SessionContract};
use arcade_tictactoe::{
    Mark, Position, TicTacToeConfig, TicTacToeEngine, TicTacToeIntent, Verdict, best_move,
    legal_moves, position_value,
};
use proptest::prelude::*;
use std::time::Duration;

fn perfect_opponent(player: Mark) -> TicTacToeEngine {
    let config = TicTacToeConfig::preset(Difficulty::Hard).with_player_mark(player);
    TicTacToeEngine::start(config, GameRng::new(42)).unwrap()
}

/// Branches over every human reply; the opponent always answers.
fn explore(game: TicTacToeEngine, games: &mut usize) {
    if game.is_terminal() {
        assert_ne!(game.outcome(), Outcome::Won, "opponent lost: {:?}", game.history());
        *games += 1;
        return;
    }

    if game.to_move() == game.computer() {
        let mut next = game.clone();
        next.step(TicTacToeIntent::Respond).unwrap();
        if !next.is_terminal() {
            let value = position_value(next.board(), next.player());
            assert!(value <= 0, "human can force a win after {:?}", next.history());
        }
        explore(next, games);
        return;
    }

    for pos in legal_moves(game.board()) {
        let mut next = game.clone();
        next.step(TicTacToeIntent::Place(pos)).unwrap();
        explore(next, games);
    }
}

#[test]
fn test_perfect_opponent_never_loses_as_o() {
    let mut games = 0;
    explore(perfect_opponent(Mark::X), &mut games);
    assert!(games > 0);
}

#[test]
fn test_perfect_opponent_never_loses_as_x() {
    let mut games = 0;
    explore(perfect_opponent(Mark::O), &mut games);
    assert!(games > 0);
}

#[test]
fn test_optimal_draw_scores_human_perfect_but_not_opponent() {
    let mut game = perfect_opponent(Mark::X);
    game.step(TicTacToeIntent::Place(Position::Center)).unwrap();

    while !game.is_terminal() {
        if game.to_move() == game.computer() {
            game.step(TicTacToeIntent::Respond).unwrap();
        } else {
            let pos = best_move(game.board(), game.player()).unwrap();
            game.step(TicTacToeIntent::Place(pos)).unwrap();
        }
    }

    assert_eq!(game.outcome(), Outcome::Draw);

    let human = game.score(Duration::from_secs(30)).unwrap();
    assert!(human.score() > &0);
    assert!(*human.perfect());

    let computer = game.computer_score(Duration::from_secs(30)).unwrap();
    assert!(!*computer.perfect());
    assert_eq!(game.missed_wins(game.computer()), 0);
    assert_eq!(game.missed_wins(game.player()), 0);
}

#[test]
fn test_human_win_and_loss_feed_outcome() {
    // Random opponent, human always takes the lowest free square.
    let config = TicTacToeConfig::preset(Difficulty::Easy).with_ai_strength(Some(0.0));
    for seed in 0..20 {
        let mut game = TicTacToeEngine::start(config.clone(), GameRng::new(seed)).unwrap();
        while !game.is_terminal() {
            if game.to_move() == game.computer() {
                let report = game.step(TicTacToeIntent::Respond).unwrap();
                assert_eq!(report.played.mark, Mark::O);
            } else {
                let pos = legal_moves(game.board())[0];
                game.step(TicTacToeIntent::Place(pos)).unwrap();
            }
        }
        let expected = match arcade_tictactoe::evaluate_terminal(game.board()) {
            Verdict::Win(Mark::X) => Outcome::Won,
            Verdict::Win(Mark::O) => Outcome::Lost,
            Verdict::Draw => Outcome::Draw,
            Verdict::NonTerminal => unreachable!(),
        };
        assert_eq!(game.outcome(), expected);
        assert!(game.score(Duration::ZERO).is_ok());
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = TicTacToeConfig::preset(Difficulty::Medium);
    let play = || {
        let mut game = TicTacToeEngine::start(config.clone(), GameRng::new(7)).unwrap();
        while !game.is_terminal() {
            if game.to_move() == game.computer() {
                game.step(TicTacToeIntent::Respond).unwrap();
            } else {
                let pos = legal_moves(game.board())[0];
                game.step(TicTacToeIntent::Place(pos)).unwrap();
            }
        }
        game.history().to_vec()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_terminal_session_rejects_intents() {
    let mut game = perfect_opponent(Mark::X);
    game.quit().unwrap();
    assert_eq!(game.outcome(), Outcome::Quit);
    assert_eq!(game.score(Duration::ZERO).unwrap().score(), &0);

    let err = game.step(TicTacToeIntent::Place(Position::Center)).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::SessionOver);
    assert!(game.quit().is_err());
}

#[test]
fn test_pending_session_has_no_score() {
    let game = perfect_opponent(Mark::X);
    let err = game.score(Duration::ZERO).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::SessionNotFinished);
}

#[test]
fn test_timeout_is_a_loss() {
    let mut game = perfect_opponent(Mark::X);
    game.expire().unwrap();
    assert_eq!(game.outcome(), Outcome::Lost);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_games_end_consistently(
        seed in any::<u64>(),
        strength in 0.0f64..=1.0,
        player_o in any::<bool>(),
        picks in prop::collection::vec(0usize..9, 9),
    ) {
        let player = if player_o { Mark::O } else { Mark::X };
        let config = TicTacToeConfig::default()
            .with_ai_strength(Some(strength))
            .with_player_mark(player);
        let mut game = TicTacToeEngine::start(config, GameRng::new(seed)).unwrap();
        let mut picks = picks.into_iter();

        while !game.is_terminal() {
            if game.to_move() == game.computer() {
                game.step(TicTacToeIntent::Respond).unwrap();
            } else {
                let legal = legal_moves(game.board());
                let pick = picks.next().unwrap_or(0) % legal.len();
                game.step(TicTacToeIntent::Place(legal[pick])).unwrap();
            }
            prop_assert!(game.history().len() <= 9);
        }

        let expected = match arcade_tictactoe::evaluate_terminal(game.board()) {
            Verdict::Win(mark) if mark == player => Outcome::Won,
            Verdict::Win(_) => Outcome::Lost,
            Verdict::Draw => Outcome::Draw,
            Verdict::NonTerminal => Outcome::Pending,
        };
        prop_assert_eq!(game.outcome(), expected);
        prop_assert!(game.score(Duration::ZERO).is_ok());
        prop_assert!(game.computer_score(Duration::ZERO).is_ok());
    }
}
