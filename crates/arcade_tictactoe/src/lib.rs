//! Tic-tac-toe for the arcade: board, rules, minimax opponent and session engine.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Square`] and named [`Position`]s
//! - **Rules**: pure win/draw detection in [`rules`]
//! - **Search**: full minimax with a strength knob in [`search`]
//! - **Engine**: [`TicTacToeEngine`], a human against the opponent under the
//!   shared session contract
//! - **Invariants**: board consistency checks in [`invariants`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod engine;
pub mod invariants;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use action::Move;
pub use config::TicTacToeConfig;
pub use engine::{MoveReport, TicTacToeEngine, TicTacToeIntent, TicTacToeView};
pub use position::Position;
pub use rules::{Verdict, evaluate_terminal};
pub use search::{
    AiStrength, apply, best_move, choose_move, immediate_wins, legal_moves, minimax, move_values,
    position_value,
};
pub use types::{Board, Mark, Square};
