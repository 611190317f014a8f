//! N×N noughts and crosses: board, moves, rules and the automated player.

mod action;
mod game;
mod player;
mod position;
pub mod rules;
mod strategy;
mod types;

pub use action::Move;
pub use game::Game;
pub use player::{Player, PlayerKind, PlayerType, Strategy};
pub use position::{Position, position_to_row_col, resolve_legal, row_col_to_position};
pub use strategy::{choose_move, find_winning_move};
pub use types::{Board, GameState, Mark, Square};
