//! Strictly Noughts library - N×N noughts and crosses
//!
//! A game engine for two players, human or automated, on a square board of
//! any size. A line (row, column or either diagonal) of N matching marks wins.
//!
//! # Architecture
//!
//! - **Games**: board, positions, moves, win/draw rules, heuristic player
//! - **Store**: in-memory keyed storage for players and games
//! - **Engine**: the turn loop driving one game to a terminal state
//! - **Service**: input validation, coin toss, match setup
//! - **Batch**: many computer-vs-computer games at once
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_noughts::{ConsoleRenderer, GameService, GameStore, MatchSetup, ScriptedInput};
//!
//! # fn example() -> Result<(), strictly_noughts::GameError> {
//! let service = GameService::new(Arc::new(GameStore::new()));
//! let setup = MatchSetup::human_vs_computer("Alice", "Computer", 3);
//! let mut input = ScriptedInput::new(["1", "9", "7"]);
//! let mut renderer = ConsoleRenderer::new(std::io::stdout());
//! let game = service.play_match(&setup, &mut input, &mut renderer)?;
//! println!("{}", game.state());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod batch;
mod config;
mod engine;
mod error;
mod games;
mod io;
mod service;
mod store;

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Game types
pub use games::grid::{
    Board, Game, GameState, Mark, Move, Player, PlayerKind, PlayerType, Position, Square,
    Strategy, choose_move, find_winning_move, position_to_row_col, resolve_legal,
    row_col_to_position,
};

// Crate-level exports - Rules
pub use games::grid::rules::{check_win, completes_line, is_full};

// Crate-level exports - Storage
pub use store::{GameId, GameStore, PlayerId};

// Crate-level exports - Engine and I/O seams
pub use engine::{GameEngine, InvalidInputPolicy};
pub use io::{ConsoleRenderer, LineInput, MoveInput, Renderer, ScriptedInput, TracingRenderer};

// Crate-level exports - Service, config, batch
pub use batch::{BatchSummary, run_batch};
pub use config::{ConfigError, MatchConfig};
pub use service::{GameService, MatchSetup};
