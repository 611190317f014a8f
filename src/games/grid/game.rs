//! The game record owned by the store and advanced by the engine.

use derive_getters::Getters;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::action::Move;
use super::player::{Player, PlayerKind};
use super::types::{Board, GameState};
use crate::{GameError, GameErrorKind, GameId, PlayerId};

/// One match between two players on an N×N board.
///
/// The game exclusively owns its board and move list. Once `state` leaves
/// [`GameState::Ongoing`] the record is frozen.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct Game {
    /// Identifier assigned by the store.
    id: GameId,
    /// Players in seat order.
    players: [Player; 2],
    /// Moves in the order they were played.
    moves: Vec<Move>,
    /// The board.
    board: Board,
    /// Lifecycle state.
    state: GameState,
    /// Seat index of the player to move.
    current_player_index: usize,
    /// Player who completed a line, if any.
    winner: Option<PlayerId>,
}

impl Game {
    /// Creates an ongoing game with an empty board.
    #[instrument(skip(players), fields(game_id = %id))]
    pub(crate) fn new(id: GameId, players: [Player; 2], size: usize, first: usize) -> Self {
        Self {
            id,
            players,
            moves: Vec::new(),
            board: Board::new(size),
            state: GameState::Ongoing,
            current_player_index: first,
            winner: None,
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Returns the winning player, if any.
    pub fn winner_player(&self) -> Option<&Player> {
        let winner = self.winner.as_ref()?;
        self.players.iter().find(|p| p.id() == winner)
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn push_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Passes the turn to the other seat.
    pub(crate) fn advance_turn(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
    }

    /// Records that `player` completed a line.
    pub(crate) fn declare_winner(&mut self, player: &Player) -> Result<(), GameError> {
        let state = match player.kind() {
            PlayerKind::Human => GameState::WinnerHuman,
            PlayerKind::Automated(_) => GameState::WinnerAutomated,
        };
        self.transition(state)?;
        self.winner = Some(player.id().clone());
        Ok(())
    }

    /// Records that the board filled without a completed line.
    pub(crate) fn declare_draw(&mut self) -> Result<(), GameError> {
        self.transition(GameState::Draw)
    }

    fn transition(&mut self, next: GameState) -> Result<(), GameError> {
        if self.state.is_terminal() {
            warn!(game_id = %self.id, from = %self.state, to = %next, "Game already finished");
            return Err(GameError::new(GameErrorKind::InvalidInput(format!(
                "game {} already finished as {}",
                self.id, self.state
            ))));
        }
        info!(game_id = %self.id, to = %next, "Game finished");
        self.state = next;
        Ok(())
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second] = &self.players;
        write!(
            f,
            "Game {} ({} vs {}, {}x{}, {} moves): {}",
            self.id,
            first.name(),
            second.name(),
            self.board.size(),
            self.board.size(),
            self.moves.len(),
            self.state
        )?;
        if let Some(winner) = self.winner_player() {
            write!(f, ", winner {}", winner.name())?;
        }
        Ok(())
    }
}
