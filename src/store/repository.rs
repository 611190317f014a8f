//! In-memory repository for players and games.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::{
    Board, Game, GameError, GameErrorKind, GameId, Mark, Move, Player, PlayerId, PlayerKind,
    Square,
};

/// Keyed storage for players and games.
///
/// Constructed once per process (or per test) and shared by reference.
/// Each map sits behind its own lock; no lock is held while a caller waits
/// on input, so games running on separate threads never block each other
/// for longer than a single read or write.
#[derive(Debug, Default)]
pub struct GameStore {
    players: Mutex<HashMap<PlayerId, Player>>,
    games: Mutex<HashMap<GameId, Game>>,
}

impl GameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating GameStore");
        Self::default()
    }

    fn players(&self) -> MutexGuard<'_, HashMap<PlayerId, Player>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn games(&self) -> MutexGuard<'_, HashMap<GameId, Game>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a player with a fresh identifier and no mark.
    #[instrument(skip(self))]
    pub fn add_player(&self, name: String, kind: PlayerKind) -> Player {
        let player = Player::new(PlayerId::generate(), name, kind);
        self.players().insert(player.id().clone(), player.clone());
        info!(player_id = %player.id(), name = %player.name(), kind = %kind.player_type(), "Player added");
        player
    }

    /// Gets a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::NotFound`] if no such player exists.
    #[instrument(skip(self))]
    pub fn get_player(&self, id: &PlayerId) -> Result<Player, GameError> {
        self.players().get(id).cloned().ok_or_else(|| {
            debug!(player_id = %id, "Player not found");
            GameError::new(GameErrorKind::NotFound(format!("Player id not found: {}", id)))
        })
    }

    /// Creates an ongoing game with an empty `size`×`size` board.
    ///
    /// The toss winner moves first. Every other player is given [`Mark::O`];
    /// the toss winner's mark is expected to have been set to [`Mark::X`]
    /// by the caller. If `toss_winner` names neither player, seat 0 moves
    /// first.
    #[instrument(skip(self, player1, player2), fields(player1 = %player1.id(), player2 = %player2.id()))]
    pub fn initialise_game(
        &self,
        player1: Player,
        player2: Player,
        size: usize,
        toss_winner: &PlayerId,
    ) -> Game {
        let mut players = [player1, player2];
        let first = players
            .iter()
            .position(|p| p.id() == toss_winner)
            .unwrap_or_else(|| {
                warn!(toss_winner = %toss_winner, "Toss winner not in game, seat 0 moves first");
                0
            });

        for (index, player) in players.iter_mut().enumerate() {
            if index != first {
                player.set_mark(Mark::O);
            }
        }

        {
            let mut stored = self.players();
            for player in &players {
                stored.insert(player.id().clone(), player.clone());
            }
        }

        let game = Game::new(GameId::generate(), players, size, first);
        self.games().insert(game.id().clone(), game.clone());
        info!(game_id = %game.id(), size, first, "Game initialised");
        game
    }

    /// Gets a snapshot of a game by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::NotFound`] if no such game exists.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &GameId) -> Result<Game, GameError> {
        self.games().get(id).cloned().ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            GameError::new(GameErrorKind::NotFound(format!("Game id not found: {}", id)))
        })
    }

    /// Appends a move to a game's move list.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::NotFound`] if no such game exists.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn record_move(&self, id: &GameId, mv: Move) -> Result<(), GameError> {
        self.update_game(id, |game| {
            game.push_move(mv);
            debug!(moves = game.moves().len(), "Move recorded");
            Ok(())
        })
    }

    /// Writes the move's mark into the board at the move's cell.
    ///
    /// Legality is the caller's concern; an occupied cell is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidMove`] if the cell is off the board.
    #[instrument(skip(board), fields(mv = %mv))]
    pub fn apply_move_to_board(mv: &Move, board: &mut Board) -> Result<(), GameError> {
        board.set(mv.row(), mv.col(), Square::Occupied(mv.mark()))
    }

    /// Runs `f` against the stored game while holding the games lock.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::NotFound`] if no such game exists, or
    /// whatever `f` returns.
    pub fn update_game<R>(
        &self,
        id: &GameId,
        f: impl FnOnce(&mut Game) -> Result<R, GameError>,
    ) -> Result<R, GameError> {
        let mut games = self.games();
        let game = games.get_mut(id).ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            GameError::new(GameErrorKind::NotFound(format!("Game id not found: {}", id)))
        })?;
        f(game)
    }

    /// Number of games held.
    pub fn game_count(&self) -> usize {
        self.games().len()
    }
}
