//! Match setup and play: the boundary between callers and the engine.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::engine::{GameEngine, InvalidInputPolicy};
use crate::io::{MoveInput, Renderer};
use crate::{
    Board, Game, GameError, GameErrorKind, GameId, GameStore, Mark, Player, PlayerId, PlayerKind,
    PlayerType,
};

/// Service layer for setting up and playing games.
///
/// Validates caller input, conducts the toss, and hands games to the
/// [`GameEngine`]. Cheap to share across threads behind an [`Arc`].
#[derive(Debug)]
pub struct GameService {
    store: Arc<GameStore>,
    rng: Mutex<StdRng>,
    policy: InvalidInputPolicy,
}

impl GameService {
    /// Creates a service with an entropy-seeded toss.
    #[instrument(skip(store))]
    pub fn new(store: Arc<GameStore>) -> Self {
        info!("Creating GameService");
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
            policy: InvalidInputPolicy::default(),
        }
    }

    /// Creates a service whose tosses are reproducible.
    #[instrument(skip(store))]
    pub fn with_seed(store: Arc<GameStore>, seed: u64) -> Self {
        info!(seed, "Creating seeded GameService");
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            policy: InvalidInputPolicy::default(),
        }
    }

    /// Sets the policy applied when a human enters a bad position.
    pub fn with_policy(mut self, policy: InvalidInputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Registers a player.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidInput`] if `name` is empty or blank.
    #[instrument(skip(self))]
    pub fn add_player(&self, name: &str, player_type: PlayerType) -> Result<Player, GameError> {
        if name.trim().is_empty() {
            warn!("Rejected empty player name");
            return Err(GameError::new(GameErrorKind::InvalidInput(
                "Player name is empty".to_string(),
            )));
        }
        Ok(self
            .store
            .add_player(name.trim().to_string(), PlayerKind::for_type(player_type)))
    }

    /// Flips a fair coin and returns the id of the player who moves first.
    #[instrument(skip(self, player1, player2))]
    pub fn conduct_toss(&self, player1: &Player, player2: &Player) -> PlayerId {
        let heads = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_bool(0.5);
        let winner = if heads { player1 } else { player2 };
        info!(winner = %winner.name(), player_id = %winner.id(), "Toss won");
        winner.id().clone()
    }

    /// Marks the toss winner with [`Mark::X`] and creates the game.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidInput`] if `size` is zero or larger
    /// than [`Board::MAX_SIZE`].
    #[instrument(skip(self, player1, player2))]
    pub fn initialise_game(
        &self,
        player1: Player,
        player2: Player,
        size: usize,
        toss_winner: &PlayerId,
    ) -> Result<Game, GameError> {
        Board::check_size(size).inspect_err(|e| warn!(error = %e, "Rejected board size"))?;
        let mark_winner = |player: Player| {
            if player.id() == toss_winner {
                player.with_mark(Mark::X)
            } else {
                player
            }
        };
        Ok(self
            .store
            .initialise_game(mark_winner(player1), mark_winner(player2), size, toss_winner))
    }

    /// Plays a stored game to the end.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidInput`] if the id is blank, otherwise
    /// whatever the engine returns.
    #[instrument(skip(self, input, renderer))]
    pub fn start_game(
        &self,
        game_id: &GameId,
        input: &mut dyn MoveInput,
        renderer: &mut dyn Renderer,
    ) -> Result<Game, GameError> {
        if game_id.is_blank() {
            return Err(GameError::new(GameErrorKind::InvalidInput(
                "game id cannot be empty".to_string(),
            )));
        }
        GameEngine::new(&self.store, input, renderer)
            .with_policy(self.policy)
            .start_game(game_id)
    }

    /// Adds both players, tosses, initialises and plays one game.
    #[instrument(skip(self, input, renderer), fields(size = setup.size))]
    pub fn play_match(
        &self,
        setup: &MatchSetup,
        input: &mut dyn MoveInput,
        renderer: &mut dyn Renderer,
    ) -> Result<Game, GameError> {
        let player1 = self.add_player(&setup.first.0, setup.first.1)?;
        let player2 = self.add_player(&setup.second.0, setup.second.1)?;

        let toss_winner = self.conduct_toss(&player1, &player2);
        let game = self.initialise_game(player1, player2, setup.size, &toss_winner)?;
        debug!(game = %game, "Game ready");

        self.start_game(game.id(), input, renderer)
    }
}

/// Who plays and on what board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    /// First seat: name and type.
    pub first: (String, PlayerType),
    /// Second seat: name and type.
    pub second: (String, PlayerType),
    /// Cells per row and column.
    pub size: usize,
}

impl MatchSetup {
    /// A human against the heuristic computer player.
    pub fn human_vs_computer(human: impl Into<String>, computer: impl Into<String>, size: usize) -> Self {
        Self {
            first: (human.into(), PlayerType::Human),
            second: (computer.into(), PlayerType::Automated),
            size,
        }
    }

    /// Two humans sharing one input.
    pub fn two_humans(first: impl Into<String>, second: impl Into<String>, size: usize) -> Self {
        Self {
            first: (first.into(), PlayerType::Human),
            second: (second.into(), PlayerType::Human),
            size,
        }
    }

    /// Two computer players.
    pub fn two_computers(first: impl Into<String>, second: impl Into<String>, size: usize) -> Self {
        Self {
            first: (first.into(), PlayerType::Automated),
            second: (second.into(), PlayerType::Automated),
            size,
        }
    }
}
