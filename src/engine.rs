//! Turn loop that drives one game to a terminal state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::games::grid::rules::check_win;
use crate::io::{MoveInput, Renderer};
use crate::{
    Board, Game, GameError, GameErrorKind, GameId, GameStore, Mark, Move, Player, PlayerKind,
    Position, resolve_legal,
};

/// What to do when a human enters a bad position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum InvalidInputPolicy {
    /// Propagate the error and end the run.
    #[default]
    Abort,
    /// Log the error and ask the same player again.
    Reprompt,
}

/// Drives a stored game turn by turn.
///
/// One move per iteration, strictly sequential. Board snapshots are read from
/// the store, positions come from the human-input provider or the player's
/// strategy, and every accepted move is written back before the next turn.
pub struct GameEngine<'a> {
    store: &'a GameStore,
    input: &'a mut dyn MoveInput,
    renderer: &'a mut dyn Renderer,
    policy: InvalidInputPolicy,
}

impl<'a> GameEngine<'a> {
    /// Creates an engine that aborts on bad human input.
    pub fn new(
        store: &'a GameStore,
        input: &'a mut dyn MoveInput,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            store,
            input,
            renderer,
            policy: InvalidInputPolicy::Abort,
        }
    }

    /// Sets the policy for bad human input.
    pub fn with_policy(mut self, policy: InvalidInputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Plays the game until it is won or drawn and returns the final record.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::NotFound`] for an unknown id. Bad positions
    /// ([`GameErrorKind::InvalidMove`], [`GameErrorKind::CellOccupied`],
    /// [`GameErrorKind::MalformedPosition`]) end the run unless the policy is
    /// [`InvalidInputPolicy::Reprompt`] and the mover is human. Input and
    /// renderer failures always end the run.
    #[instrument(skip(self), fields(policy = %self.policy))]
    pub fn start_game(&mut self, game_id: &GameId) -> Result<Game, GameError> {
        let mut game = self.store.get_game(game_id)?;
        info!(game = %game, "Game started");

        while !game.state().is_terminal() {
            self.renderer.render(game.board())?;

            let player = game.current_player().clone();
            let mark = (*player.mark()).ok_or_else(|| {
                GameError::new(GameErrorKind::InvalidInput(format!(
                    "player {} has no mark",
                    player.name()
                )))
            })?;
            self.renderer.message(&format!(
                "Player: {}'s move with symbol: {}",
                player.name(),
                mark
            ))?;

            let (position, row, col) = self.next_position(&player, mark, game.board())?;
            let mv = Move::new(player.id().clone(), mark, row, col);

            self.store
                .update_game(game_id, |stored| {
                    GameStore::apply_move_to_board(&mv, stored.board_mut())
                })?;
            self.store.record_move(game_id, mv.clone())?;
            info!(player = %player.name(), %position, "Move played");
            self.renderer.message(&format!(
                "Player {} filled the position: {}",
                player.name(),
                position
            ))?;

            game = self.store.update_game(game_id, |stored| {
                if check_win(stored.board(), &mv) {
                    stored.declare_winner(&player)?;
                } else if stored.moves().len() == stored.board().cell_count() {
                    stored.declare_draw()?;
                } else {
                    stored.advance_turn();
                }
                Ok(stored.clone())
            })?;

            if game.winner().is_some() {
                self.renderer.render(game.board())?;
            }
        }

        info!(game = %game, "Game over");
        Ok(game)
    }

    /// Obtains a legal position from the mover, re-asking humans if allowed.
    fn next_position(
        &mut self,
        player: &Player,
        mark: Mark,
        board: &Board,
    ) -> Result<(Position, usize, usize), GameError> {
        loop {
            let attempt = self
                .propose(player, mark, board)
                .and_then(|position| resolve_legal(board, position).map(|(r, c)| (position, r, c)));

            match attempt {
                Ok(resolved) => return Ok(resolved),
                Err(err)
                    if self.policy == InvalidInputPolicy::Reprompt
                        && player.is_human()
                        && err.kind().is_recoverable() =>
                {
                    warn!(player = %player.name(), error = %err.kind(), "Rejected position, asking again");
                    self.renderer.message(&err.kind().to_string())?;
                }
                Err(err) => {
                    warn!(player = %player.name(), error = %err, "Rejected position");
                    return Err(err);
                }
            }
        }
    }

    /// Asks the mover for a position, without legality checks.
    fn propose(&mut self, player: &Player, mark: Mark, board: &Board) -> Result<Position, GameError> {
        match player.kind() {
            PlayerKind::Human => {
                let prompt = format!("Please enter a position from 1-{}", board.cell_count());
                self.renderer.message(&prompt)?;
                let line = self.input.read_position(&prompt)?;
                Position::parse(&line, board.size())
            }
            PlayerKind::Automated(strategy) => {
                let position = strategy.choose(board, mark).ok_or_else(|| {
                    GameError::new(GameErrorKind::InvalidInput(
                        "no empty cell left for automated player".to_string(),
                    ))
                })?;
                debug!(strategy = strategy.name(), %position, "Automated player chose");
                Ok(position)
            }
        }
    }
}

impl std::fmt::Debug for GameEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
