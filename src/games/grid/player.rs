//! Players and how they choose moves.

use derive_getters::Getters;
use serde::{Serialize, Serializer};

use super::position::Position;
use super::strategy;
use super::types::{Board, Mark};
use crate::PlayerId;

/// Decision procedure for an automated player.
#[derive(Clone, Copy)]
pub struct Strategy {
    name: &'static str,
    choose: fn(&Board, Mark) -> Option<Position>,
}

impl Strategy {
    /// Win, block, centre, corner, then first free cell.
    pub fn heuristic() -> Self {
        Self {
            name: "heuristic",
            choose: strategy::choose_move,
        }
    }

    /// Strategy name, for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Picks a position for `mark`, or `None` if the board is full.
    pub fn choose(&self, board: &Board, mark: Mark) -> Option<Position> {
        (self.choose)(board, mark)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Where a player's moves come from.
#[derive(Debug, Clone, Copy, strum::EnumDiscriminants)]
#[strum_discriminants(name(PlayerType))]
#[strum_discriminants(derive(Hash, strum::Display, serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    /// Moves are read from the human-input provider.
    Human,
    /// Moves are computed by the carried strategy.
    Automated(Strategy),
}

impl PlayerKind {
    /// Builds the kind for a player type, using the heuristic for automated players.
    pub fn for_type(player_type: PlayerType) -> Self {
        match player_type {
            PlayerType::Human => PlayerKind::Human,
            PlayerType::Automated => PlayerKind::Automated(Strategy::heuristic()),
        }
    }

    /// Returns the discriminant without the strategy.
    pub fn player_type(&self) -> PlayerType {
        PlayerType::from(self)
    }
}

impl Serialize for PlayerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.player_type().serialize(serializer)
    }
}

/// A participant in one game.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct Player {
    /// Identifier assigned by the store.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Human or automated.
    kind: PlayerKind,
    /// Mark, unset until the game is initialised.
    mark: Option<Mark>,
}

impl Player {
    /// Creates a player with no mark.
    pub fn new(id: PlayerId, name: String, kind: PlayerKind) -> Self {
        Self {
            id,
            name,
            kind,
            mark: None,
        }
    }

    /// Returns true for human players.
    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub(crate) fn set_mark(&mut self, mark: Mark) {
        self.mark = Some(mark);
    }

    /// Returns a copy of this player carrying `mark`.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.set_mark(mark);
        self
    }
}
