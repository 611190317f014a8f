//! Entity store for players and games.

mod ids;
mod repository;

pub use ids::{GameId, PlayerId};
pub use repository::GameStore;
