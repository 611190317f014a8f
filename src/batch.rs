//! Runs many computer-vs-computer games concurrently against one store.

use std::sync::Arc;

use derive_getters::Getters;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use crate::io::{ScriptedInput, TracingRenderer};
use crate::service::{GameService, MatchSetup};
use crate::{Game, GameState};

/// Outcome counts across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct BatchSummary {
    /// Games that finished.
    completed: usize,
    /// Games that ended with an error.
    failed: usize,
    /// Games won by a human player.
    human_wins: usize,
    /// Games won by an automated player.
    automated_wins: usize,
    /// Games drawn.
    draws: usize,
}

impl BatchSummary {
    fn record(&mut self, game: &Game) {
        self.completed += 1;
        match game.state() {
            GameState::WinnerHuman => self.human_wins += 1,
            GameState::WinnerAutomated => self.automated_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::Ongoing => {}
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} completed ({} human wins, {} automated wins, {} draws), {} failed",
            self.completed, self.human_wins, self.automated_wins, self.draws, self.failed
        )
    }
}

/// Plays `games` matches of `size`×`size` on blocking tasks and waits for all of them.
///
/// Each match gets its own players and game record; the service and its
/// store are shared. A failing game is logged and counted, never retried.
#[instrument(skip(service))]
pub async fn run_batch(service: Arc<GameService>, games: usize, size: usize) -> BatchSummary {
    let mut tasks = JoinSet::new();

    for number in 1..=games {
        let service = Arc::clone(&service);
        tasks.spawn_blocking(move || {
            info!(game_number = number, "Starting game");
            let setup = MatchSetup::two_computers(
                format!("Player{}", number),
                format!("Computer{}", number),
                size,
            );
            let result = service.play_match(&setup, &mut ScriptedInput::default(), &mut TracingRenderer);
            (number, result)
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((number, Ok(game))) => {
                info!(game_number = number, state = %game.state(), result = %game, "Game finished");
                summary.record(&game);
            }
            Ok((number, Err(e))) => {
                error!(game_number = number, error = %e, "Error in game execution");
                summary.failed += 1;
            }
            Err(e) => {
                error!(error = %e, "Game task panicked");
                summary.failed += 1;
            }
        }
    }

    info!(%summary, "Batch complete");
    summary
}
