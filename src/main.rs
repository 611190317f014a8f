//! Strictly Noughts - Unified CLI
//!
//! Play N×N noughts and crosses in the terminal, or run batches of
//! computer-vs-computer games.

#![warn(missing_docs)]

mod cli;

use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_noughts::{
    Board, ConsoleRenderer, GameError, GameErrorKind, GameService, GameStore, InvalidInputPolicy,
    LineInput, MatchConfig, MatchSetup, Renderer, run_batch,
};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Play {
            config,
            size,
            name,
            opponent,
            seed,
            reprompt,
            two_humans,
            json,
        } => {
            let options = PlayOptions {
                size,
                name,
                opponent,
                seed,
                reprompt,
                two_humans,
                json,
            };
            run_play(config, options).await
        }
        Command::Batch { games, size, seed } => run_batch_command(games, size, seed).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_noughts=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line overrides for `play`.
#[derive(Debug)]
struct PlayOptions {
    size: Option<usize>,
    name: Option<String>,
    opponent: Option<String>,
    seed: Option<u64>,
    reprompt: bool,
    two_humans: bool,
    json: bool,
}

/// Play one interactive game
#[instrument(skip(options), fields(config_path = %config_path.display()))]
async fn run_play(config_path: PathBuf, options: PlayOptions) -> Result<()> {
    let prompt_for_size = options.size.is_none() && !config_path.exists();
    let config = apply_overrides(MatchConfig::load_or_default(&config_path)?, &options);
    config.validate()?;
    info!(?config, "Game started");

    let store = Arc::new(GameStore::new());
    let service = match config.seed() {
        Some(seed) => GameService::with_seed(store, *seed),
        None => GameService::new(store),
    }
    .with_policy(*config.invalid_input());

    let two_humans = options.two_humans;
    let outcome = tokio::task::spawn_blocking(move || {
        let mut input = LineInput::new(BufReader::new(std::io::stdin()));
        let mut renderer = ConsoleRenderer::new(std::io::stdout());

        let name = match config.human_name() {
            Some(name) => name.clone(),
            None => {
                renderer.message("Enter player name")?;
                input.read_line()?
            }
        };
        let size = if prompt_for_size {
            renderer.message("Enter number of cells per row/column")?;
            read_size(&input.read_line()?)?
        } else {
            *config.board_size()
        };

        let setup = if two_humans {
            MatchSetup::two_humans(name, config.opponent_name().clone(), size)
        } else {
            MatchSetup::human_vs_computer(name, config.opponent_name().clone(), size)
        };
        service.play_match(&setup, &mut input, &mut renderer)
    })
    .await?;

    // Errors end the game but not the process.
    match outcome {
        Ok(game) => {
            println!("Game State: {}\nGame result: {}", game.state(), game);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&game)?);
            }
        }
        Err(e) => error!(error = %e, "Game ended with an error"),
    }
    Ok(())
}

fn apply_overrides(mut config: MatchConfig, options: &PlayOptions) -> MatchConfig {
    if let Some(size) = options.size {
        config = config.with_board_size(size);
    }
    if let Some(name) = &options.name {
        config = config.with_human_name(name.clone());
    }
    if let Some(opponent) = &options.opponent {
        config = config.with_opponent_name(opponent.clone());
    }
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if options.reprompt {
        config = config.with_invalid_input(InvalidInputPolicy::Reprompt);
    }
    config
}

fn read_size(line: &str) -> Result<usize, GameError> {
    let size = line.trim().parse::<usize>().map_err(|_| {
        GameError::new(GameErrorKind::InvalidInput(format!(
            "board size must be a positive integer, got '{}'",
            line
        )))
    })?;
    Board::check_size(size)?;
    Ok(size)
}

/// Run concurrent computer-vs-computer games
#[instrument]
async fn run_batch_command(games: usize, size: usize, seed: Option<u64>) -> Result<()> {
    Board::check_size(size)?;
    let store = Arc::new(GameStore::new());
    let service = Arc::new(match seed {
        Some(seed) => GameService::with_seed(store, seed),
        None => GameService::new(store),
    });

    let summary = run_batch(service, games, size).await;
    println!("{}", summary);
    Ok(())
}
