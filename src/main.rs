use std::io;

use anyhow::Context;
use clap::Parser;
use pawns::chess::board::{Board, StalemateRule};
use pawns::chess::game::{Game, Rules};
use pawns::session::Session;
use tracing_subscriber::EnvFilter;

/// Play Pawns-Only chess in the console: two players take turns typing moves
/// like `e2e4` until one of them wins or the game is stalemated.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// What counts as a possible capture when looking for a stalemate.
    #[arg(long, value_enum, default_value_t = StalemateRule::Strict)]
    stalemate: StalemateRule,
    /// Start from a custom position, e.g. "8/pppppppp/8/8/8/8/PPPPPPPP/8".
    #[arg(long)]
    position: Option<String>,
    /// Log filter used when `RUST_LOG` is not set. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log filter: {}", config.log_level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    tracing::info!(version = %pawns::version(), ?config, "starting");

    let board = match &config.position {
        Some(placement) => Board::from_placement(placement)?,
        None => Board::starting(),
    };
    let rules = Rules {
        stalemate: config.stalemate,
    };
    let mut session = Session::new(Game::from_board(board, rules));
    session.run(&mut io::stdin().lock(), &mut io::stdout().lock())
}
