//! Terminal chess - play both sides of a game from the keyboard.
//!
//! The board is printed to stdout after every move; logs go to stderr.

mod command;
mod config;
mod session;

use anyhow::Context;
use chess_engine::{GameRecord, GameState};
use clap::Parser;
use config::ChessConfig;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Terminal chess - moves are typed in coordinate notation.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value_os_t = ChessConfig::config_path())]
    config: PathBuf,

    /// Start from this position instead of the configured one
    #[arg(long, conflicts_with = "load")]
    fen: Option<String>,

    /// Resume a game saved with the `save` command
    #[arg(long)]
    load: Option<PathBuf>,

    /// Log filter, overriding the config file (e.g. "debug")
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = ChessConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(fen) = args.fen {
        config.start_fen = fen;
    }

    // An explicit flag beats RUST_LOG, which beats the config file.
    let filter = match args.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let game = match &args.load {
        Some(path) => GameRecord::load(path)
            .with_context(|| format!("loading game from {}", path.display()))?,
        None => GameState::from_fen(&config.start_fen).context("invalid starting position")?,
    };
    tracing::info!(fen = %game.to_fen(), "starting session");

    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout(), game, config);
    session.run()?;
    tracing::info!(
        plies = session.game().ply_count(),
        status = %session.game().status(),
        "session ended"
    );
    Ok(())
}
