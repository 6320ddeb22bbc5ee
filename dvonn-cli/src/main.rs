//! DVONN CLI - Command-line interface
//!
//! Commands:
//! - replay: Load a game or state, apply moves, print it in any format
//! - playout: Play a random game

mod playout_cmd;
mod replay_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dvonn")]
#[command(about = "DVONN game records and rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a game and print its final state or history
    Replay(replay_cmd::ReplayArgs),
    /// Play a game of random legal moves
    Playout(playout_cmd::PlayoutArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Playout(args) => playout_cmd::run(args),
    }
}
