//! Hexapawn CLI - Command-line interface
//!
//! Commands:
//! - best-move: Search one position and print the chosen board
//! - play: Play a single game and print every position
//! - match: Play a series of games between two player configs

mod best_move_cmd;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Deepest search the CLI accepts; there is no pruning, so cost grows fast
pub const MAX_DEPTH: u32 = 12;

#[derive(Parser)]
#[command(name = "hexapawn")]
#[command(about = "Hexapawn minimax engine")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log search details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best move for one position
    BestMove(best_move_cmd::BestMoveArgs),
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a series of games between two configs
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::BestMove(args) => best_move_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
