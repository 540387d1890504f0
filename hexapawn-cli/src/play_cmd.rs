//! Play command - one game between two players

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexapawn_core::{AiConfig, GameRecord, GameResult, Position};

use crate::MAX_DEPTH;

#[derive(Args)]
pub struct PlayArgs {
    /// Board size for the standard opening
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Start from a position JSON file instead of the standard opening
    #[arg(long, value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// Search depth for white
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(..=MAX_DEPTH as i64))]
    pub white_depth: u32,

    /// Search depth for black
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(..=MAX_DEPTH as i64))]
    pub black_depth: u32,

    /// Let black play random moves
    #[arg(long)]
    pub random_black: bool,

    /// Maximum plies before the game is abandoned
    #[arg(long, default_value = "200")]
    pub max_plies: usize,

    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let position = match &args.position {
        Some(path) => Position::load(path)
            .with_context(|| format!("Failed to load position: {}", path.display()))?,
        None => Position::standard(args.size).context("Board size must be at least 1")?,
    };

    let white_config = AiConfig::minimax(args.white_depth);
    let black_config = if args.random_black {
        let config = AiConfig::random();
        match seed {
            Some(s) => config.with_seed(s),
            None => config,
        }
    } else {
        AiConfig::minimax(args.black_depth)
    };

    let mut white = white_config.build();
    let mut black = black_config.build();

    tracing::info!(
        "Playing {}: {} vs {}",
        position.name,
        white.name(),
        black.name()
    );

    let record = position
        .to_game()
        .play(white.as_mut(), black.as_mut(), args.max_plies);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn print_record(record: &GameRecord) {
    for (ply, board) in record.history.iter().enumerate() {
        println!("-- ply {} --", ply);
        println!("{}", board);
    }
    match record.result {
        GameResult::Ongoing => println!("Abandoned after {} plies", record.plies),
        result => println!("{:?} after {} plies", result, record.plies),
    }
}
