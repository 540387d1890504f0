//! Best-move command - search a single position

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexapawn_core::{Color, MinimaxAI, Position, SearchOutcome, SearchStats};

use crate::MAX_DEPTH;

#[derive(Args)]
pub struct BestMoveArgs {
    /// Board rows separated by ',' or '/', e.g. "w--,---,--b"
    #[arg(long, required_unless_present = "position", conflicts_with = "position")]
    pub board: Option<String>,

    /// Position JSON file
    #[arg(long, value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// Side to move (white/black); defaults to the position's side
    #[arg(long)]
    pub color: Option<Color>,

    /// Search depth in plies
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(..=MAX_DEPTH as i64))]
    pub depth: u32,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BestMoveArgs) -> Result<()> {
    let mut position = load_position(&args)?;
    if let Some(color) = args.color {
        position.to_move = color;
    }

    tracing::info!(
        "Searching {} for {} at depth {}",
        position.name,
        position.to_move,
        args.depth
    );

    let outcome = MinimaxAI::new(args.depth).search(&position.board, position.to_move);
    let moved = outcome.board != position.board;
    if !moved && args.depth > 0 {
        tracing::warn!("{} has no move to make", position.to_move);
    }

    if args.json {
        print_json(&position, &outcome, moved)?;
    } else {
        print_text(&position, &outcome, moved);
    }
    Ok(())
}

fn load_position(args: &BestMoveArgs) -> Result<Position> {
    if let Some(path) = &args.position {
        return Position::load(path)
            .with_context(|| format!("Failed to load position: {}", path.display()));
    }
    let text = args.board.as_deref().unwrap_or_default();
    let color = args.color.unwrap_or(Color::White);
    Position::parse(text, color).with_context(|| format!("Invalid board: {}", text))
}

fn print_json(position: &Position, outcome: &SearchOutcome, moved: bool) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        color: Color,
        moved: bool,
        score: i32,
        board: Vec<String>,
        stats: &'a SearchStats,
    }

    let output = JsonOutput {
        color: position.to_move,
        moved,
        score: outcome.score,
        board: outcome.board.to_rows(),
        stats: &outcome.stats,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(position: &Position, outcome: &SearchOutcome, moved: bool) {
    if moved {
        println!("{} plays:", position.to_move);
    } else {
        println!("{} keeps the board:", position.to_move);
    }
    println!("{}", outcome.board);
    println!("score: {}  nodes: {}", outcome.score, outcome.stats.nodes);
}
