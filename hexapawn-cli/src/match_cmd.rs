//! Match command - play games between two player configs
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_configs(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexapawn_core::{AiConfig, Color, GameResult, PlayerType, Position};

use crate::MAX_DEPTH;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First player config JSON file (default: minimax depth 4)
    #[arg(long, value_name = "FILE")]
    pub first: Option<PathBuf>,

    /// Second player config JSON file (default: random mover)
    #[arg(long, value_name = "FILE")]
    pub second: Option<PathBuf>,

    /// Number of games to play (will alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board size
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Maximum plies per game
    #[arg(long, default_value = "200")]
    pub max_plies: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    plies: usize,
    first_color: Color,
}

impl GameRecord {
    /// Whether the first config won, `None` for an unfinished game
    fn first_won(&self) -> Option<bool> {
        self.result.winner().map(|winner| winner == self.first_color)
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    unfinished: usize,
    white_wins: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Load both configs
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (first, second) = load_configs(&args)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, size {})",
        first.build().name(),
        second.build().name(),
        args.games,
        args.size
    );

    let results = play_match(&first, &second, &args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load both configs from JSON files, falling back to defaults
fn load_configs(args: &MatchArgs) -> Result<(AiConfig, AiConfig)> {
    let first = match &args.first {
        Some(path) => load_config(path)?,
        None => AiConfig::default(),
    };
    let second = match &args.second {
        Some(path) => load_config(path)?,
        None => AiConfig::random(),
    };
    Ok((first, second))
}

/// Play all games in the match
fn play_match(
    first: &AiConfig,
    second: &AiConfig,
    args: &MatchArgs,
    seed: Option<u64>,
) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Alternate colors for fairness
        let first_color = if game_num % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };

        let record = play_single_game(first, second, first_color, game_num + 1, args, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} ({} plies)",
            record.game_number,
            record.result,
            record.plies
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game with the first config on `first_color`
fn play_single_game(
    first: &AiConfig,
    second: &AiConfig,
    first_color: Color,
    game_number: usize,
    args: &MatchArgs,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let position = Position::standard(args.size).context("Board size must be at least 1")?;

    let mut first_player = seeded(first, rng).build();
    let mut second_player = seeded(second, rng).build();

    let record = match first_color {
        Color::White => position.to_game().play(
            first_player.as_mut(),
            second_player.as_mut(),
            args.max_plies,
        ),
        Color::Black => position.to_game().play(
            second_player.as_mut(),
            first_player.as_mut(),
            args.max_plies,
        ),
    };

    Ok(GameRecord {
        game_number,
        result: record.result,
        plies: record.plies,
        first_color,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.first_won() == Some(true)).count();
    let second_wins = games.iter().filter(|g| g.first_won() == Some(false)).count();
    let unfinished = games
        .iter()
        .filter(|g| g.result == GameResult::Ongoing)
        .count();
    let white_wins = games
        .iter()
        .filter(|g| g.result == GameResult::WhiteWins)
        .count();

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        unfinished,
        white_wins,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn load_config(path: &Path) -> Result<AiConfig> {
    let config = AiConfig::load(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    if config.player_type == PlayerType::Minimax && config.depth > MAX_DEPTH {
        anyhow::bail!(
            "Depth {} in {} exceeds the maximum of {}",
            config.depth,
            path.display(),
            MAX_DEPTH
        );
    }
    Ok(config)
}

/// Give unseeded random players a seed drawn from the match RNG
fn seeded(config: &AiConfig, rng: &mut ChaCha8Rng) -> AiConfig {
    match (config.player_type, config.seed) {
        (PlayerType::Random, None) => config.clone().with_seed(rng.gen()),
        _ => config.clone(),
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: String,
        plies: usize,
        first_color: Color,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        unfinished: usize,
        white_wins: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        unfinished: results.unfinished,
        white_wins: results.white_wins,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: format!("{:?}", g.result),
                plies: g.plies,
                first_color: g.first_color,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:  {}", total);
    println!("First wins:   {} ({:.1}%)", results.first_wins, percent(results.first_wins, total));
    println!("Second wins:  {} ({:.1}%)", results.second_wins, percent(results.second_wins, total));
    println!("Unfinished:   {}", results.unfinished);
    println!("White wins:   {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Avg plies:    {:.1}", results.avg_plies);
}

fn percent(count: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 * 100.0 / total as f32
    }
}
