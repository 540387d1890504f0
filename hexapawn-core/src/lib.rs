//! Hexapawn Core - Game engine and AI
//!
//! This crate provides the core logic for Hexapawn:
//! - Square board model with white and black pawns
//! - Move generation and game results
//! - Static evaluation (win/loss detection, material difference)
//! - Plain bounded-depth minimax search
//! - Players, playout and position files

pub mod board;
pub mod error;
pub mod game;
pub mod eval;
pub mod ai;
pub mod player;
pub mod config;
pub mod position;

// Re-exports for convenient access
pub use board::{Board, Cell, Census, Color, Move, PawnLocation, Square};
pub use error::{BoardError, ColorParseError, SearchError};
pub use game::{can_move, generate_moves, legal_moves, Game, GameRecord, GameResult};
pub use eval::{evaluate, static_evaluation, Evaluation, WIN_VALUE};
pub use ai::{hexapawn, propagate, Level, MinimaxAI, SearchOutcome, SearchResult, SearchStats};
pub use player::{Player, RandomPlayer};
pub use config::{AiConfig, PlayerType};
pub use position::Position;
