//! Position - a named board with the side to move

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::error::BoardError;
use crate::game::Game;

/// Board plus the side to move, as stored in position files
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default = "default_name")]
    pub name: String,
    pub board: Board,
    #[serde(default = "default_to_move")]
    pub to_move: Color,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_to_move() -> Color {
    Color::White
}

impl Position {
    pub fn new(name: &str, board: Board, to_move: Color) -> Self {
        Self {
            name: name.to_string(),
            board,
            to_move,
        }
    }

    /// Opening position of the given size, White to move
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        Ok(Self::new(
            &format!("standard-{}", size),
            Board::standard(size)?,
            Color::White,
        ))
    }

    /// Parse a compact board such as `w--,---,--b` or `w--/---/--b`
    pub fn parse(text: &str, to_move: Color) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text
            .split([',', '/'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        Ok(Self::new(text, Board::from_rows(&rows)?, to_move))
    }

    /// Start a game from this position
    pub fn to_game(&self) -> Game {
        Game::new(self.board.clone(), self.to_move)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let position = serde_json::from_str(&content)?;
        Ok(position)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
