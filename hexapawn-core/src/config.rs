//! Player configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::MinimaxAI;
use crate::player::{Player, RandomPlayer};

/// Player type for games
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// Full-width minimax search
    #[default]
    Minimax,
    /// Uniformly random legal moves
    Random,
}

/// AI configuration for game playing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Player type (minimax or random)
    pub player_type: PlayerType,
    /// Search depth in plies for minimax
    pub depth: u32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            player_type: PlayerType::Minimax,
            depth: 4,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for minimax at given depth
    pub fn minimax(depth: u32) -> Self {
        Self {
            player_type: PlayerType::Minimax,
            depth,
            ..Default::default()
        }
    }

    /// Create config for a random mover
    pub fn random() -> Self {
        Self {
            player_type: PlayerType::Random,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Instantiate the configured player
    pub fn build(&self) -> Box<dyn Player> {
        match self.player_type {
            PlayerType::Minimax => Box::new(MinimaxAI::new(self.depth)),
            PlayerType::Random => match self.seed {
                Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
                None => Box::new(RandomPlayer::new()),
            },
        }
    }
}
