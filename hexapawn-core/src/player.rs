//! Move-choosing players

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Color};
use crate::game::generate_moves;

/// Anything that can pick a successor board for a side
pub trait Player {
    fn name(&self) -> String;

    /// Successor board after this player's move, `None` when it has no move
    fn choose(&mut self, board: &Board, color: Color) -> Option<Board>;
}

/// Uniformly random legal moves from a seeded generator
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn choose(&mut self, board: &Board, color: Color) -> Option<Board> {
        generate_moves(board, color).choose(&mut self.rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_player_picks_legal_move() {
        let board = Board::standard(3).unwrap();
        let legal = generate_moves(&board, Color::White);
        let mut player = RandomPlayer::with_seed(42);
        for _ in 0..10 {
            let next = player.choose(&board, Color::White).unwrap();
            assert!(legal.contains(&next));
        }
    }

    #[test]
    fn test_random_player_is_reproducible() {
        let board = Board::standard(4).unwrap();
        let mut a = RandomPlayer::with_seed(9);
        let mut b = RandomPlayer::with_seed(9);
        for _ in 0..5 {
            assert_eq!(a.choose(&board, Color::Black), b.choose(&board, Color::Black));
        }
    }

    #[test]
    fn test_random_player_without_moves() {
        let board = Board::from_rows(&["-w-", "-b-", "---"]).unwrap();
        let mut player = RandomPlayer::with_seed(1);
        assert_eq!(player.choose(&board, Color::White), None);
    }
}
