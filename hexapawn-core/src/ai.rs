//! Bounded-depth minimax search

use serde::Serialize;

use crate::board::{Board, Color};
use crate::error::SearchError;
use crate::eval::static_evaluation;
use crate::game::generate_moves_with;
use crate::player::Player;

// ============================================================================
// SEARCH TYPES
// ============================================================================

/// Which extreme a tree level selects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Maximize,
    Minimize,
}

impl Level {
    pub fn other(self) -> Self {
        match self {
            Level::Maximize => Level::Minimize,
            Level::Minimize => Level::Maximize,
        }
    }

    /// Starting score that any real score replaces
    fn sentinel(self) -> i32 {
        match self {
            Level::Maximize => i32::MIN,
            Level::Minimize => i32::MAX,
        }
    }

    /// Strict improvement, so ties keep the earliest move
    fn improves(self, candidate: i32, best: i32) -> bool {
        match self {
            Level::Maximize => candidate > best,
            Level::Minimize => candidate < best,
        }
    }
}

/// Best successor found at one node and its backed-up score.
///
/// `best_move` is `None` for a depth-exhausted leaf and echoes the node's own
/// board when the position is already decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Board>,
    pub score: i32,
}

/// Node counts collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Every node visited, root included
    pub nodes: u64,
    /// Nodes scored because the depth ran out
    pub leaves: u64,
    /// Nodes cut short by a detected win or loss
    pub decided: u64,
}

/// Result of a root search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub board: Board,
    pub score: i32,
    pub stats: SearchStats,
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Search `board` with `to_move` on turn, scoring for `target`
pub fn propagate(
    board: &Board,
    target: Color,
    depth: u32,
    to_move: Color,
    level: Level,
) -> SearchResult {
    let mut stats = SearchStats::default();
    search_node(board, target, depth, to_move, level, &mut stats)
}

fn search_node(
    board: &Board,
    target: Color,
    depth: u32,
    to_move: Color,
    level: Level,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    let census = board.census();
    let eval = static_evaluation(board, &census, target, to_move);

    if depth == 0 {
        stats.leaves += 1;
        return SearchResult {
            best_move: None,
            score: eval.value(),
        };
    }

    // Stalemate is terminal here, so an undecided node always has successors
    if eval.is_terminal() {
        stats.decided += 1;
        tracing::trace!("decided at depth {}: {}", depth, eval.value());
        return SearchResult {
            best_move: Some(board.clone()),
            score: eval.value(),
        };
    }

    let children = generate_moves_with(board, &census, to_move);
    debug_assert!(!children.is_empty(), "undecided position without moves");

    let mut best = SearchResult {
        best_move: Some(board.clone()),
        score: level.sentinel(),
    };

    for child in children {
        let reply = search_node(
            &child,
            target,
            depth - 1,
            to_move.opponent(),
            level.other(),
            stats,
        );
        if level.improves(reply.score, best.score) {
            best = SearchResult {
                best_move: Some(child),
                score: reply.score,
            };
        }
    }

    best
}

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Minimax player searching a fixed number of plies
#[derive(Clone, Debug)]
pub struct MinimaxAI {
    pub depth: u32,
}

impl MinimaxAI {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Full root search for `color`, with node statistics
    pub fn search(&self, board: &Board, color: Color) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let result = search_node(board, color, self.depth, color, Level::Maximize, &mut stats);

        tracing::debug!(
            "{} depth {}: score {} ({} nodes, {} leaves, {} decided)",
            color,
            self.depth,
            result.score,
            stats.nodes,
            stats.leaves,
            stats.decided
        );

        SearchOutcome {
            board: result.best_move.unwrap_or_else(|| board.clone()),
            score: result.score,
            stats,
        }
    }

    /// Board after `color`'s best move; the input board when there is none
    pub fn best_move(&self, board: &Board, color: Color) -> Board {
        self.search(board, color).board
    }
}

impl Player for MinimaxAI {
    fn name(&self) -> String {
        format!("minimax(depth={})", self.depth)
    }

    fn choose(&mut self, board: &Board, color: Color) -> Option<Board> {
        let next = self.best_move(board, color);
        (next != *board).then_some(next)
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Validate raw rows and return the board after `color`'s best move.
///
/// The board must be `board_size` rows of `board_size` cells over `w`, `b`
/// and `-`. A depth of 0 only evaluates and returns the board unchanged, as
/// does a position in which `color` has no legal move.
pub fn hexapawn<S: AsRef<str>>(
    rows: &[S],
    board_size: usize,
    color: Color,
    max_depth: i64,
) -> Result<Board, SearchError> {
    if max_depth < 0 {
        return Err(SearchError::InvalidArgument(format!(
            "depth must be non-negative, got {}",
            max_depth
        )));
    }
    let depth = u32::try_from(max_depth).map_err(|_| {
        SearchError::InvalidArgument(format!("depth {} is too large", max_depth))
    })?;
    let board = Board::parse(rows, board_size)?;

    Ok(MinimaxAI::new(depth).best_move(&board, color))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::eval::WIN_VALUE;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_only_move_is_returned() {
        let next = hexapawn(&["w--", "---", "--b"], 3, Color::White, 1).unwrap();
        assert_eq!(next.to_rows(), vec!["---", "w--", "--b"]);
    }

    #[test]
    fn test_depth_zero_is_a_leaf() {
        let b = board(&["ww-", "---", "-b-"]);
        let result = propagate(&b, Color::White, 0, Color::White, Level::Maximize);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 1);
        assert_eq!(hexapawn(&["ww-", "---", "-b-"], 3, Color::White, 0).unwrap(), b);
    }

    #[test]
    fn test_decided_position_echoes_board() {
        let b = board(&["---", "-b-", "w--"]);
        for depth in 1..4 {
            let result = propagate(&b, Color::White, depth, Color::White, Level::Maximize);
            assert_eq!(result.score, WIN_VALUE);
            assert_eq!(result.best_move, Some(b.clone()));
        }
        let leaf = propagate(&b, Color::White, 0, Color::White, Level::Maximize);
        assert_eq!(leaf.score, WIN_VALUE);
    }

    #[test]
    fn test_stalemated_opponent_scores_win() {
        // Black to move is blocked; white is the target
        let b = board(&["---", "-w-", "-b-"]);
        let result = propagate(&b, Color::White, 2, Color::Black, Level::Minimize);
        assert_eq!(result.score, WIN_VALUE);
    }

    #[test]
    fn test_no_legal_move_returns_input() {
        let rows = ["-w-", "-b-", "---"];
        let next = hexapawn(&rows, 3, Color::White, 3).unwrap();
        assert_eq!(next, board(&rows));
        let mut ai = MinimaxAI::new(3);
        assert_eq!(ai.choose(&board(&rows), Color::White), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        // White can step onto the last row at (2,0) or capture at (2,1)
        let b = board(&["---", "w--", "-bb"]);
        let next = MinimaxAI::new(1).best_move(&b, Color::White);
        assert_eq!(next.to_rows(), vec!["---", "---", "wbb"]);
    }

    #[test]
    fn test_avoids_losing_move() {
        // Advancing the left pawn lets black capture it and win at depth 2,
        // so the capture of the black pawn is preferred
        let b = board(&["w-w", "-b-", "---"]);
        let outcome = MinimaxAI::new(2).search(&b, Color::White);
        assert_eq!(outcome.board.to_rows(), vec!["--w", "-w-", "---"]);
        assert_eq!(outcome.score, WIN_VALUE);
    }

    #[test]
    fn test_first_of_equal_moves_wins_ties() {
        let b = board(&["w-w", "---", "b-b"]);
        let outcome = MinimaxAI::new(1).search(&b, Color::White);
        assert_eq!(outcome.board.to_rows(), vec!["--w", "w--", "b-b"]);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_black_searches_too() {
        let b = board(&["---", "-w-", "b--"]);
        let next = MinimaxAI::new(1).best_move(&b, Color::Black);
        assert_eq!(next.to_rows(), vec!["---", "-b-", "---"]);
    }

    #[test]
    fn test_stats_count_nodes() {
        let b = board(&["w--", "---", "--b"]);
        let outcome = MinimaxAI::new(1).search(&b, Color::White);
        assert_eq!(outcome.stats.nodes, 2);
        assert_eq!(outcome.stats.leaves, 1);
        assert_eq!(outcome.stats.decided, 0);
    }

    #[test]
    fn test_entry_rejects_bad_input() {
        assert!(matches!(
            hexapawn(&["w--", "---", "--b"], 3, Color::White, -1),
            Err(SearchError::InvalidArgument(_))
        ));
        assert_eq!(
            hexapawn(&["w--", "---"], 3, Color::White, 2),
            Err(SearchError::InvalidBoard(BoardError::SizeMismatch { expected: 3, rows: 2 }))
        );
        assert!(matches!(
            hexapawn(&["w--", "-q-", "--b"], 3, Color::White, 2),
            Err(SearchError::InvalidBoard(BoardError::IllegalCell { .. }))
        ));
    }
}
