//! Move generation, game result and playout

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Census, Color, Move, PawnLocation, Square};
use crate::player::Player;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Column offsets tried for every pawn, in emission order:
/// straight ahead, diagonal-left, diagonal-right
const STEPS: [isize; 3] = [0, -1, 1];

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Legal steps of one pawn in straight, left, right order
fn pawn_moves<'a>(board: &'a Board, pawn: PawnLocation) -> impl Iterator<Item = Move> + 'a {
    let row = pawn.row as isize + pawn.color.forward();
    STEPS.into_iter().filter_map(move |dc| {
        let col = pawn.col as isize + dc;
        let target = board.cell_at(row, col)?;
        let capture = match (dc, target) {
            (0, Cell::Empty) => false,
            (0, Cell::Pawn(_)) => return None,
            (_, Cell::Pawn(other)) if other == pawn.color.opponent() => true,
            _ => return None,
        };
        Some(Move {
            from: pawn.square(),
            to: Square::new(row as usize, col as usize),
            capture,
        })
    })
}

/// Lazily enumerate `color`'s moves in row-major pawn order
fn moves_for<'a>(
    board: &'a Board,
    census: &'a Census,
    color: Color,
) -> impl Iterator<Item = Move> + 'a {
    census
        .pawns
        .iter()
        .filter(move |pawn| pawn.color == color)
        .flat_map(move |&pawn| pawn_moves(board, pawn))
}

/// All legal moves for `color`
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let census = board.census();
    moves_for(board, &census, color).collect()
}

/// Every successor board for `color`, in move order
pub fn generate_moves(board: &Board, color: Color) -> Vec<Board> {
    let census = board.census();
    generate_moves_with(board, &census, color)
}

/// [`generate_moves`] reusing an already computed census
pub fn generate_moves_with(board: &Board, census: &Census, color: Color) -> Vec<Board> {
    moves_for(board, census, color)
        .map(|mv| board.apply(mv))
        .collect()
}

/// Whether `color` has at least one legal move; stops at the first one found
pub fn can_move(board: &Board, census: &Census, color: Color) -> bool {
    moves_for(board, census, color).next().is_some()
}

// ============================================================================
// GAME RESULT
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Ongoing => None,
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
        }
    }
}

/// Decide a position with `to_move` on turn.
///
/// Uses the same precedence as the static evaluator: reaching the far row,
/// then running out of pawns, then having no legal move.
pub fn result(board: &Board, to_move: Color) -> GameResult {
    let census = board.census();
    result_with(board, &census, to_move)
}

pub(crate) fn result_with(board: &Board, census: &Census, to_move: Color) -> GameResult {
    if board.row_has(0, Color::Black) {
        return GameResult::BlackWins;
    }
    if board.row_has(board.size() - 1, Color::White) {
        return GameResult::WhiteWins;
    }
    if census.white == 0 {
        return GameResult::BlackWins;
    }
    if census.black == 0 {
        return GameResult::WhiteWins;
    }
    if !can_move(board, census, to_move) {
        return GameResult::win_for(to_move.opponent());
    }
    GameResult::Ongoing
}

// ============================================================================
// PLAYOUT
// ============================================================================

/// Finished (or truncated) game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub result: GameResult,
    pub plies: usize,
    pub final_board: Board,
    pub history: Vec<Board>,
}

/// Game in progress (clone to branch)
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Color,
    history: Vec<Board>,
}

impl Game {
    pub fn new(board: Board, to_move: Color) -> Self {
        Self {
            history: vec![board.clone()],
            board,
            to_move,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Positions seen so far, starting with the initial board
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn result(&self) -> GameResult {
        result(&self.board, self.to_move)
    }

    /// Replace the board with a successor and pass the turn
    pub fn advance(&mut self, next: Board) {
        self.board = next;
        self.to_move = self.to_move.opponent();
        self.history.push(self.board.clone());
    }

    /// Alternate the two players until the game is decided or `max_plies` run out
    pub fn play(
        mut self,
        white: &mut dyn Player,
        black: &mut dyn Player,
        max_plies: usize,
    ) -> GameRecord {
        let mut plies = 0;

        while self.result() == GameResult::Ongoing && plies < max_plies {
            let player: &mut dyn Player = match self.to_move {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let Some(next) = player.choose(&self.board, self.to_move) else {
                break;
            };
            tracing::debug!(
                "ply {}: {} ({}) -> {:?}",
                plies + 1,
                self.to_move,
                player.name(),
                next.to_rows()
            );
            self.advance(next);
            plies += 1;
        }

        GameRecord {
            result: self.result(),
            plies,
            final_board: self.board,
            history: self.history,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MinimaxAI;
    use crate::player::RandomPlayer;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn rows_of(boards: &[Board]) -> Vec<Vec<String>> {
        boards.iter().map(Board::to_rows).collect()
    }

    #[test]
    fn test_single_straight_move() {
        let b = board(&["w--", "---", "--b"]);
        let moves = generate_moves(&b, Color::White);
        assert_eq!(rows_of(&moves), vec![vec!["---", "w--", "--b"]]);
    }

    #[test]
    fn test_move_order_straight_left_right() {
        let b = board(&["-w-", "bwb", "---"]);
        // Pawn (0,1) is blocked straight ahead and captures left then right;
        // pawn (1,1) then steps straight down.
        let moves = generate_moves(&b, Color::White);
        assert_eq!(
            rows_of(&moves),
            vec![
                vec!["---", "wwb", "---"],
                vec!["---", "bww", "---"],
                vec!["-w-", "b-b", "-w-"],
            ]
        );
    }

    #[test]
    fn test_black_moves_up_the_board() {
        let b = board(&["---", "w-w", "-b-"]);
        let moves = generate_moves(&b, Color::Black);
        assert_eq!(
            rows_of(&moves),
            vec![
                vec!["---", "wbw", "---"],
                vec!["---", "b-w", "---"],
                vec!["---", "w-b", "---"],
            ]
        );
        assert!(moves.iter().all(|m| m.census().black == 1));
    }

    #[test]
    fn test_no_capture_of_own_color_or_straight() {
        let b = board(&["ww-", "wb-", "---"]);
        let moves = legal_moves(&b, Color::White);
        // (0,1) is blocked straight ahead and may not take its own pawn at (1,0)
        assert!(moves.iter().all(|m| m.from != Square::new(0, 1) || m.to != Square::new(1, 1)));
        assert!(moves.iter().any(|m| m.from == Square::new(0, 0) && m.to == Square::new(1, 1) && m.capture));
        assert!(moves.iter().any(|m| m.from == Square::new(1, 0) && m.to == Square::new(2, 0) && !m.capture));
    }

    #[test]
    fn test_pawn_counts_across_moves() {
        let b = board(&["www", "b-b", "-b-"]);
        let parent = b.census();
        for color in [Color::White, Color::Black] {
            for child in generate_moves(&b, color) {
                let c = child.census();
                assert!(parent.white - c.white <= 1);
                assert!(parent.black - c.black <= 1);
                assert!(c.white + c.black <= parent.white + parent.black);
                assert!(c.count(color) == parent.count(color));
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let b = board(&["w-w", "-b-", "b-b"]);
        let first = generate_moves(&b, Color::White);
        let second = generate_moves(&b, Color::White);
        assert_eq!(first, second);
    }

    #[test]
    fn test_can_move_agrees_with_generator() {
        let boards = [
            board(&["w--", "b--", "---"]),
            board(&["w--", "-b-", "---"]),
            board(&["---", "---", "w-b"]),
            board(&["-w-", "-b-", "---"]),
        ];
        for b in &boards {
            let census = b.census();
            for color in [Color::White, Color::Black] {
                assert_eq!(
                    can_move(b, &census, color),
                    !generate_moves(b, color).is_empty(),
                    "{:?} for {}",
                    b.to_rows(),
                    color
                );
            }
        }
    }

    #[test]
    fn test_result_rules() {
        assert_eq!(result(&board(&["b--", "-w-", "---"]), Color::White), GameResult::BlackWins);
        assert_eq!(result(&board(&["---", "-b-", "w--"]), Color::Black), GameResult::WhiteWins);
        assert_eq!(result(&board(&["---", "-b-", "---"]), Color::White), GameResult::BlackWins);
        // White blocked, white to move
        assert_eq!(result(&board(&["w--", "b--", "---"]), Color::White), GameResult::BlackWins);
        assert_eq!(result(&Board::standard(3).unwrap(), Color::White), GameResult::Ongoing);
    }

    #[test]
    fn test_play_ends_decided() {
        let mut white = MinimaxAI::new(4);
        let mut black = RandomPlayer::with_seed(7);
        let game = Game::new(Board::standard(3).unwrap(), Color::White);
        let record = game.play(&mut white, &mut black, 50);
        assert_ne!(record.result, GameResult::Ongoing);
        assert_eq!(record.history.len(), record.plies + 1);
        assert_eq!(record.history.last(), Some(&record.final_board));
    }

    #[test]
    fn test_play_respects_ply_limit() {
        let mut white = RandomPlayer::with_seed(1);
        let mut black = RandomPlayer::with_seed(2);
        let game = Game::new(Board::standard(5).unwrap(), Color::White);
        let record = game.play(&mut white, &mut black, 1);
        assert_eq!(record.plies, 1);
        assert_eq!(record.result, GameResult::Ongoing);
    }
}
