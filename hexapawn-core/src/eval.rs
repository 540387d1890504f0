//! Static board evaluation

use crate::board::{Board, Census, Color};
use crate::game::can_move;

/// Score of a decided position; outranks any material difference
pub const WIN_VALUE: i32 = 10;

/// Static value of a board, tagged with whether the game is already decided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Win or loss detected, always `±WIN_VALUE`
    Terminal(i32),
    /// Material difference of an undecided position
    Heuristic(i32),
}

impl Evaluation {
    pub fn value(self) -> i32 {
        match self {
            Evaluation::Terminal(v) | Evaluation::Heuristic(v) => v,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Evaluation::Terminal(_))
    }
}

fn decided(winner: Color, target: Color) -> Evaluation {
    if winner == target {
        Evaluation::Terminal(WIN_VALUE)
    } else {
        Evaluation::Terminal(-WIN_VALUE)
    }
}

/// Evaluate `board` from `target`'s perspective with `next_to_move` on turn.
///
/// Rules are tried in order and the first match wins:
/// 1. a black pawn on row 0 wins for Black
/// 2. a white pawn on the last row wins for White
/// 3. no white pawns left wins for Black
/// 4. no black pawns left wins for White
/// 5. a side to move with no legal move loses
/// 6. otherwise the pawn count difference
pub fn static_evaluation(
    board: &Board,
    census: &Census,
    target: Color,
    next_to_move: Color,
) -> Evaluation {
    if board.row_has(0, Color::Black) {
        return decided(Color::Black, target);
    }
    if board.row_has(board.size() - 1, Color::White) {
        return decided(Color::White, target);
    }
    if census.white == 0 {
        return decided(Color::Black, target);
    }
    if census.black == 0 {
        return decided(Color::White, target);
    }
    if !can_move(board, census, next_to_move) {
        return decided(next_to_move.opponent(), target);
    }

    let own = census.count(target) as i32;
    let other = census.count(target.opponent()) as i32;
    Evaluation::Heuristic(own - other)
}

/// Plain integer form of [`static_evaluation`]
pub fn evaluate(board: &Board, census: &Census, target: Color, next_to_move: Color) -> i32 {
    static_evaluation(board, census, target, next_to_move).value()
}
