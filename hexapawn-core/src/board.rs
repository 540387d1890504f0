//! Square board model with row-major cells

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, ColorParseError};

/// Pawn color, also used for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a forward move: White moves down the rows, Black up
    pub fn forward(self) -> isize {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

/// Contents of one square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Pawn(Color),
}

impl Cell {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            'w' => Some(Cell::Pawn(Color::White)),
            'b' => Some(Cell::Pawn(Color::Black)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Pawn(color) => color.to_char(),
        }
    }
}

/// Board coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One occupied cell, as found by [`Board::census`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PawnLocation {
    pub color: Color,
    pub row: usize,
    pub col: usize,
}

impl PawnLocation {
    pub fn square(&self) -> Square {
        Square::new(self.row, self.col)
    }
}

/// Every pawn on a board in row-major order, with per-color counts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub pawns: Vec<PawnLocation>,
    pub white: usize,
    pub black: usize,
}

impl Census {
    pub fn count(&self, color: Color) -> usize {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// A single pawn step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
}

/// Immutable square Hexapawn board.
///
/// Row 0 is White's home row and Black's goal; the last row is the reverse.
/// Boards serialize as their list of row strings, e.g. `["w--","---","--b"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Parse rows, taking the board size from the row count
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        Self::parse(rows, rows.len())
    }

    /// Parse rows and check them against an explicit board size
    pub fn parse<S: AsRef<str>>(rows: &[S], size: usize) -> Result<Self, BoardError> {
        if rows.is_empty() || size == 0 {
            return Err(BoardError::Empty);
        }
        if rows.len() != size {
            return Err(BoardError::SizeMismatch {
                expected: size,
                rows: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let found = text.chars().count();
            if found != size {
                return Err(BoardError::RowLength {
                    row,
                    expected: size,
                    found,
                });
            }
            for (col, c) in text.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(BoardError::IllegalCell { row, col, found: c })?;
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }

    /// Opening position: White fills row 0, Black fills the last row
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::Empty);
        }
        let mut cells = vec![Cell::Empty; size * size];
        cells[..size].fill(Cell::Pawn(Color::White));
        cells[size * (size - 1)..].fill(Cell::Pawn(Color::Black));
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether a signed coordinate lies on the board
    pub fn contains(&self, row: isize, col: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Cell at a signed coordinate, `None` when off the board
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if self.contains(row, col) {
            self.cell(row as usize, col as usize)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Whether any pawn of `color` stands in `row`
    pub fn row_has(&self, row: usize, color: Color) -> bool {
        row < self.size && self.row(row).contains(&Cell::Pawn(color))
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }

    /// Locate every pawn in row-major order and count each color
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (index, cell) in self.cells.iter().enumerate() {
            if let Cell::Pawn(color) = *cell {
                census.pawns.push(PawnLocation {
                    color,
                    row: index / self.size,
                    col: index % self.size,
                });
                match color {
                    Color::White => census.white += 1,
                    Color::Black => census.black += 1,
                }
            }
        }
        census
    }

    /// Board after `mv`; the mover's pawn leaves `from` and occupies `to`
    pub fn apply(&self, mv: Move) -> Board {
        let mut next = self.clone();
        let from = mv.from.row * self.size + mv.from.col;
        let to = mv.to.row * self.size + mv.to.col;
        next.cells[to] = next.cells[from];
        next.cells[from] = Cell::Empty;
        next
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_rows() {
        let board = Board::from_rows(&["w--", "---", "--b"]).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.cell(0, 0), Some(Cell::Pawn(Color::White)));
        assert_eq!(board.cell(2, 2), Some(Cell::Pawn(Color::Black)));
        assert_eq!(board.cell(1, 1), Some(Cell::Empty));
        assert_eq!(board.to_rows(), vec!["w--", "---", "--b"]);
    }

    #[test]
    fn test_parse_rejects_malformed_boards() {
        let empty: [&str; 0] = [];
        assert_eq!(Board::from_rows(&empty), Err(BoardError::Empty));
        assert_eq!(
            Board::parse(&["w--", "---", "--b"], 4),
            Err(BoardError::SizeMismatch { expected: 4, rows: 3 })
        );
        assert_eq!(
            Board::from_rows(&["w--", "--", "--b"]),
            Err(BoardError::RowLength { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            Board::from_rows(&["w--", "-x-", "--b"]),
            Err(BoardError::IllegalCell { row: 1, col: 1, found: 'x' })
        );
    }

    #[test]
    fn test_census_is_row_major() {
        let board = Board::from_rows(&["-w-", "b-w", "-b-"]).unwrap();
        let census = board.census();
        assert_eq!(census.white, 2);
        assert_eq!(census.black, 2);
        let coords: Vec<_> = census.pawns.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(coords, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert_eq!(census.pawns[1].color, Color::Black);
    }

    #[test]
    fn test_census_handles_large_boards() {
        let mut rows = vec!["-".repeat(12); 12];
        rows[0] = format!("{}w", "-".repeat(11));
        rows[11] = format!("{}b", "-".repeat(11));
        let board = Board::from_rows(&rows).unwrap();
        let census = board.census();
        assert_eq!(census.pawns[0], PawnLocation { color: Color::White, row: 0, col: 11 });
        assert_eq!(census.pawns[1], PawnLocation { color: Color::Black, row: 11, col: 11 });
    }

    #[test]
    fn test_apply_leaves_parent_untouched() {
        let board = Board::from_rows(&["w--", "---", "--b"]).unwrap();
        let mv = Move {
            from: Square::new(0, 0),
            to: Square::new(1, 0),
            capture: false,
        };
        let next = board.apply(mv);
        assert_eq!(next.to_rows(), vec!["---", "w--", "--b"]);
        assert_eq!(board.to_rows(), vec!["w--", "---", "--b"]);
    }

    #[test]
    fn test_standard_board() {
        let board = Board::standard(4).unwrap();
        assert_eq!(board.to_rows(), vec!["wwww", "----", "----", "bbbb"]);
        assert_eq!(Board::standard(0), Err(BoardError::Empty));
    }

    #[test]
    fn test_bounds() {
        let board = Board::standard(3).unwrap();
        assert!(board.contains(0, 0));
        assert!(board.contains(2, 2));
        assert!(!board.contains(-1, 0));
        assert!(!board.contains(0, 3));
        assert_eq!(board.cell_at(3, 0), None);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!("B".parse::<Color>(), Ok(Color::Black));
        assert!("red".parse::<Color>().is_err());
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_serde_uses_row_strings() {
        let board = Board::from_rows(&["w-", "-b"]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["w-","-b"]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>(r#"["w-","-"]"#).is_err());
    }
}
