//! Error types for board parsing and search entry

/// A board that is not a well-formed square grid over `{w, b, -}`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,

    #[error("board size is {expected} but board has {rows} rows")]
    SizeMismatch { expected: usize, rows: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("illegal cell '{found}' at row {row}, column {col}")]
    IllegalCell { row: usize, col: usize, found: char },
}

/// Errors raised by the search entry point before any recursion begins
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Unrecognized color name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}' (expected white/w or black/b)")]
pub struct ColorParseError(pub String);
