//! The 8×8 board grid and square addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rows and columns of a chess board.
pub const BOARD_SIZE: usize = 8;

/// File letters indexed by grid column (column 0 = file A).
pub const FILE_NAMES: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Rank digits indexed by grid row (row 0 = rank 8).
pub const RANK_NAMES: [char; BOARD_SIZE] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Shape violations for numeric grids and board grids.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected 2 coordinate grids (xs, ys), found {found}")]
    AxisCount { found: usize },
    #[error("x grid is {xs_rows}x{xs_cols} but y grid is {ys_rows}x{ys_cols}")]
    ShapeMismatch {
        xs_rows: usize,
        xs_cols: usize,
        ys_rows: usize,
        ys_cols: usize,
    },
    #[error("non-finite square center at ({row}, {col})")]
    NonFinite { row: usize, col: usize },
}

/// A square on the board, addressed by grid row and column.
///
/// Row 0 is rank 8 and column 0 is file A, which is also the order FEN lists
/// squares in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquareCoords {
    pub row: usize,
    pub col: usize,
}

impl SquareCoords {
    /// Build coordinates, returning `None` when either index is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Build coordinates from arbitrary grid indices by clamping into `[0, 7]`.
    pub fn clamped(row: usize, col: usize) -> Self {
        Self {
            row: row.min(BOARD_SIZE - 1),
            col: col.min(BOARD_SIZE - 1),
        }
    }

    /// File letter (`'A'..='H'`).
    pub fn file(self) -> char {
        FILE_NAMES[self.col]
    }

    /// Rank digit (`'1'..='8'`).
    pub fn rank(self) -> char {
        RANK_NAMES[self.row]
    }

    /// Algebraic name such as `"E8"`.
    pub fn name(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Parse an algebraic name (`"e8"`, `"E8"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?.to_ascii_uppercase();
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = FILE_NAMES.iter().position(|&f| f == file)?;
        let row = RANK_NAMES.iter().position(|&r| r == rank)?;
        Some(Self { row, col })
    }

    /// All 64 squares in FEN order (row-major from A8 to H1).
    pub fn all() -> impl Iterator<Item = SquareCoords> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| SquareCoords { row, col }))
    }
}

impl fmt::Display for SquareCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// 8×8 grid of optional detector labels.
///
/// Labels are kept as the raw strings the detector produced; they are only
/// decoded into [`PieceLabel`](crate::PieceLabel)s when the board is encoded.
/// Each cell holds at most one label and [`BoardGrid::set`] overwrites.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGrid {
    cells: [[Option<String>; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardGrid {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from nested rows, validating the 8×8 shape.
    pub fn from_rows(rows: Vec<Vec<Option<String>>>) -> Result<Self, GridError> {
        if rows.len() != BOARD_SIZE {
            return Err(GridError::RowCount {
                expected: BOARD_SIZE,
                found: rows.len(),
            });
        }
        let mut board = Self::new();
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(GridError::ColumnCount {
                    row,
                    expected: BOARD_SIZE,
                    found: cells.len(),
                });
            }
            for (col, cell) in cells.into_iter().enumerate() {
                board.cells[row][col] = cell;
            }
        }
        Ok(board)
    }

    /// Label at `square`, if any.
    pub fn get(&self, square: SquareCoords) -> Option<&str> {
        self.cells[square.row][square.col].as_deref()
    }

    /// Place `label` at `square`, returning the label it replaced.
    pub fn set(&mut self, square: SquareCoords, label: impl Into<String>) -> Option<String> {
        self.cells[square.row][square.col].replace(label.into())
    }

    /// Remove and return the label at `square`.
    pub fn clear(&mut self, square: SquareCoords) -> Option<String> {
        self.cells[square.row][square.col].take()
    }

    /// Rows in FEN order (row 0 = rank 8).
    pub fn rows(&self) -> &[[Option<String>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Occupied squares with their labels, in FEN order.
    pub fn occupied(&self) -> impl Iterator<Item = (SquareCoords, &str)> + '_ {
        SquareCoords::all().filter_map(move |sq| self.get(sq).map(|label| (sq, label)))
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.piece_count() == 0
    }
}
