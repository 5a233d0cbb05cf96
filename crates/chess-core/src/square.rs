//! Board coordinates.
//!
//! A square is addressed by `(row, col)`. Row 0 is black's back rank (rank 8)
//! and row 7 is white's back rank (rank 1), matching the orientation the board
//! is drawn in. Files `a`-`h` map to columns 0-7.

use std::fmt;
use thiserror::Error;

/// File letter for each column.
const FILE_CHARS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digit for each row. Row 0 is rank 8.
const RANK_CHARS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// Error produced when a coordinate is outside the board or malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// A square on the board, stored as `row * 8 + col`.
///
/// Squares are indexed in scan order:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, both in 0-7.
    pub fn new(row: u8, col: u8) -> Result<Self, CoordinateError> {
        if row < 8 && col < 8 {
            Ok(Square(row * 8 + col))
        } else {
            Err(CoordinateError::InvalidCoordinate(format!("({}, {})", row, col)))
        }
    }

    /// Creates a square from row and column that are known to be on the board.
    ///
    /// Only for compile-time constants and loops bounded by 0..8.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, CoordinateError> {
        let invalid = || CoordinateError::InvalidCoordinate(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let col = FILE_CHARS
            .iter()
            .position(|&c| c == file.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let row = RANK_CHARS
            .iter()
            .position(|&c| c == rank)
            .ok_or_else(invalid)?;
        Ok(Square::at(row as u8, col as u8))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Row of this square (0 = rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Column of this square (0 = file a).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// File letter of this square.
    #[inline]
    pub const fn file_char(self) -> char {
        FILE_CHARS[self.col() as usize]
    }

    /// Rank digit of this square.
    #[inline]
    pub const fn rank_char(self) -> char {
        RANK_CHARS[self.row() as usize]
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Steps by the given row and column deltas, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Iterates over all 64 squares in scan order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

/// Converts `(row, col)` into algebraic notation.
pub fn square_to_algebraic(row: u8, col: u8) -> Result<String, CoordinateError> {
    Square::new(row, col).map(Square::to_algebraic)
}

/// Converts algebraic notation into `(row, col)`.
pub fn algebraic_to_square(s: &str) -> Result<(u8, u8), CoordinateError> {
    Square::from_algebraic(s).map(|sq| (sq.row(), sq.col()))
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
