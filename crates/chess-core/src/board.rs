//! The 8x8 grid of pieces.

use crate::{Color, Piece, Square};
use std::fmt;

/// Contents of a single square.
pub type Cell = Option<(Piece, Color)>;

/// An 8x8 grid of optional colored pieces.
///
/// The board is a plain container: it enforces nothing about legality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

const BACK_ROW: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates the standard initial setup.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            for (col, piece) in BACK_ROW.iter().enumerate() {
                board.set(Square::at(color.back_row(), col as u8), Some((*piece, color)));
                board.set(Square::at(color.pawn_row(), col as u8), Some((Piece::Pawn, color)));
            }
        }
        board
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index() as usize]
    }

    /// Places a piece on (or clears, with `None`) a square.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index() as usize] = cell;
    }

    /// Removes and returns whatever stood on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Cell {
        std::mem::take(&mut self.cells[sq.index() as usize])
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Color of the piece on a square, if any.
    #[inline]
    pub fn piece_color(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|(_, color)| color)
    }

    /// Iterates over occupied squares in scan order (a8, b8, ..., h1).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|(piece, color)| (sq, piece, color)))
    }

    /// Locates the king of the given color.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(sq, _, _)| sq)
    }

    /// Renders the piece placement field of a FEN string.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut empty_count = 0;
            for col in 0..8 {
                match self.get(Square::at(row, col)) {
                    Some((piece, color)) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    /// Builds a board from an already validated FEN placement field.
    ///
    /// FEN lists rank 8 first, which is row 0, so ranks map to rows directly.
    pub fn from_fen_placement(placement: &str) -> Self {
        let mut board = Board::empty();
        for (row, rank) in placement.split('/').enumerate().take(8) {
            let mut col = 0u8;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    col += digit as u8;
                } else if let Some(cell) = Piece::from_fen_char(c) {
                    if col < 8 {
                        board.set(Square::at(row as u8, col), Some(cell));
                    }
                    col += 1;
                }
            }
        }
        board
    }

    /// Writes the board as text, one row per line, rank 8 on top.
    pub fn render(&self, f: &mut impl fmt::Write, coordinates: bool, unicode: bool) -> fmt::Result {
        for row in 0..8u8 {
            if coordinates {
                write!(f, "{} ", Square::at(row, 0).rank_char())?;
            }
            for col in 0..8u8 {
                let c = match self.get(Square::at(row, col)) {
                    Some((piece, color)) if unicode => piece.symbol(color),
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                if col > 0 {
                    f.write_char(' ')?;
                }
                f.write_char(c)?;
            }
            writeln!(f)?;
        }
        if coordinates {
            writeln!(f, "  a b c d e f g h")?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, true, false)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen_placement())
    }
}
