//! Chess position representation and move application.

use crate::movegen::is_square_attacked;
use chess_core::{Board, Color, FenError, FenParser, Move, MoveFlag, Piece, Square};
use std::fmt;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the FEN castling field ("KQkq", "-", ...). The field must
    /// already be validated.
    pub fn from_fen_field(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |acc, c| {
            acc | match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            }
        });
        CastlingRights::new(flags)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Drops the right tied to a rook home square once anything leaves or
    /// lands on it.
    pub fn touch(&mut self, sq: Square) {
        match sq {
            Square::H1 => self.remove_kingside(Color::White),
            Square::A1 => self.remove_queenside(Color::White),
            Square::H8 => self.remove_kingside(Color::Black),
            Square::A8 => self.remove_queenside(Color::Black),
            _ => {}
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (flag, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & flag != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Origin and destination of the rook that moves along with a castling king.
pub fn castling_rook_squares(flag: MoveFlag, color: Color) -> Option<(Square, Square)> {
    let row = color.back_row();
    match flag {
        MoveFlag::CastleKingside => Some((Square::at(row, 7), Square::at(row, 5))),
        MoveFlag::CastleQueenside => Some((Square::at(row, 0), Square::at(row, 3))),
        _ => None,
    }
}

/// State overwritten by [`Position::play`] that the move itself does not
/// record. Restored by [`Position::unplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoInfo {
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square: the square skipped by a pawn that just
    /// double-pushed. Set only on the ply right after the push.
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates a position with an empty board.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            castling: CastlingRights::ALL,
            ..Position::empty()
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// Rejects positions where the side that just moved is left in check,
    /// since the side to move could then capture a king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let board = parsed.board();
        let mover = parsed.active_color;
        if let Some(king) = board.find_king(mover.opposite()) {
            if is_square_attacked(&board, king, mover) {
                return Err(FenError::OpponentInCheck(mover.opposite()));
            }
        }
        Ok(Position {
            board,
            side_to_move: mover,
            castling: CastlingRights::from_fen_field(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        FenParser {
            piece_placement: self.board.to_fen_placement(),
            active_color: self.side_to_move,
            castling: self.castling.to_string(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.get(sq)
    }

    /// Square of the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if that king is missing: every reachable position has exactly
    /// one king per side.
    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .find_king(color)
            .unwrap_or_else(|| panic!("invariant violated: no {} king on the board", color))
    }

    /// Applies a move produced by the move generator for this position.
    ///
    /// The move's recorded piece, capture and flag are trusted; feeding a
    /// move that was not generated here corrupts the position. Returns what
    /// [`Position::unplay`] needs to reverse it.
    pub fn play(&mut self, m: Move) -> UndoInfo {
        let us = self.side_to_move;
        let undo = UndoInfo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        let moving = self.board.take(m.from());
        debug_assert_eq!(moving, Some((m.piece(), us)), "move {} does not match board", m);

        if let Some(victim) = m.en_passant_victim(us) {
            self.board.set(victim, None);
        }

        let placed = m.promotion().unwrap_or(m.piece());
        self.board.set(m.to(), Some((placed, us)));

        if let Some((rook_from, rook_to)) = castling_rook_squares(m.flag(), us) {
            let rook = self.board.take(rook_from);
            self.board.set(rook_to, rook);
        }

        if m.piece() == Piece::King {
            self.castling.remove_color(us);
        }
        self.castling.touch(m.from());
        self.castling.touch(m.to());

        self.en_passant = match m.flag() {
            MoveFlag::DoublePush => m.from().offset(us.forward(), 0),
            _ => None,
        };

        if m.piece() == Piece::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = us.opposite();
        undo
    }

    /// Reverses [`Position::play`] exactly.
    ///
    /// # Panics
    ///
    /// Panics if the board does not show `m` as the last move played, which
    /// means the caller's history and the board disagree.
    pub fn unplay(&mut self, m: Move, undo: UndoInfo) {
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;

        let placed = m.promotion().unwrap_or(m.piece());
        let landed = self.board.take(m.to());
        assert_eq!(
            landed,
            Some((placed, us)),
            "invariant violated: undoing {} but {} holds {:?}",
            m,
            m.to(),
            landed
        );
        self.board.set(m.from(), Some((m.piece(), us)));

        if let Some((rook_from, rook_to)) = castling_rook_squares(m.flag(), us) {
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        match (m.en_passant_victim(us), m.captured()) {
            (Some(victim), _) => self.board.set(victim, Some((Piece::Pawn, them))),
            (None, Some(captured)) => self.board.set(m.to(), Some((captured, them))),
            (None, None) => {}
        }

        self.side_to_move = us;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
