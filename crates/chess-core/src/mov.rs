//! Move representation and coordinate notation.

use crate::{Board, Color, CoordinateError, Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised while reading a move in coordinate notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move text '{0}': expected 4 or 5 characters like e2e4 or e7e8q")]
    InvalidLength(String),

    #[error(transparent)]
    InvalidSquare(#[from] CoordinateError),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("no piece on {0}")]
    EmptySquare(Square),
}

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Promotion flag for a piece kind, if it is a legal promotion target.
    pub const fn promote_to(piece: Piece) -> Option<MoveFlag> {
        match piece {
            Piece::Knight => Some(MoveFlag::PromoteKnight),
            Piece::Bishop => Some(MoveFlag::PromoteBishop),
            Piece::Rook => Some(MoveFlag::PromoteRook),
            Piece::Queen => Some(MoveFlag::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A single ply.
///
/// Besides origin and destination a move records the piece that moved, the
/// piece it captured and its special-move flag. Those are derived from the
/// position, so equality and hashing only look at origin, destination and
/// promotion choice: a move typed in by a user compares equal to the
/// generator's move for the same squares.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            flag,
        }
    }

    /// Builds a move from two selected squares by reading the board.
    ///
    /// Captures, castling, en passant and double pushes are recognized from
    /// the geometry; legality is not checked here.
    pub fn infer(
        board: &Board,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Self, NotationError> {
        let (piece, color) = board.get(from).ok_or(NotationError::EmptySquare(from))?;
        let mut captured = board
            .get(to)
            .filter(|&(_, c)| c != color)
            .map(|(p, _)| p);
        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;

        let flag = match (piece, promotion) {
            (Piece::Pawn, Some(promo)) => MoveFlag::promote_to(promo)
                .ok_or(NotationError::InvalidPromotion(promo.to_char()))?,
            (_, Some(promo)) => return Err(NotationError::InvalidPromotion(promo.to_char())),
            (Piece::Pawn, None) if d_row.abs() == 2 => MoveFlag::DoublePush,
            (Piece::Pawn, None) if d_col != 0 && captured.is_none() => {
                captured = Some(Piece::Pawn);
                MoveFlag::EnPassant
            }
            (Piece::King, None) if d_row == 0 && d_col == 2 => MoveFlag::CastleKingside,
            (Piece::King, None) if d_row == 0 && d_col == -2 => MoveFlag::CastleQueenside,
            _ => MoveFlag::Normal,
        };
        Ok(Move::new(from, to, piece, captured, flag))
    }

    /// Parses coordinate notation against a board (inverse of [`Move::to_algebraic`]).
    pub fn from_algebraic(s: &str, board: &Board) -> Result<Self, NotationError> {
        let (from, to, promotion) = parse_coordinate_move(s)?;
        Move::infer(board, from, to, promotion)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The kind of piece that moved (a pawn, for promotions).
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The kind of piece captured, if any. For en passant this is the pawn
    /// beside the destination, not on it.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.flag.promotion_piece()
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        self.flag.is_castling()
    }

    /// Square of the pawn removed by an en passant capture made by `mover`.
    #[inline]
    pub fn en_passant_victim(self, mover: Color) -> Option<Square> {
        if self.is_en_passant() {
            self.to.offset(-mover.forward(), 0)
        } else {
            None
        }
    }

    /// Returns coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_algebraic(self) -> String {
        match self.promotion() {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// A placeholder, never a legal move.
    pub const NULL: Move = Move::new(Square::A8, Square::A8, Piece::Pawn, None, MoveFlag::Normal);
}

/// Splits coordinate notation into origin, destination and promotion choice.
pub fn parse_coordinate_move(s: &str) -> Result<(Square, Square, Option<Piece>), NotationError> {
    if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
        return Err(NotationError::InvalidLength(s.to_string()));
    }
    let from = Square::from_algebraic(&s[0..2])?;
    let to = Square::from_algebraic(&s[2..4])?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(Piece::from_promotion_char(c).ok_or(NotationError::InvalidPromotion(c))?),
        None => None,
    };
    Ok((from, to, promotion))
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion() == other.promotion()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion().hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_notation() {
        let m = Move::new(sq("e2"), sq("e4"), Piece::Pawn, None, MoveFlag::DoublePush);
        assert_eq!(m.to_algebraic(), "e2e4");

        let promo = Move::new(sq("e7"), sq("e8"), Piece::Pawn, None, MoveFlag::PromoteQueen);
        assert_eq!(promo.to_algebraic(), "e7e8q");
        assert_eq!(format!("{:?}", promo), "Move(e7e8q)");
    }

    #[test]
    fn equality_ignores_derived_fields() {
        let generated = Move::new(sq("e5"), sq("d6"), Piece::Pawn, Some(Piece::Pawn), MoveFlag::EnPassant);
        let typed = Move::new(sq("e5"), sq("d6"), Piece::Pawn, None, MoveFlag::Normal);
        assert_eq!(generated, typed);

        let queen = Move::new(sq("a7"), sq("a8"), Piece::Pawn, None, MoveFlag::PromoteQueen);
        let knight = Move::new(sq("a7"), sq("a8"), Piece::Pawn, None, MoveFlag::PromoteKnight);
        assert_ne!(queen, knight);
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!(parse_coordinate_move("e2e4"), Ok((sq("e2"), sq("e4"), None)));
        assert_eq!(
            parse_coordinate_move("e7e8N"),
            Ok((sq("e7"), sq("e8"), Some(Piece::Knight)))
        );
        assert!(matches!(
            parse_coordinate_move("e2"),
            Err(NotationError::InvalidLength(_))
        ));
        assert!(matches!(
            parse_coordinate_move("e2e4qq"),
            Err(NotationError::InvalidLength(_))
        ));
        assert!(matches!(
            parse_coordinate_move("e2e9"),
            Err(NotationError::InvalidSquare(_))
        ));
        assert_eq!(
            parse_coordinate_move("e7e8k"),
            Err(NotationError::InvalidPromotion('k'))
        );
        assert!(parse_coordinate_move("é2e4").is_err());
    }

    #[test]
    fn infer_from_board() {
        let board = Board::standard();
        let push = Move::from_algebraic("e2e4", &board).unwrap();
        assert_eq!(push.flag(), MoveFlag::DoublePush);
        assert_eq!(push.piece(), Piece::Pawn);

        let knight = Move::from_algebraic("g1f3", &board).unwrap();
        assert_eq!(knight.flag(), MoveFlag::Normal);
        assert_eq!(knight.captured(), None);

        assert_eq!(
            Move::from_algebraic("e4e5", &board),
            Err(NotationError::EmptySquare(sq("e4")))
        );
        assert_eq!(
            Move::from_algebraic("g1f3q", &board),
            Err(NotationError::InvalidPromotion('q'))
        );
    }

    #[test]
    fn infer_special_moves() {
        let board = Board::from_fen_placement("r3k2r/8/8/3pP3/8/8/8/R3K2R");
        let ep = Move::from_algebraic("e5d6", &board).unwrap();
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured(), Some(Piece::Pawn));
        assert_eq!(ep.en_passant_victim(Color::White), Some(sq("d5")));

        let short = Move::from_algebraic("e1g1", &board).unwrap();
        assert_eq!(short.flag(), MoveFlag::CastleKingside);
        let long = Move::from_algebraic("e8c8", &board).unwrap();
        assert_eq!(long.flag(), MoveFlag::CastleQueenside);

        let capture = Move::from_algebraic("a1a8", &board).unwrap();
        assert_eq!(capture.captured(), Some(Piece::Rook));
    }

    #[test]
    fn move_flag_promotion_piece() {
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        for piece in Piece::PROMOTIONS {
            let flag = MoveFlag::promote_to(piece).unwrap();
            assert!(flag.is_promotion());
            assert_eq!(flag.promotion_piece(), Some(piece));
        }
        assert_eq!(MoveFlag::promote_to(Piece::King), None);
    }

    #[test]
    fn move_flag_is_castling() {
        assert!(!MoveFlag::Normal.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::PromoteQueen.is_castling());
    }
}
