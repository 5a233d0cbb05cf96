//! Move generation.
//!
//! Generation runs in two phases. [`generate_pseudo_legal`] emits every move
//! that fits a piece's movement pattern and the board occupancy;
//! [`generate_moves`] then plays each candidate on a scratch copy and drops
//! the ones that leave the mover's king attacked.
//!
//! Moves come out in a fixed order: squares in scan order (a8 to h1), and
//! for each piece in the order its rules are listed below.

pub mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, MoveFlag, Piece, Square};

pub use attacks::{is_square_attacked, pawn_attacks};
use attacks::{first_blocker, slider_directions, KING_OFFSETS, KNIGHT_OFFSETS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if a move equal to `m` (same squares and promotion) is listed.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Returns the listed move equal to `m`, carrying the generator's
    /// capture and flag information.
    pub fn find(&self, m: &Move) -> Option<Move> {
        self.iter().find(|listed| *listed == m).copied()
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the given position.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = generate_pseudo_legal(position);

    let us = position.side_to_move;
    moves.retain(|m| {
        let new_pos = make_move(position, *m);
        !is_king_attacked(&new_pos, us)
    });

    moves
}

/// Generates moves that follow piece movement rules for the side to move,
/// without checking whether they expose the mover's king.
///
/// Castling is only emitted when the king is not in check and does not
/// cross an attacked square; the landing square is left to the legality
/// filter like any other king move.
pub fn generate_pseudo_legal(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.side_to_move;

    for (from, piece, color) in position.board.pieces() {
        if color != us {
            continue;
        }
        match piece {
            Piece::Pawn => generate_pawn_moves(position, from, &mut moves),
            Piece::Knight => generate_step_moves(position, from, Piece::Knight, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                generate_slider_moves(position, from, piece, &mut moves)
            }
            Piece::King => {
                generate_step_moves(position, from, Piece::King, &KING_OFFSETS, &mut moves);
                generate_castling_moves(position, from, &mut moves);
            }
        }
    }

    moves
}

/// Pushes a pawn move to `to`, expanding it into all four promotions on the last rank.
fn push_pawn_move(us: Color, from: Square, to: Square, captured: Option<Piece>, moves: &mut MoveList) {
    if to.row() == us.promotion_row() {
        for promo in Piece::PROMOTIONS {
            if let Some(flag) = MoveFlag::promote_to(promo) {
                moves.push(Move::new(from, to, Piece::Pawn, captured, flag));
            }
        }
    } else {
        moves.push(Move::new(from, to, Piece::Pawn, captured, MoveFlag::Normal));
    }
}

/// Pawn pushes, double pushes, captures, en passant.
fn generate_pawn_moves(position: &Position, from: Square, moves: &mut MoveList) {
    let board = &position.board;
    let us = position.side_to_move;
    let them = us.opposite();
    let forward = us.forward();

    if let Some(one) = from.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
        push_pawn_move(us, from, one, None, moves);

        if from.row() == us.pawn_row() {
            if let Some(two) = one.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
                moves.push(Move::new(from, two, Piece::Pawn, None, MoveFlag::DoublePush));
            }
        }
    }

    for to in pawn_attacks(from, us) {
        match board.get(to) {
            Some((captured, color)) if color == them => {
                push_pawn_move(us, from, to, Some(captured), moves);
            }
            None if position.en_passant == Some(to) => {
                let victim = to.offset(-forward, 0);
                if victim.and_then(|sq| board.get(sq)) == Some((Piece::Pawn, them)) {
                    moves.push(Move::new(from, to, Piece::Pawn, Some(Piece::Pawn), MoveFlag::EnPassant));
                }
            }
            _ => {}
        }
    }
}

/// Knight and king steps: each offset once, onto empty or enemy squares.
fn generate_step_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    let us = position.side_to_move;
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match position.board.get(to) {
            None => moves.push(Move::new(from, to, piece, None, MoveFlag::Normal)),
            Some((captured, color)) if color != us => {
                moves.push(Move::new(from, to, piece, Some(captured), MoveFlag::Normal))
            }
            Some(_) => {}
        }
    }
}

/// Bishop, rook and queen rays: run until the edge, stop before a friendly
/// piece, include the first enemy piece as a capture.
fn generate_slider_moves(position: &Position, from: Square, piece: Piece, moves: &mut MoveList) {
    let us = position.side_to_move;
    for &(d_row, d_col) in slider_directions(piece) {
        let mut sq = from;
        while let Some(to) = sq.offset(d_row, d_col) {
            match position.board.get(to) {
                None => moves.push(Move::new(from, to, piece, None, MoveFlag::Normal)),
                Some((captured, color)) => {
                    if color != us {
                        moves.push(Move::new(from, to, piece, Some(captured), MoveFlag::Normal));
                    }
                    break;
                }
            }
            sq = to;
        }
    }
}

/// Generates castling moves if the right is held, the path is clear, and the
/// king neither stands in nor crosses check.
fn generate_castling_moves(position: &Position, from: Square, moves: &mut MoveList) {
    let us = position.side_to_move;
    let them = us.opposite();
    let board = &position.board;
    let row = us.back_row();

    if from != Square::at(row, 4) {
        return;
    }
    let rights = position.castling;
    if !rights.can_castle_kingside(us) && !rights.can_castle_queenside(us) {
        return;
    }

    // Can't castle out of check
    if is_square_attacked(board, from, them) {
        return;
    }

    let rook_home = |col: u8| board.get(Square::at(row, col)) == Some((Piece::Rook, us));
    let empty = |cols: &[u8]| cols.iter().all(|&col| board.is_empty(Square::at(row, col)));

    if rights.can_castle_kingside(us)
        && rook_home(7)
        && empty(&[5, 6])
        && !is_square_attacked(board, Square::at(row, 5), them)
    {
        moves.push(Move::new(from, Square::at(row, 6), Piece::King, None, MoveFlag::CastleKingside));
    }

    if rights.can_castle_queenside(us)
        && rook_home(0)
        && empty(&[1, 2, 3])
        && !is_square_attacked(board, Square::at(row, 3), them)
    {
        moves.push(Move::new(from, Square::at(row, 2), Piece::King, None, MoveFlag::CastleQueenside));
    }
}

/// Returns true if the king of the given color is attacked.
///
/// # Panics
///
/// Panics if that king is missing from the board.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    let king_sq = position.king_square(king_color);
    is_square_attacked(&position.board, king_sq, king_color.opposite())
}

/// Makes a move on a copy of the position and returns the copy.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut new_pos = position.clone();
    new_pos.play(m);
    new_pos
}
