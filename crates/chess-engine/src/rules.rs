//! Game outcome rules.
//!
//! A game is [`GameStatus::Active`] until the side to move has no legal
//! moves (checkmate or stalemate) or one of the automatic draw rules applies.

use crate::movegen::{generate_moves, is_king_attacked};
use crate::Position;
use chess_core::{Color, Piece};
use std::fmt;

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Where a game stands after the last ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Active,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal moves.
    Stalemate,
    /// Drawn by rule.
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true once the game can no longer continue.
    pub fn is_over(self) -> bool {
        self != GameStatus::Active
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw other than stalemate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// Neither side has the material to deliver mate.
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMoveRule => write!(f, "the fifty-move rule"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

/// Computes the status of a position.
///
/// Mate and stalemate take precedence over the draw rules, so a mate
/// delivered on the hundredth half-move still wins.
pub fn game_status(position: &Position) -> GameStatus {
    let us = position.side_to_move;
    if generate_moves(position).is_empty() {
        return if is_king_attacked(position, us) {
            GameStatus::Checkmate {
                winner: us.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if is_insufficient_material(position) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }

    if position.halfmove_clock >= FIFTY_MOVE_LIMIT {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }

    GameStatus::Active
}

/// Returns true if no sequence of legal moves can end in mate.
///
/// Covers king against king, king and a single minor piece against king,
/// and positions where every remaining bishop stands on one square color.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut knights = 0;
    let mut bishop_square_colors = [false; 2];

    for (sq, piece, _) in position.board.pieces() {
        match piece {
            Piece::King => {}
            Piece::Knight => knights += 1,
            Piece::Bishop => bishop_square_colors[((sq.row() + sq.col()) % 2) as usize] = true,
            Piece::Pawn | Piece::Rook | Piece::Queen => return false,
        }
    }

    let bishop_colors = bishop_square_colors.iter().filter(|&&seen| seen).count();
    match (knights, bishop_colors) {
        (0, 0) | (0, 1) => true,
        (1, 0) => true,
        _ => false,
    }
}
