//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] and the algebraic coordinate mapping
//! - [`Board`], a plain 8x8 container of pieces
//! - [`Move`] and coordinate move notation
//! - FEN parsing and serialization

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::{Board, Cell};
pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{parse_coordinate_move, Move, MoveFlag, NotationError};
pub use piece::Piece;
pub use square::{algebraic_to_square, square_to_algebraic, CoordinateError, Square};
