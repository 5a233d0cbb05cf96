//! Chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - Full game state including piece positions, castling rights, etc.
//! - [`GameState`] - Game management with an undoable move history
//! - Legal move generation and attack detection
//! - Checkmate, stalemate and automatic draw detection
//! - [`GameRecord`] - JSON save files that replay through the legality check
//!
//! # Architecture
//!
//! The board is a plain 64-cell array. Moves are generated in two phases:
//! pseudo-legal moves from each piece's movement pattern, then a filter that
//! plays every candidate on a copy of the position and keeps the ones that
//! leave the mover's king safe.
//!
//! # Example
//!
//! ```
//! use chess_engine::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! println!("Legal moves from starting position: {}", game.legal_moves().len());
//!
//! game.make_move_str("e2e4").unwrap();
//! game.make_move_str("e7e5").unwrap();
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//!
//! game.undo_move();
//! assert_eq!(game.ply_count(), 1);
//! assert_eq!(game.status(), GameStatus::Active);
//! ```

mod game;
pub mod movegen;
mod position;
mod record;
pub mod rules;

pub use game::{GameError, GameState, HistoryEntry};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    generate_moves, generate_pseudo_legal, is_king_attacked, is_square_attacked, make_move,
    pawn_attacks, MoveList,
};
pub use position::{castling_rook_squares, CastlingRights, Position, UndoInfo};
pub use record::{GameRecord, RecordError};
pub use rules::{game_status, is_insufficient_material, DrawReason, GameStatus};
