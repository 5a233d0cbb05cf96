//! Game management with an undoable move history.
//!
//! [`GameState`] owns the current [`Position`] and the log of moves played
//! from its starting position. Moves only enter the log through
//! [`GameState::make_move`], which checks them against the legal move list,
//! and only leave it through [`GameState::undo_move`].

use crate::movegen::{generate_moves, is_king_attacked};
use crate::record::GameRecord;
use crate::rules::{game_status, GameStatus};
use crate::{MoveList, Position, UndoInfo};
use chess_core::{Board, Color, FenError, Move, NotationError};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Error type for game operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The game has already ended.
    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Fen(#[from] FenError),
}

/// A played move together with what is needed to take it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub undo: UndoInfo,
}

/// A chess game: the current position plus the moves that led to it.
#[derive(Debug, Clone)]
pub struct GameState {
    position: Position,
    history: Vec<HistoryEntry>,
    start_pos: Position,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    ///
    /// The status is evaluated immediately, so a game started from a mate
    /// or stalemate accepts no moves.
    pub fn from_position(position: Position) -> Self {
        let status = game_status(&position);
        GameState {
            start_pos: position.clone(),
            position,
            history: Vec::new(),
            status,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        generate_moves(&self.position)
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_attacked(&self.position, color)
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// Status after the last ply.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Makes a move if it is legal in the current position.
    ///
    /// Only the origin, destination and promotion choice of `m` are looked
    /// at; the matching generated move is what gets applied and recorded.
    /// On error the game is left untouched.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }

        let Some(legal) = self.legal_moves().find(&m) else {
            debug!(mv = %m, fen = %self.position.to_fen(), "rejected illegal move");
            return Err(GameError::IllegalMove(m.to_algebraic()));
        };

        self.apply_move(legal);
        Ok(())
    }

    /// Parses coordinate notation ("e2e4", "e7e8q") and makes the move.
    pub fn make_move_str(&mut self, s: &str) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let m = Move::from_algebraic(s, &self.position.board)?;
        self.make_move(m)
    }

    /// Takes back the last move, returning it, or `None` when nothing has
    /// been played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.position.unplay(entry.mv, entry.undo);
        self.status = game_status(&self.position);
        debug!(mv = %entry.mv, ply = self.history.len(), "undid move");
        trace!(fen = %self.position.to_fen());
        Some(entry.mv)
    }

    fn apply_move(&mut self, m: Move) {
        let undo = self.position.play(m);
        self.history.push(HistoryEntry { mv: m, undo });
        self.status = game_status(&self.position);

        debug!(mv = %m, ply = self.history.len(), "applied move");
        trace!(fen = %self.position.to_fen());
        if self.status.is_over() {
            info!(status = %self.status, ply = self.history.len(), "game over");
        }
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Captures the starting position and moves played, for saving.
    pub fn record(&self) -> GameRecord {
        GameRecord {
            start_fen: self.start_pos.to_fen(),
            moves: self.history.iter().map(|e| e.mv.to_algebraic()).collect(),
        }
    }

    /// Rebuilds a game by replaying a record move by move.
    pub fn from_record(record: &GameRecord) -> Result<Self, GameError> {
        let mut game = Self::from_fen(&record.start_fen)?;
        for mv in &record.moves {
            game.make_move_str(mv)?;
        }
        Ok(game)
    }
}
