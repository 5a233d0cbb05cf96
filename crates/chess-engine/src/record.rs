//! Saved games.
//!
//! A [`GameRecord`] stores the starting FEN and the moves in coordinate
//! notation. Loading replays every move through the legality check, so a
//! tampered file fails with an error rather than producing a broken game.

use crate::game::{GameError, GameState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or saving a game record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to access record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record does not replay: {0}")]
    Replay(#[from] GameError),
}

/// Starting position and move list of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the record as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a record and replays it into a game.
    pub fn load(path: impl AsRef<Path>) -> Result<GameState, RecordError> {
        let record = Self::from_json(&std::fs::read_to_string(path)?)?;
        Ok(record.replay()?)
    }

    /// Replays the moves from the starting position.
    pub fn replay(&self) -> Result<GameState, GameError> {
        GameState::from_record(self)
    }
}
