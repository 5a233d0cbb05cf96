//! Configuration file loading.
//!
//! Settings come from an optional `chess.toml`. Every field has a default,
//! so an empty or missing file gives the standard setup.

use chess_core::FenParser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for a play session.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChessConfig {
    /// Position new games start from.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Log filter used when `RUST_LOG` is not set (e.g. "warn", "chess_engine=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Print rank and file labels around the board.
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    /// Draw pieces with chess symbols instead of FEN letters.
    #[serde(default)]
    pub unicode_pieces: bool,
}

fn default_start_fen() -> String {
    FenParser::STARTPOS.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ChessConfig {
    fn default() -> Self {
        ChessConfig {
            start_fen: default_start_fen(),
            log_level: default_log_level(),
            show_coordinates: true,
            unicode_pieces: false,
        }
    }
}

impl ChessConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
start_fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"
log_level = "chess_engine=debug"
show_coordinates = false
unicode_pieces = true
"#;
        let config: ChessConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.start_fen, "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(config.log_level, "chess_engine=debug");
        assert!(!config.show_coordinates);
        assert!(config.unicode_pieces);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ChessConfig = toml::from_str("unicode_pieces = true\n").unwrap();
        assert_eq!(config.start_fen, FenParser::STARTPOS);
        assert_eq!(config.log_level, "warn");
        assert!(config.show_coordinates);
        assert!(config.unicode_pieces);

        let empty: ChessConfig = toml::from_str("").unwrap();
        assert_eq!(empty, ChessConfig::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = Path::new("definitely/not/here/chess.toml");
        assert_eq!(ChessConfig::load(path).unwrap(), ChessConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let path = std::env::temp_dir().join(format!("chess-config-{}.toml", std::process::id()));
        std::fs::write(&path, "show_coordinates = \"sometimes\"").unwrap();
        let result = ChessConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
