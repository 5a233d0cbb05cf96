//! Parsing of the lines typed at the prompt.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{0}' needs a file path")]
    MissingPath(&'static str),
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
}

/// Commands accepted by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move in coordinate notation ("e2e4", "e7e8q").
    Move(String),
    /// Take back the last move.
    Undo,
    /// List the legal moves.
    Moves,
    /// Print the board.
    Board,
    /// Print the position as FEN.
    Fen,
    /// Print whose turn it is and whether the game is over.
    Status,
    /// Start again from the configured position.
    New,
    /// Write the game record to a file.
    Save(PathBuf),
    /// Replace the game with one read from a file.
    Load(PathBuf),
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parse one input line.
    ///
    /// Keywords are matched first; any other 4 or 5 character word is taken
    /// as a move and left for the engine to validate.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd {
            "" => Ok(Command::Empty),
            "undo" | "z" => Ok(Command::Undo),
            "moves" => Ok(Command::Moves),
            "board" => Ok(Command::Board),
            "fen" => Ok(Command::Fen),
            "status" => Ok(Command::Status),
            "new" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "save" => Self::parse_path(parts.next(), "save").map(Command::Save),
            "load" => Self::parse_path(parts.next(), "load").map(Command::Load),
            "move" => parts
                .next()
                .map(|m| Command::Move(m.to_string()))
                .ok_or_else(|| CommandError::Unknown(input.to_string())),
            mv if (4..=5).contains(&mv.len()) => Ok(Command::Move(mv.to_string())),
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }

    fn parse_path(arg: Option<&str>, name: &'static str) -> Result<PathBuf, CommandError> {
        arg.map(PathBuf::from).ok_or(CommandError::MissingPath(name))
    }
}

/// Text printed by `help`.
pub const HELP: &str = "\
Commands:
  e2e4, e7e8q    make a move (promotion letter q, r, b or n)
  undo, z        take back the last move
  moves          list legal moves
  board          print the board
  fen            print the position as FEN
  status         show whose turn it is and the game state
  new            start a new game
  save <file>    save the game as JSON
  load <file>    load a saved game
  quit           leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_moves() {
        assert_eq!(Command::parse("e2e4"), Ok(Command::Move("e2e4".to_string())));
        assert_eq!(Command::parse("  e7e8q \n"), Ok(Command::Move("e7e8q".to_string())));
        assert_eq!(Command::parse("move g1f3"), Ok(Command::Move("g1f3".to_string())));
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(Command::parse("undo"), Ok(Command::Undo));
        assert_eq!(Command::parse("z"), Ok(Command::Undo));
        assert_eq!(Command::parse("moves"), Ok(Command::Moves));
        assert_eq!(Command::parse("board"), Ok(Command::Board));
        assert_eq!(Command::parse("fen"), Ok(Command::Fen));
        assert_eq!(Command::parse("status"), Ok(Command::Status));
        assert_eq!(Command::parse("new"), Ok(Command::New));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::Empty));
    }

    #[test]
    fn parse_save_and_load() {
        assert_eq!(
            Command::parse("save games/one.json"),
            Ok(Command::Save(PathBuf::from("games/one.json")))
        );
        assert_eq!(
            Command::parse("load one.json"),
            Ok(Command::Load(PathBuf::from("one.json")))
        );
        assert_eq!(Command::parse("save"), Err(CommandError::MissingPath("save")));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Command::parse("resign now"),
            Err(CommandError::Unknown("resign now".to_string()))
        );
        assert!(Command::parse("e4").is_err());
        assert!(Command::parse("move").is_err());
    }
}
