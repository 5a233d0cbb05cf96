//! Interactive play loop.
//!
//! Reads commands line by line and writes the board and replies to the
//! output. Errors from a single command are reported and the loop carries
//! on; only I/O failures end the session.

use crate::command::{Command, CommandError, HELP};
use crate::config::ChessConfig;
use chess_engine::{GameError, GameRecord, GameState, GameStatus, RecordError};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render board")]
    Render(#[from] std::fmt::Error),
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game bound to an input and an output stream.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    game: GameState,
    config: ChessConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, game: GameState, config: ChessConfig) -> Self {
        Self {
            reader,
            writer,
            game,
            config,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), SessionError> {
        self.print_board()?;
        loop {
            write!(self.writer, "{} > ", self.game.side_to_move())?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.writer)?;
                return Ok(());
            }

            match Command::parse(&line).map_err(SessionError::from).and_then(|cmd| self.execute(cmd)) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(SessionError::Io(e)) => return Err(SessionError::Io(e)),
                Err(e) => {
                    warn!(input = line.trim(), "command failed: {}", e);
                    writeln!(self.writer, "error: {}", e)?;
                }
            }
        }
    }

    /// Carries out one command.
    pub fn execute(&mut self, cmd: Command) -> Result<Flow, SessionError> {
        match cmd {
            Command::Move(text) => {
                self.game.make_move_str(&text)?;
                self.print_board()?;
                self.print_outcome()?;
            }
            Command::Undo => match self.game.undo_move() {
                Some(mv) => {
                    writeln!(self.writer, "took back {}", mv)?;
                    self.print_board()?;
                }
                None => writeln!(self.writer, "nothing to undo")?,
            },
            Command::Moves => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves()
                    .iter()
                    .map(|m| m.to_algebraic())
                    .collect();
                writeln!(self.writer, "{} legal moves: {}", moves.len(), moves.join(" "))?;
            }
            Command::Board => self.print_board()?,
            Command::Fen => writeln!(self.writer, "{}", self.game.to_fen())?,
            Command::Status => {
                writeln!(
                    self.writer,
                    "{} to move, ply {}, {}",
                    self.game.side_to_move(),
                    self.game.ply_count(),
                    self.game.status()
                )?;
            }
            Command::New => {
                self.game = GameState::from_fen(&self.config.start_fen)?;
                info!(fen = %self.config.start_fen, "new game");
                self.print_board()?;
            }
            Command::Save(path) => {
                self.game.record().save(&path)?;
                info!(path = %path.display(), plies = self.game.ply_count(), "saved game");
                writeln!(self.writer, "saved to {}", path.display())?;
            }
            Command::Load(path) => {
                self.game = GameRecord::load(&path)?;
                info!(path = %path.display(), plies = self.game.ply_count(), "loaded game");
                self.print_board()?;
                self.print_outcome()?;
            }
            Command::Help => writeln!(self.writer, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn print_board(&mut self) -> Result<(), SessionError> {
        let mut out = String::new();
        self.game.board().render(
            &mut out,
            self.config.show_coordinates,
            self.config.unicode_pieces,
        )?;
        write!(self.writer, "{}", out)?;
        Ok(())
    }

    fn print_outcome(&mut self) -> Result<(), SessionError> {
        match self.game.status() {
            GameStatus::Active => {
                let us = self.game.side_to_move();
                if self.game.is_in_check(us) {
                    writeln!(self.writer, "{} is in check", us)?;
                }
            }
            status => writeln!(self.writer, "game over: {}", status)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (String, GameState) {
        let mut output = Vec::new();
        let game = GameState::new();
        let config = ChessConfig {
            show_coordinates: false,
            ..ChessConfig::default()
        };
        let game = {
            let mut session = Session::new(Cursor::new(input.to_string()), &mut output, game, config);
            session.run().unwrap();
            session.game().clone()
        };
        (String::from_utf8(output).unwrap(), game)
    }

    #[test]
    fn plays_and_undoes_moves() {
        let (out, game) = run("e2e4\ne7e5\nz\nfen\nquit\n");
        assert_eq!(game.ply_count(), 1);
        assert!(out.contains("took back e7e5"));
        assert!(out.contains("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"));
    }

    #[test]
    fn reports_errors_and_keeps_going() {
        let (out, game) = run("e2e5\nfoo bar\nundo\ne2e4\n");
        assert!(out.contains("error: illegal move: e2e5"));
        assert!(out.contains("error: unknown command 'foo bar'"));
        assert!(out.contains("nothing to undo"));
        assert_eq!(game.ply_count(), 1);
    }

    #[test]
    fn announces_mate() {
        let (out, game) = run("f2f3\ne7e5\ng2g4\nd8h4\na2a3\n");
        assert!(out.contains("game over: checkmate, Black wins"));
        assert!(out.contains("error: game is over"));
        assert!(game.is_checkmate());
    }

    #[test]
    fn lists_moves() {
        let (out, _) = run("moves\n");
        assert!(out.contains("20 legal moves: a2a3 a2a4"));
    }

    #[test]
    fn board_without_coordinates() {
        let (out, _) = run("quit\n");
        assert!(out.starts_with("r n b q k b n r\n"));
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("chess-session-{}.json", std::process::id()));
        let script = format!("d2d4\nsave {0}\nnew\nload {0}\nstatus\n", path.display());
        let (out, game) = run(&script);
        std::fs::remove_file(&path).unwrap();

        assert!(out.contains("saved to"));
        assert!(out.contains("Black to move, ply 1, in progress"));
        assert_eq!(game.ply_count(), 1);
    }
}
