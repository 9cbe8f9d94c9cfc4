//! The engine capability the resolver talks to.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    /// The engine refused the move outright. The resolver turns this into an
    /// `illegal` decision; every other variant is fatal.
    #[error("move `{mv}` rejected: {reason}")]
    Rejected { mv: String, reason: String },
    #[error("position `{fen}` not accepted: {reason}")]
    InvalidPosition { fen: String, reason: String },
    #[error("failed to start engine {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("engine protocol error: {0}")]
    Protocol(String),
}

/// Engine score, always from White's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Evaluation {
    #[serde(rename = "cp")]
    Centipawns(i32),
    Mate(i32),
}

impl Evaluation {
    pub fn is_mate(&self) -> bool {
        matches!(self, Evaluation::Mate(_))
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(cp) => write!(f, "cp {cp}"),
            Evaluation::Mate(n) => write!(f, "mate {n}"),
        }
    }
}

/// Anything that can hold a board, apply UCI moves to it, and search it.
pub trait Oracle {
    fn set_position(&mut self, fen: &str) -> Result<(), OracleError>;

    /// Apply one UCI move to the current board. An engine may either return
    /// `Rejected` or silently leave the board unchanged for a bad move.
    fn apply_move(&mut self, mv: &str) -> Result<(), OracleError>;

    fn position(&mut self) -> Result<String, OracleError>;

    fn best_move(&mut self) -> Result<Option<String>, OracleError>;

    fn evaluation(&mut self) -> Result<Evaluation, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn set_position(&mut self, fen: &str) -> Result<(), OracleError> {
        (**self).set_position(fen)
    }

    fn apply_move(&mut self, mv: &str) -> Result<(), OracleError> {
        (**self).apply_move(mv)
    }

    fn position(&mut self) -> Result<String, OracleError> {
        (**self).position()
    }

    fn best_move(&mut self) -> Result<Option<String>, OracleError> {
        (**self).best_move()
    }

    fn evaluation(&mut self) -> Result<Evaluation, OracleError> {
        (**self).evaluation()
    }
}
