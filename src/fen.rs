use std::fmt;
use std::str::FromStr;

use cozy_chess::Color;
use thiserror::Error;

/// Standard starting position.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is empty")]
    Empty,
    #[error("FEN `{0}` has no active color field")]
    MissingActiveColor(String),
    #[error("FEN `{fen}` has invalid active color `{token}` (expected `w` or `b`)")]
    InvalidActiveColor { fen: String, token: String },
    #[error("FEN {0:?} contains control characters")]
    ControlCharacter(String),
}

/// A board position as a FEN string.
///
/// Only the first two fields are checked here (placement and active color);
/// everything else is left to whichever oracle consumes the position. The
/// text is kept exactly as given, surrounding whitespace included, so a
/// stored position is written back byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fen(String);

impl Fen {
    pub fn new(fen: impl Into<String>) -> Result<Self, FenError> {
        let raw = fen.into();
        let text = raw.trim();
        if text.is_empty() {
            return Err(FenError::Empty);
        }
        // A newline inside the position would end the UCI `position` line early.
        if text.chars().any(char::is_control) {
            return Err(FenError::ControlCharacter(text.to_string()));
        }
        parse_active_color(text)?;
        Ok(Self(raw))
    }

    pub fn startpos() -> Self {
        Self(STARTPOS.to_string())
    }

    /// The position without surrounding whitespace.
    pub fn as_str(&self) -> &str {
        self.0.trim()
    }

    /// The text as loaded or constructed.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Side to move, read from the second FEN field.
    pub fn active_color(&self) -> Result<Color, FenError> {
        parse_active_color(&self.0)
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Fen {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl serde::Serialize for Fen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub fn parse_active_color(fen: &str) -> Result<Color, FenError> {
    let mut fields = fen.split_whitespace();
    if fields.next().is_none() {
        return Err(FenError::Empty);
    }
    match fields.next() {
        Some("w") => Ok(Color::White),
        Some("b") => Ok(Color::Black),
        Some(token) => Err(FenError::InvalidActiveColor { fen: fen.to_string(), token: token.to_string() }),
        None => Err(FenError::MissingActiveColor(fen.to_string())),
    }
}

pub fn color_char(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}
