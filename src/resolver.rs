use std::fmt;

use cozy_chess::Color;
use log::{debug, info};

use crate::error::Result;
use crate::fen::Fen;
use crate::oracle::{Oracle, OracleError};

/// Outcome of applying one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Continue,
    Illegal,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl Decision {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Decision::Continue)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Continue => "continue",
            Decision::Illegal => "illegal",
            Decision::WhiteWins => "white-wins",
            Decision::BlackWins => "black-wins",
            Decision::Stalemate => "stalemate",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub decision: Decision,
    /// Position after the move; present whenever the move was accepted,
    /// including when it ended the game.
    pub position: Option<Fen>,
    /// The oracle's preferred reply from `position`, when the game goes on.
    pub best_reply: Option<String>,
}

impl Resolution {
    fn illegal() -> Self {
        Self { decision: Decision::Illegal, position: None, best_reply: None }
    }
}

/// Applies moves through an oracle and classifies what happens next.
pub struct MoveResolver<O: Oracle> {
    oracle: O,
}

impl<O: Oracle> MoveResolver<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn into_inner(self) -> O {
        self.oracle
    }

    pub fn apply(&mut self, position: &Fen, mv: &str) -> Result<Resolution> {
        self.oracle.set_position(position.as_str())?;
        let before = self.oracle.position()?;

        match self.oracle.apply_move(mv) {
            Ok(()) => {}
            Err(OracleError::Rejected { reason, .. }) => {
                info!("move {mv} rejected by oracle: {reason}");
                return Ok(Resolution::illegal());
            }
            Err(e) => return Err(e.into()),
        }

        let after = self.oracle.position()?;
        if after == before {
            info!("move {mv} left the position unchanged; treating as illegal");
            return Ok(Resolution::illegal());
        }
        let new_position = Fen::new(after)?;
        debug!("{mv}: {before} -> {new_position}");

        if let Some(reply) = self.oracle.best_move()? {
            return Ok(Resolution { decision: Decision::Continue, position: Some(new_position), best_reply: Some(reply) });
        }

        let eval = self.oracle.evaluation()?;
        let decision = if eval.is_mate() {
            // The side to move has no moves and is mated.
            match new_position.active_color()? {
                Color::Black => Decision::WhiteWins,
                Color::White => Decision::BlackWins,
            }
        } else {
            Decision::Stalemate
        };
        info!("{mv} ends the game: {decision} ({eval})");
        Ok(Resolution { decision, position: Some(new_position), best_reply: None })
    }
}
