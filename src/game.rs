use std::fmt;

use cozy_chess::Color;
use log::info;

use crate::error::{HarnessError, Result};
use crate::fen::{color_char, Fen};
use crate::oracle::{Oracle, OracleError};
use crate::resolver::{Decision, MoveResolver};
use crate::store::PositionStore;

/// What one invocation reports back to the player.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RoundOutcome {
    pub decision: Decision,
    pub player_move: String,
    /// Set once the engine has replied, whether or not that ended the game.
    pub engine_move: Option<String>,
    /// Last position reached this round. Only persisted when the game goes on.
    pub position: Option<Fen>,
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decision {
            Decision::WhiteWins => f.write_str("winner: white"),
            Decision::BlackWins => f.write_str("winner: black"),
            Decision::Stalemate => f.write_str("stalemate"),
            Decision::Illegal => f.write_str("illegal move"),
            Decision::Continue => write!(f, "black move: {}", self.engine_move.as_deref().unwrap_or("")),
        }
    }
}

/// Observer for positions reached mid-round, e.g. to print the board.
pub trait RoundObserver {
    fn position_reached(&mut self, mover: &str, mv: &str, position: &Fen);
}

impl RoundObserver for () {
    fn position_reached(&mut self, _mover: &str, _mv: &str, _position: &Fen) {}
}

/// One full round: the player's move, the engine's reply, then persist.
pub fn play_round<O: Oracle>(
    store: &PositionStore,
    resolver: &mut MoveResolver<O>,
    player_move: &str,
) -> Result<RoundOutcome> {
    play_round_observed(store, resolver, player_move, &mut ())
}

pub fn play_round_observed<O: Oracle, V: RoundObserver + ?Sized>(
    store: &PositionStore,
    resolver: &mut MoveResolver<O>,
    player_move: &str,
    observer: &mut V,
) -> Result<RoundOutcome> {
    let start = store.load()?;
    let to_move = start.active_color()?;
    if to_move != Color::White {
        return Err(HarnessError::TurnOrder { found: color_char(to_move) });
    }

    let mut outcome = RoundOutcome {
        decision: Decision::Continue,
        player_move: player_move.to_string(),
        engine_move: None,
        position: None,
    };

    let first = resolver.apply(&start, player_move)?;
    if let Some(pos) = &first.position {
        observer.position_reached("player", player_move, pos);
    }
    if first.decision.is_terminal() {
        info!("round over after player move {player_move}: {}", first.decision);
        outcome.decision = first.decision;
        outcome.position = first.position;
        return Ok(outcome);
    }
    let (Some(after_player), Some(reply)) = (first.position, first.best_reply) else {
        return Err(OracleError::Protocol("game continues but the engine gave no reply".to_string()).into());
    };

    let second = resolver.apply(&after_player, &reply)?;
    if let Some(pos) = &second.position {
        observer.position_reached("engine", &reply, pos);
    }
    outcome.decision = second.decision;
    outcome.engine_move = Some(reply);
    outcome.position = second.position;
    if outcome.decision.is_terminal() {
        info!("round over after engine move: {}", outcome.decision);
        return Ok(outcome);
    }
    if let Some(pos) = &outcome.position {
        store.save(pos)?;
        info!("{player_move} answered by {}; position saved", outcome.engine_move.as_deref().unwrap_or("?"));
    }
    Ok(outcome)
}
