// One move per invocation against a UCI engine, with the game kept as a FEN on disk.
pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod oracle;
pub mod resolver;
pub mod store;
pub mod uci;

pub use config::{EngineSettings, HarnessConfig};
pub use error::HarnessError;
pub use fen::Fen;
pub use game::{play_round, RoundOutcome};
pub use oracle::{Evaluation, Oracle, OracleError};
pub use resolver::{Decision, MoveResolver, Resolution};
pub use store::PositionStore;
