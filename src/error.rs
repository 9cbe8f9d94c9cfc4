use thiserror::Error;

use crate::config::ConfigError;
use crate::fen::FenError;
use crate::oracle::OracleError;
use crate::store::StoreError;

/// Everything that can stop a round before a decision is reached.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("it is not white's turn in the stored position (active color `{found}`)")]
    TurnOrder { found: char },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
