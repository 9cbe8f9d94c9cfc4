use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

pub const ROOT_ENV: &str = "ROOT_PATH";
pub const POSITION_FILE: &str = "chess_game/chess_positions_as_fen.txt";
pub const ENGINE_FILE: &str = "stockfish/stockfish";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {0} is empty")]
    EmptyVar(&'static str),
}

/// Search and resource options handed to the engine on startup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct EngineSettings {
    pub depth: u32,
    pub threads: u32,
    pub hash_mb: u32,
    pub skill_level: Option<u8>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { depth: 15, threads: 1, hash_mb: 16, skill_level: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HarnessConfig {
    pub root: PathBuf,
    pub position_file: PathBuf,
    pub engine_path: PathBuf,
    pub engine: EngineSettings,
}

impl HarnessConfig {
    /// Lay out the position file and engine binary under `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            position_file: root.join(POSITION_FILE),
            engine_path: root.join(ENGINE_FILE),
            root,
            engine: EngineSettings::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup(ROOT_ENV).ok_or(ConfigError::MissingVar(ROOT_ENV))?;
        if root.trim().is_empty() {
            return Err(ConfigError::EmptyVar(ROOT_ENV));
        }
        debug!("Looking up environment variable {ROOT_ENV}={root}");
        Ok(Self::from_root(root))
    }

    pub fn with_engine_path(mut self, path: impl AsRef<Path>) -> Self {
        self.engine_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_engine_settings(mut self, engine: EngineSettings) -> Self {
        self.engine = engine;
        self
    }
}
