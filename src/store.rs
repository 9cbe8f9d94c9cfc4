use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::config::HarnessConfig;
use crate::fen::{Fen, FenError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored position at {0}")]
    NotFound(PathBuf),
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stored position at {path} is malformed: {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: FenError,
    },
}

/// The single persisted FEN that carries a game between invocations.
#[derive(Clone, Debug)]
pub struct PositionStore {
    path: PathBuf,
}

impl PositionStore {
    pub fn new(config: &HarnessConfig) -> Self {
        Self::at(&config.position_file)
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Fen, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::Io { path: self.path.clone(), source: e },
        })?;
        Fen::new(raw).map_err(|source| StoreError::InvalidFormat { path: self.path.clone(), source })
    }

    /// Replace the stored position. Readers see either the old or the new
    /// content, never a partial write.
    pub fn save(&self, position: &Fen) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        if let Err(source) = write_then_rename(&tmp, &self.path, position.raw().as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io { path: self.path.clone(), source });
        }
        debug!("stored position {} -> {}", position, self.path.display());
        Ok(())
    }

    /// Start a new game: create the directory if needed and store `position`.
    pub fn reset(&self, position: &Fen) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|source| StoreError::Io { path: dir.to_path_buf(), source })?;
            }
        }
        self.save(position)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = fs::File::create(tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    drop(f);
    fs::rename(tmp, target)
}
