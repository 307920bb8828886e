// src/infra/errors.rs — Error types for cachesweep

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    // Fatal before any output is produced
    #[error("Input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Executable not found: {}", path.display())]
    MissingExecutable { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    // Infra
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SweepError {
    /// Missing inputs abort the stage before any partial output is written.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            SweepError::MissingInput { .. } | SweepError::MissingExecutable { .. }
        )
    }
}

/// Fail with `MissingInput` unless `path` exists.
pub fn require_input(path: &std::path::Path) -> Result<(), SweepError> {
    if path.exists() {
        Ok(())
    } else {
        Err(SweepError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}
