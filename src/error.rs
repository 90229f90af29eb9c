//! Error handling module for anno-autosave
//!
//! Provides the crate-wide error type using thiserror. Library code returns
//! these; config file IO and the binary use `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for savegame capture
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Configuration errors (invalid values, conflicting options)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pointer driver errors (connection to the input backend, click/move failures)
    #[error("Input error: {0}")]
    Input(String),

    /// The game has not written the slot file we copy from
    #[error("Savegame not found: {}", path.display())]
    SaveMissing { path: PathBuf },

    /// Copying the slot file into the output folder failed
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

impl CaptureError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }
}
