//! CLI error types

use std::path::PathBuf;

use sprig::error::{ColorError, TreeError};

/// Errors that can occur while running a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    /// Tree command failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Color input rejected.
    #[error(transparent)]
    Color(#[from] ColorError),
}

impl CliError {
    /// Creates a new read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JSON error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
