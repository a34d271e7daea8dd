//! Error types for keymerge operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeymergeError>;

#[derive(Error, Debug)]
pub enum KeymergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Key column '{key}' not found in {side} table. Available columns: {available}")]
    MissingKeyColumn {
        key: String,
        side: String,
        available: String,
    },

    #[error("Join error: {message}")]
    Join { message: String },

    #[error("Failed to write '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl KeymergeError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Read {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Missing key column; `available` is rendered as a comma separated list
    pub fn missing_key_column<S: AsRef<str>>(
        key: impl Into<String>,
        side: impl Into<String>,
        available: &[S],
    ) -> Self {
        Self::MissingKeyColumn {
            key: key.into(),
            side: side.into(),
            available: available
                .iter()
                .map(|name| name.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn join(msg: impl Into<String>) -> Self {
        Self::Join {
            message: msg.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
