//! Error types for docent

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DocentError
pub type Result<T> = std::result::Result<T, DocentError>;

/// Error type alias for convenience
pub type Error = DocentError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for docent
#[derive(Debug, Error)]
pub enum DocentError {
    #[error("Unreadable document {}: {reason}", .path.display())]
    UnreadableDocument { path: PathBuf, reason: String },

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Index unavailable at {}: {reason}", .path.display())]
    IndexUnavailable { path: PathBuf, reason: String },

    #[error("LLM provider error: {0}")]
    LlmProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DocentError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn index_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::IndexUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnreadableDocument { .. } | Self::IndexUnavailable { .. } => {
                exit_codes::NOT_FOUND
            }
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

impl From<rusqlite::Error> for DocentError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
