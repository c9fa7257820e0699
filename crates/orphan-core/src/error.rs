//! Error types for orphan-command

use crate::entity::EntityKind;
use thiserror::Error;

/// Result type alias using OrphanError
pub type Result<T> = std::result::Result<T, OrphanError>;

/// Error type alias for convenience
pub type Error = OrphanError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for orphan-command
#[derive(Debug, Error)]
pub enum OrphanError {
    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Query execution error: {0}")]
    QueryExecution(String),

    #[error("Could not delete {kind} with ID {id}!")]
    DeletionFailed { kind: EntityKind, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl OrphanError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownEntityKind(_) | Self::Config(_) | Self::InvalidInput(_) => {
                exit_codes::INVALID_INPUT
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
