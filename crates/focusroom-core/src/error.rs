//! Core error types for focusroom-core.
//!
//! Every failure a caller can observe maps onto one [`ErrorKind`], which is
//! what the UI layer uses to pick a message and decide whether a retry makes
//! sense.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionId;

/// Core error type for focusroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No identity context for an operation that needs one.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Caller supplied a value the operation cannot accept.
    #[error("Invalid value for '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// Another check-in holds the per-day lock.
    #[error("Another check-in is in progress, please try again")]
    Busy,

    /// Daily check-in cap reached.
    #[error("Check-in limit reached for today ({used}/{limit})")]
    LimitExceeded { used: u32, limit: u32 },

    /// Operation referenced a session that does not exist.
    #[error("Session not found: {id}")]
    NotFound { id: SessionId },

    /// Underlying store unavailable or failing.
    #[error("Store unavailable: {0}")]
    Transient(#[from] DatabaseError),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthenticated,
    InvalidArgument,
    Busy,
    LimitExceeded,
    NotFound,
    Transient,
}

impl CoreError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Unauthenticated => ErrorKind::Unauthenticated,
            CoreError::InvalidArgument { .. } | CoreError::Config(_) | CoreError::Json(_) => {
                ErrorKind::InvalidArgument
            }
            CoreError::Busy => ErrorKind::Busy,
            CoreError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Transient(_) => ErrorKind::Transient,
        }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Stored row could not be decoded
    #[error("Corrupt row in '{table}': {message}")]
    CorruptRow { table: String, message: String },

    /// Background worker running the blocking call went away
    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory cannot be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => match inner.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    DatabaseError::Locked
                }
                _ => DatabaseError::QueryFailed(err.to_string()),
            },
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Transient(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
