use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the POI library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a record or patch violates a field constraint.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Raised when the directory holding the database file cannot be created.
    #[error("failed to prepare database directory {path}")]
    DatabaseDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for connection pool errors (pool exhausted, connection init failed).
    #[error(transparent)]
    Pool(#[from] r2d2::Error),
}

impl Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether this error was caused by bad input rather than the storage layer.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
