//! Storage error types.

use quantpair_types::TickError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the tick store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the directory holding the database file.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to open the database file.
    #[error("Failed to open tick store '{path}': {source}")]
    Open {
        /// The database path.
        path: PathBuf,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A query or statement failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The tick violates the data model and was not written.
    #[error("Rejected tick: {0}")]
    InvalidTick(#[from] TickError),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
