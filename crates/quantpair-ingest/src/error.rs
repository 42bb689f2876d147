//! Ingestion error types.

use quantpair_types::TickError;
use thiserror::Error;

/// The feed could not be reached or the connection dropped.
///
/// Always retried with backoff; never fatal to the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The connection could not be established.
    #[error("Failed to connect to {url}: {reason}")]
    Connect {
        /// The feed URL.
        url: String,
        /// Why the attempt failed.
        reason: String,
    },

    /// The connection attempt for the symbol did not complete in time.
    #[error("Timed out connecting to the {0} feed")]
    ConnectTimeout(String),

    /// The remote side closed the connection.
    #[error("Feed closed by remote: {0}")]
    Closed(String),

    /// The websocket transport failed mid-stream.
    #[error("WebSocket protocol error: {0}")]
    Protocol(String),
}

/// A feed message could not be turned into a tick.
///
/// The message is dropped and the connection continues.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The payload is not valid JSON of the expected shape.
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    /// A numeric field could not be parsed.
    #[error("Invalid number in field '{field}': {value}")]
    InvalidNumber {
        /// The field name.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// The parsed tick violates the data model.
    #[error(transparent)]
    InvalidTick(#[from] TickError),
}

/// The ingest worker thread is no longer accepting commands.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker thread could not be started.
    #[error("Failed to start ingest worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker has shut down.
    #[error("Ingest worker has shut down")]
    Closed,
}
