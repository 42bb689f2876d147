//! Per-symbol connection loop.

use crate::backoff::Backoff;
use crate::config::IngestConfig;
use crate::error::ConnectionError;
use crate::feed::{FeedConnector, FeedStream};
use crate::message::parse_trade;
use futures::StreamExt;
use parking_lot::RwLock;
use quantpair_store::TickSink;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Lifecycle of one symbol's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Registered but not yet connecting.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// Connected and receiving messages.
    Streaming,
    /// Waiting out the backoff delay after a failure.
    Reconnecting,
    /// The loop has exited.
    Stopped,
}

impl ConnectionState {
    /// Returns the lowercase name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Streaming => "streaming",
            Self::Reconnecting => "reconnecting",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for one symbol's connection within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Successful connection attempts.
    pub connects: u64,
    /// Times the loop went back to waiting after a failure or drop.
    pub reconnects: u64,
    /// Ticks handed to the sink successfully.
    pub ticks_written: u64,
    /// Messages dropped because they could not be parsed.
    pub parse_errors: u64,
    /// Ticks dropped because the sink rejected them.
    pub storage_errors: u64,
}

/// State and counters of one symbol's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Current lifecycle state.
    pub state: ConnectionState,
    /// Counters since the connection was started.
    pub stats: ConnectionStats,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            stats: ConnectionStats::default(),
        }
    }
}

pub(crate) type StatusMap = Arc<RwLock<HashMap<String, ConnectionStatus>>>;

enum PumpOutcome {
    Cancelled,
    Lost(String),
}

/// Owns one symbol's connect / read / reconnect cycle until cancelled.
pub(crate) struct SymbolConnection {
    pub(crate) symbol: String,
    pub(crate) connector: Arc<dyn FeedConnector>,
    pub(crate) sink: Arc<dyn TickSink>,
    pub(crate) config: IngestConfig,
    pub(crate) cancel: CancellationToken,
    pub(crate) status: StatusMap,
}

impl SymbolConnection {
    /// Runs until the cancellation token fires.
    ///
    /// Connection failures, malformed messages and rejected writes are logged
    /// and never end the loop.
    pub(crate) async fn run(self) {
        let mut backoff = Backoff::new(self.config.backoff.clone());

        loop {
            self.set_state(ConnectionState::Connecting);
            let attempt = tokio::time::timeout(
                self.config.connect_timeout,
                self.connector.connect(&self.symbol),
            );
            let connected = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                result = attempt => result.unwrap_or_else(|_| {
                    Err(ConnectionError::ConnectTimeout(self.symbol.clone()))
                }),
            };

            match connected {
                Ok(stream) => {
                    info!(symbol = %self.symbol, "Feed connected");
                    self.update(|status| {
                        status.state = ConnectionState::Streaming;
                        status.stats.connects += 1;
                    });
                    match self.pump(stream, &mut backoff).await {
                        PumpOutcome::Cancelled => break,
                        PumpOutcome::Lost(reason) => {
                            warn!(symbol = %self.symbol, %reason, "Feed connection lost");
                        }
                    }
                }
                Err(e @ ConnectionError::ConnectTimeout(_)) => warn!(
                    symbol = %self.symbol,
                    error = %e,
                    timeout_ms = self.config.connect_timeout.as_millis() as u64,
                    "Feed connect timed out"
                ),
                Err(e) => warn!(symbol = %self.symbol, error = %e, "Feed connect failed"),
            }

            let delay = backoff.next_delay();
            self.update(|status| {
                status.state = ConnectionState::Reconnecting;
                status.stats.reconnects += 1;
            });
            debug!(
                symbol = %self.symbol,
                attempt = backoff.attempt(),
                delay_ms = delay.as_millis() as u64,
                "Waiting before reconnect"
            );
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        self.set_state(ConnectionState::Stopped);
        debug!(symbol = %self.symbol, "Connection loop stopped");
    }

    async fn pump(&self, mut stream: FeedStream, backoff: &mut Backoff) -> PumpOutcome {
        loop {
            let next = tokio::select! {
                biased;
                () = self.cancel.cancelled() => return PumpOutcome::Cancelled,
                next = tokio::time::timeout(self.config.idle_timeout, stream.next()) => next,
            };

            match next {
                Err(_) => return PumpOutcome::Lost("idle timeout".to_string()),
                Ok(None) => return PumpOutcome::Lost("stream ended".to_string()),
                Ok(Some(Err(e))) => return PumpOutcome::Lost(e.to_string()),
                Ok(Some(Ok(text))) => {
                    backoff.reset();
                    self.handle_message(&text).await;
                }
            }
        }
    }

    /// Parses and stores one message. The write is never interrupted by
    /// cancellation.
    async fn handle_message(&self, text: &str) {
        let tick = match parse_trade(text, &self.symbol) {
            Ok(Some(tick)) => tick,
            Ok(None) => return,
            Err(e) => {
                warn!(symbol = %self.symbol, error = %e, "Dropping malformed message");
                self.update(|status| status.stats.parse_errors += 1);
                return;
            }
        };

        let sink = Arc::clone(&self.sink);
        match tokio::task::spawn_blocking(move || sink.insert(&tick)).await {
            Ok(Ok(())) => self.update(|status| status.stats.ticks_written += 1),
            Ok(Err(e)) => {
                warn!(symbol = %self.symbol, error = %e, "Failed to store tick");
                self.update(|status| status.stats.storage_errors += 1);
            }
            Err(e) => {
                error!(symbol = %self.symbol, error = %e, "Storage task failed");
                self.update(|status| status.stats.storage_errors += 1);
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.update(|status| status.state = state);
    }

    fn update(&self, f: impl FnOnce(&mut ConnectionStatus)) {
        let mut statuses = self.status.write();
        f(statuses.entry(self.symbol.clone()).or_default());
    }
}
