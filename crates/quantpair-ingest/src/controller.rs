//! Streaming session ownership.

use crate::config::IngestConfig;
use crate::connection::{ConnectionState, ConnectionStatus, StatusMap, SymbolConnection};
use crate::feed::FeedConnector;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use quantpair_store::TickSink;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

/// Identity of the active streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    /// Unique session id.
    pub id: Uuid,
    /// When the session was started.
    pub started_at: DateTime<Utc>,
}

struct StreamSession {
    info: SessionInfo,
    cancel: CancellationToken,
    tasks: HashMap<String, JoinHandle<()>>,
}

impl StreamSession {
    fn new() -> Self {
        Self {
            info: SessionInfo {
                id: Uuid::new_v4(),
                started_at: Utc::now(),
            },
            cancel: CancellationToken::new(),
            tasks: HashMap::new(),
        }
    }
}

/// Owns the single live streaming session.
///
/// At most one connection task runs per symbol no matter how many times, or
/// how concurrently, [`start`](Self::start) is called. [`stop`](Self::stop)
/// cancels every task and waits for each to finish, so no tick is written
/// after it returns.
pub struct StreamController {
    connector: Arc<dyn FeedConnector>,
    sink: Arc<dyn TickSink>,
    config: IngestConfig,
    session: Mutex<Option<StreamSession>>,
    active: RwLock<Option<SessionInfo>>,
    status: StatusMap,
}

impl std::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamController")
            .field("config", &self.config)
            .field("session", &*self.active.read())
            .finish_non_exhaustive()
    }
}

impl StreamController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(
        connector: Arc<dyn FeedConnector>,
        sink: Arc<dyn TickSink>,
        config: IngestConfig,
    ) -> Self {
        Self {
            connector,
            sink,
            config,
            session: Mutex::new(None),
            active: RwLock::new(None),
            status: StatusMap::default(),
        }
    }

    /// Starts streaming `symbols`, opening a session if none is active.
    ///
    /// Symbols that already have a running connection are skipped. Returns
    /// the symbols for which a new connection task was spawned.
    ///
    /// Must be called from within a Tokio runtime; connection tasks are
    /// spawned onto it.
    pub async fn start<I, S>(&self, symbols: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = self.session.lock().await;
        let session = guard.get_or_insert_with(|| {
            let session = StreamSession::new();
            info!(session = %session.info.id, "Streaming session started");
            session
        });
        *self.active.write() = Some(session.info);

        session.tasks.retain(|symbol, handle| {
            let alive = !handle.is_finished();
            if !alive {
                error!(%symbol, "Connection task exited unexpectedly");
            }
            alive
        });

        let mut started = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim().to_ascii_lowercase();
            if symbol.is_empty() || session.tasks.contains_key(&symbol) {
                continue;
            }

            self.status
                .write()
                .insert(symbol.clone(), ConnectionStatus::default());
            let connection = SymbolConnection {
                symbol: symbol.clone(),
                connector: Arc::clone(&self.connector),
                sink: Arc::clone(&self.sink),
                config: self.config.clone(),
                cancel: session.cancel.child_token(),
                status: Arc::clone(&self.status),
            };
            session
                .tasks
                .insert(symbol.clone(), tokio::spawn(connection.run()));
            info!(session = %session.info.id, %symbol, "Connection task started");
            started.push(symbol);
        }
        started
    }

    /// Stops the active session and waits for every connection task to exit.
    ///
    /// A no-op when nothing is streaming. Returns the number of tasks stopped.
    pub async fn stop(&self) -> usize {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.take() else {
            return 0;
        };

        session.cancel.cancel();
        let stopped = session.tasks.len();
        for (symbol, handle) in session.tasks {
            if let Err(e) = handle.await {
                error!(%symbol, error = %e, "Connection task failed");
                if let Some(status) = self.status.write().get_mut(&symbol) {
                    status.state = ConnectionState::Stopped;
                }
            }
        }
        *self.active.write() = None;
        info!(session = %session.info.id, connections = stopped, "Streaming session stopped");
        stopped
    }

    /// Returns whether a session is active.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.active.read().is_some()
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<SessionInfo> {
        *self.active.read()
    }

    /// Returns the symbols whose connection loop has not stopped, sorted.
    #[must_use]
    pub fn active_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .status
            .read()
            .iter()
            .filter(|(_, status)| status.state != ConnectionState::Stopped)
            .map(|(symbol, _)| symbol.clone())
            .collect();
        symbols.sort();
        symbols
    }

    /// Returns a snapshot of every known connection, keyed by symbol.
    #[must_use]
    pub fn statuses(&self) -> BTreeMap<String, ConnectionStatus> {
        self.status
            .read()
            .iter()
            .map(|(symbol, status)| (symbol.clone(), *status))
            .collect()
    }
}
