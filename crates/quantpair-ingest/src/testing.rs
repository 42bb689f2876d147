//! Scripted feeds and in-memory sinks for ingestion tests.

use crate::backoff::BackoffConfig;
use crate::config::IngestConfig;
use crate::error::ConnectionError;
use crate::feed::{FeedConnector, FeedStream};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use parking_lot::Mutex;
use quantpair_store::{StorageError, TickSink};
use quantpair_types::{Tick, TickError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What one connect call yields.
pub(crate) enum Script {
    /// Deliver the messages, then keep the connection open.
    Hold(Vec<String>),
    /// Deliver the messages, then drop the connection.
    End(Vec<String>),
    /// Refuse the connection.
    Fail,
    /// Never complete the connection attempt.
    Stall,
}

impl Script {
    pub(crate) const fn hold(messages: Vec<String>) -> Self {
        Self::Hold(messages)
    }

    pub(crate) const fn end(messages: Vec<String>) -> Self {
        Self::End(messages)
    }
}

/// Connector replaying queued scripts per symbol; an empty queue holds an
/// idle connection open.
pub(crate) struct ScriptedFeed {
    scripts: Mutex<HashMap<String, VecDeque<Script>>>,
    connects: Mutex<HashMap<String, usize>>,
}

impl ScriptedFeed {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            connects: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn push(&self, symbol: &str, script: Script) {
        self.scripts
            .lock()
            .entry(symbol.to_string())
            .or_default()
            .push_back(script);
    }

    pub(crate) fn connects(&self, symbol: &str) -> usize {
        self.connects.lock().get(symbol).copied().unwrap_or(0)
    }

    pub(crate) fn total_connects(&self) -> usize {
        self.connects.lock().values().sum()
    }
}

#[async_trait]
impl FeedConnector for ScriptedFeed {
    async fn connect(&self, symbol: &str) -> Result<FeedStream, ConnectionError> {
        *self.connects.lock().entry(symbol.to_string()).or_default() += 1;
        let script = self
            .scripts
            .lock()
            .get_mut(symbol)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Script::Hold(Vec::new()));

        let messages = |items: Vec<String>| {
            stream::iter(items.into_iter().map(Ok::<String, ConnectionError>))
        };
        match script {
            Script::Hold(items) => Ok(messages(items).chain(stream::pending()).boxed()),
            Script::End(items) => Ok(messages(items).boxed()),
            Script::Fail => Err(ConnectionError::Connect {
                url: format!("test://{symbol}"),
                reason: "refused".to_string(),
            }),
            Script::Stall => std::future::pending().await,
        }
    }
}

/// Sink collecting ticks in memory, optionally rejecting the first writes.
pub(crate) struct MemorySink {
    ticks: Mutex<Vec<Tick>>,
    failures_left: AtomicUsize,
}

impl MemorySink {
    pub(crate) fn new() -> Self {
        Self::failing_first(0)
    }

    pub(crate) fn failing_first(failures: usize) -> Self {
        Self {
            ticks: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(failures),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ticks.lock().len()
    }

    pub(crate) fn ticks(&self) -> Vec<Tick> {
        self.ticks.lock().clone()
    }
}

impl TickSink for MemorySink {
    fn insert(&self, tick: &Tick) -> quantpair_store::Result<()> {
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StorageError::InvalidTick(TickError::EmptySymbol));
        }
        self.ticks.lock().push(tick.clone());
        Ok(())
    }
}

pub(crate) fn trade(symbol: &str, timestamp: i64, price: f64) -> String {
    format!(r#"{{"e":"trade","s":"{symbol}","p":"{price}","q":"1.0","T":{timestamp}}}"#)
}

pub(crate) fn fast_config() -> IngestConfig {
    IngestConfig::default()
        .with_backoff(BackoffConfig {
            base_delay_ms: 1,
            max_delay_ms: 5,
            min_delay_ms: 1,
        })
        .with_connect_timeout(Duration::from_secs(5))
        .with_idle_timeout(Duration::from_secs(30))
}

/// Polls `condition` for up to two seconds.
pub(crate) async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..400 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Blocking variant of [`wait_until`] for non-async callers.
pub(crate) fn wait_until_blocking(condition: impl Fn() -> bool) -> bool {
    for _ in 0..400 {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
