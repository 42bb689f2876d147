//! Stream command implementation.
//!
//! Runs an ingest worker until Ctrl-C, logging per-symbol progress and
//! optionally pruning old ticks.

use crate::display::{blocking, open_store};
use anyhow::{Context, Result};
use quantpair_lib::{
    BinanceTradeFeed, FeedConnector, IngestConfig, IngestWorker, StreamController, TickSink,
    TickStore,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Streams `symbols` into the store at `db` until interrupted.
pub(crate) async fn stream(
    db: &Path,
    symbols: Vec<String>,
    retention_hours: Option<u64>,
    status_interval: u64,
    feed_url: &str,
    quiet: bool,
) -> Result<()> {
    let store = Arc::new(open_store(db).await?);
    let controller = Arc::new(StreamController::new(
        Arc::new(BinanceTradeFeed::new(feed_url)) as Arc<dyn FeedConnector>,
        Arc::clone(&store) as Arc<dyn TickSink>,
        IngestConfig::default(),
    ));

    let worker = IngestWorker::spawn(Arc::clone(&controller))?;
    if let Err(e) = worker.start(symbols.iter().cloned()) {
        blocking(move || {
            drop(worker);
            Ok(())
        })
        .await?;
        return Err(e.into());
    }
    info!(db = %db.display(), symbols = ?symbols, "Streaming started");
    if !quiet {
        println!(
            "Streaming {} into {} (Ctrl-C to stop)",
            symbols.join(", "),
            db.display()
        );
    }

    let mut status = tokio::time::interval(Duration::from_secs(status_interval.max(1)));
    status.tick().await;

    let interrupted = loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                break result.context("Failed to listen for Ctrl-C");
            }
            _ = status.tick() => {
                log_status(&controller);
                if let Some(hours) = retention_hours {
                    sweep(Arc::clone(&store), hours).await;
                }
            }
        }
    };

    // Stopping joins every connection task; keep it off the runtime.
    let stopped = shutdown(worker).await?;
    info!(connections = stopped, "Streaming stopped");
    interrupted?;

    if !quiet {
        let total = blocking(move || Ok(store.count()?)).await?;
        println!("Stopped. {total} ticks stored.");
    }
    Ok(())
}

/// Stops the worker and joins its thread on the blocking pool.
async fn shutdown(worker: IngestWorker) -> Result<usize> {
    blocking(move || {
        let stopped = worker.stop()?;
        drop(worker);
        Ok(stopped)
    })
    .await
}

fn log_status(controller: &StreamController) {
    for (symbol, status) in controller.statuses() {
        info!(
            %symbol,
            state = %status.state,
            ticks = status.stats.ticks_written,
            reconnects = status.stats.reconnects,
            parse_errors = status.stats.parse_errors,
            storage_errors = status.stats.storage_errors,
            "Connection status"
        );
    }
}

async fn sweep(store: Arc<TickStore>, hours: u64) {
    let cutoff = retention_cutoff(chrono::Utc::now().timestamp_millis(), hours);
    if let Err(e) = blocking(move || Ok(store.prune_before(cutoff)?)).await {
        warn!(error = %e, "Retention sweep failed");
    }
}

/// Returns the epoch-millisecond cutoff `hours` before `now_ms`.
pub(crate) fn retention_cutoff(now_ms: i64, hours: u64) -> i64 {
    let span = i64::try_from(hours)
        .unwrap_or(i64::MAX)
        .saturating_mul(3_600_000);
    now_ms.saturating_sub(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_worker(dir: &Path) -> (Arc<StreamController>, IngestWorker) {
        let store = TickStore::open(dir.join("ticks.db")).unwrap();
        let controller = Arc::new(StreamController::new(
            Arc::new(BinanceTradeFeed::new("ws://127.0.0.1:9")) as Arc<dyn FeedConnector>,
            Arc::new(store) as Arc<dyn TickSink>,
            IngestConfig::default(),
        ));
        let worker = IngestWorker::spawn(Arc::clone(&controller)).unwrap();
        (controller, worker)
    }

    #[tokio::test]
    async fn test_shutdown_stops_running_session() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, worker) = idle_worker(dir.path());
        worker.start(["btcusdt"]).unwrap();

        let stopped = shutdown(worker).await.unwrap();

        assert_eq!(stopped, 1);
        assert!(controller.session().is_none());
    }

    #[tokio::test]
    async fn test_shutdown_without_session() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, worker) = idle_worker(dir.path());

        assert_eq!(shutdown(worker).await.unwrap(), 0);
        assert!(controller.active_symbols().is_empty());
    }

    #[test]
    fn test_retention_cutoff() {
        assert_eq!(retention_cutoff(10_000_000, 1), 6_400_000);
        assert_eq!(retention_cutoff(0, u64::MAX), -i64::MAX);
    }
}
