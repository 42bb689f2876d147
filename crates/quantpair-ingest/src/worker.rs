//! Dedicated ingestion thread.

use crate::controller::StreamController;
use crate::error::WorkerError;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

enum Command {
    Start(Vec<String>),
    Stop(oneshot::Sender<usize>),
}

/// Runs a [`StreamController`] on its own thread and single-threaded runtime.
///
/// `start` returns immediately; `stop` blocks until every connection task has
/// exited. Dropping the worker stops streaming and joins the thread.
#[derive(Debug)]
pub struct IngestWorker {
    controller: Arc<StreamController>,
    commands: Option<mpsc::UnboundedSender<Command>>,
    thread: Option<JoinHandle<()>>,
}

impl IngestWorker {
    /// Spawns the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the thread cannot be created.
    pub fn spawn(controller: Arc<StreamController>) -> Result<Self, WorkerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let hosted = Arc::clone(&controller);

        let thread = std::thread::Builder::new()
            .name("quantpair-ingest".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = rx.recv().await {
                        match command {
                            Command::Start(symbols) => {
                                hosted.start(symbols).await;
                            }
                            Command::Stop(ack) => {
                                let stopped = hosted.stop().await;
                                let _ = ack.send(stopped);
                            }
                        }
                    }
                    hosted.stop().await;
                    debug!("Ingest worker exiting");
                });
            })?;

        Ok(Self {
            controller,
            commands: Some(tx),
            thread: Some(thread),
        })
    }

    /// Asks the worker to start streaming `symbols`. Does not wait.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Closed`] if the worker has shut down.
    pub fn start<I, S>(&self, symbols: I) -> Result<(), WorkerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = symbols.into_iter().map(Into::into).collect();
        self.send(Command::Start(symbols))
    }

    /// Stops streaming and blocks until every connection task has exited.
    ///
    /// Returns the number of connections stopped. Must not be called from
    /// inside an async context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Closed`] if the worker has shut down.
    pub fn stop(&self) -> Result<usize, WorkerError> {
        let (ack, done) = oneshot::channel();
        self.send(Command::Stop(ack))?;
        done.blocking_recv().map_err(|_| WorkerError::Closed)
    }

    /// Returns the hosted controller for status queries.
    #[must_use]
    pub const fn controller(&self) -> &Arc<StreamController> {
        &self.controller
    }

    /// Returns whether a session is active.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.controller.is_streaming()
    }

    fn send(&self, command: Command) -> Result<(), WorkerError> {
        self.commands
            .as_ref()
            .ok_or(WorkerError::Closed)?
            .send(command)
            .map_err(|_| WorkerError::Closed)
    }
}

impl Drop for IngestWorker {
    fn drop(&mut self) {
        // Closing the channel makes the thread stop the session and exit.
        self.commands.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
