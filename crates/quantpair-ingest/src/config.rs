//! Ingestion settings.

use crate::backoff::BackoffConfig;
use std::time::Duration;

/// Settings shared by every per-symbol connection of a session.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Reconnect delay policy.
    pub backoff: BackoffConfig,
    /// Upper bound on a single connection attempt.
    pub connect_timeout: Duration,
    /// A connection that delivers nothing for this long is treated as lost.
    pub idle_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

impl IngestConfig {
    /// Sets the reconnect delay policy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the idle timeout.
    #[must_use]
    pub const fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}
