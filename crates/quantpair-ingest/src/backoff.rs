//! Reconnect delay policy.

use std::time::Duration;

/// Exponential backoff settings for reconnect attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between attempts (in milliseconds).
    pub max_delay_ms: u64,
    /// Lower bound applied after jitter (in milliseconds).
    pub min_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            min_delay_ms: 100,
        }
    }
}

impl BackoffConfig {
    /// Returns the delay before reconnect attempt number `attempt` (1-based).
    ///
    /// `base * 2^attempt`, capped at `max_delay_ms`, with a deterministic
    /// jitter of up to ±25% and a floor of `min_delay_ms`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp_delay = self.base_delay_ms.saturating_mul(1u64 << attempt.min(10));
        let capped = exp_delay.min(self.max_delay_ms);

        let jitter_range = capped / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let delay = (capped as i64 + jitter).max(self.min_delay_ms as i64);
        Duration::from_millis(delay as u64)
    }
}

/// Reconnect attempt counter for one connection.
///
/// Reset once the connection delivers data again.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: BackoffConfig,
    attempt: u32,
}

impl Backoff {
    /// Creates a counter at attempt zero.
    #[must_use]
    pub const fn new(config: BackoffConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Advances the attempt counter and returns the delay to wait.
    pub fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        self.config.delay_for_attempt(self.attempt)
    }

    /// Forgets previous failures.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Returns the number of consecutive failed attempts.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }
}
