//! OHLC bar (candlestick) data structure.

use serde::{Deserialize, Serialize};

/// OHLC bar for one symbol over one timeframe bucket.
///
/// Bars are derived from ticks on demand and never persisted as a source of
/// truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bucket start in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Price of the first tick in the bucket.
    pub open: f64,
    /// Highest price during the bucket.
    pub high: f64,
    /// Lowest price during the bucket.
    pub low: f64,
    /// Price of the last tick in the bucket.
    pub close: f64,
    /// Total traded quantity.
    pub volume: f64,
    /// Number of ticks in the bar.
    pub tick_count: u32,
    /// Symbol the bar belongs to.
    pub symbol: String,
}

impl Bar {
    /// Creates a bar with no symbol from its OHLC values.
    #[must_use]
    pub const fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: 0.0,
            tick_count: 0,
            symbol: String::new(),
        }
    }

    /// Tags the bar with a symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Returns true if open and close lie within [low, high].
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}
