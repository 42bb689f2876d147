//! Per-symbol tick table.

use quantpair_aggregate::{Bar, resample};
use quantpair_types::{Tick, Timeframe};
use std::collections::BTreeMap;
use tracing::debug;

/// Ticks grouped by symbol, each series sorted by timestamp.
///
/// Ties keep their original (insertion) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickFrame {
    series: BTreeMap<String, Vec<Tick>>,
}

/// Normalizes raw ticks into a [`TickFrame`].
///
/// Symbols are trimmed and lowercased. Ticks that fail validation are
/// dropped.
#[must_use]
pub fn prepare<I>(ticks: I) -> TickFrame
where
    I: IntoIterator<Item = Tick>,
{
    let mut series: BTreeMap<String, Vec<Tick>> = BTreeMap::new();
    let mut dropped = 0usize;

    for mut tick in ticks {
        tick.symbol = tick.symbol.trim().to_ascii_lowercase();
        if tick.validate().is_err() {
            dropped += 1;
            continue;
        }
        series.entry(tick.symbol.clone()).or_default().push(tick);
    }

    for ticks in series.values_mut() {
        if !ticks.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
            ticks.sort_by_key(|t| t.timestamp);
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped invalid ticks while preparing frame");
    }
    TickFrame { series }
}

impl TickFrame {
    /// Returns the symbols present, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Returns the ticks of `symbol`, empty if absent.
    #[must_use]
    pub fn ticks(&self, symbol: &str) -> &[Tick] {
        self.series.get(symbol).map_or(&[], Vec::as_slice)
    }

    /// Returns the price series of `symbol` in time order.
    #[must_use]
    pub fn prices(&self, symbol: &str) -> Vec<f64> {
        self.ticks(symbol).iter().map(|t| t.price).collect()
    }

    /// Resamples `symbol` into bars.
    #[must_use]
    pub fn bars(&self, symbol: &str, timeframe: Timeframe) -> Vec<Bar> {
        resample(self.ticks(symbol), timeframe)
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    /// Returns the total number of ticks across all symbols.
    #[must_use]
    pub fn total_ticks(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Returns true if the frame holds no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
