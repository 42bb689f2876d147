//! Streaming tick-to-bar aggregation.

use quantpair_types::{Tick, Timeframe};

use crate::Bar;

/// Streaming tick aggregator.
///
/// Aggregates time-ordered ticks of a single symbol into bars for the
/// configured timeframe. Ticks must arrive in non-decreasing timestamp order;
/// [`crate::resample`] sorts before feeding an aggregator.
#[derive(Debug)]
pub struct TickAggregator {
    timeframe: Timeframe,
    current_bar: Option<BarBuilder>,
}

impl TickAggregator {
    /// Creates a new aggregator for the given timeframe.
    #[must_use]
    pub const fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            current_bar: None,
        }
    }

    /// Returns the timeframe being aggregated to.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Processes a tick, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this tick opens a new bucket and thereby
    /// completes the previous one, `None` otherwise. Ticks whose bucket
    /// boundary does not fit in an `i64` are skipped.
    pub fn process(&mut self, tick: &Tick) -> Option<Bar> {
        let bucket = self.timeframe.bucket_start(tick.timestamp)?;

        match self.current_bar.take() {
            Some(mut builder) if builder.timestamp == bucket => {
                builder.update(tick);
                self.current_bar = Some(builder);
                None
            }
            Some(builder) => {
                let completed = builder.finish();
                self.current_bar = Some(BarBuilder::new(bucket, tick));
                Some(completed)
            }
            None => {
                self.current_bar = Some(BarBuilder::new(bucket, tick));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial bar.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        self.current_bar.map(BarBuilder::finish)
    }
}

/// Builder for a bar in progress.
#[derive(Debug)]
struct BarBuilder {
    timestamp: i64,
    symbol: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a new builder from the first tick of a bucket.
    fn new(timestamp: i64, tick: &Tick) -> Self {
        Self {
            timestamp,
            symbol: tick.symbol.clone(),
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume: tick.qty,
            tick_count: 1,
        }
    }

    /// Updates the builder with a later tick of the same bucket.
    fn update(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        self.volume += tick.qty;
        self.tick_count += 1;
    }

    fn finish(self) -> Bar {
        Bar {
            timestamp: self.timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            tick_count: self.tick_count,
            symbol: self.symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tick(timestamp: i64, price: f64) -> Tick {
        Tick::new("btcusdt", timestamp, price, 1.0)
    }

    #[test]
    fn test_minute_aggregation() {
        let mut agg = TickAggregator::new(Timeframe::Minute1);

        assert!(agg.process(&make_tick(0, 100.0)).is_none());
        assert!(agg.process(&make_tick(30_000, 101.5)).is_none());

        // First tick of the next minute completes the first bar
        let bar = agg.process(&make_tick(60_000, 99.0)).unwrap();

        assert_eq!(bar.timestamp, 0);
        assert_eq!(bar.tick_count, 2);
        assert!((bar.open - 100.0).abs() < 1e-10);
        assert!((bar.high - 101.5).abs() < 1e-10);
        assert!((bar.low - 100.0).abs() < 1e-10);
        assert!((bar.close - 101.5).abs() < 1e-10);
        assert!((bar.volume - 2.0).abs() < 1e-10);
        assert_eq!(bar.symbol, "btcusdt");
    }

    #[test]
    fn test_gap_skips_empty_buckets() {
        let mut agg = TickAggregator::new(Timeframe::Second1);

        agg.process(&make_tick(100, 10.0));
        let bar = agg.process(&make_tick(5_100, 11.0)).unwrap();
        assert_eq!(bar.timestamp, 0);

        let last = agg.finish().unwrap();
        assert_eq!(last.timestamp, 5_000);
    }

    #[test]
    fn test_finish() {
        let mut agg = TickAggregator::new(Timeframe::Minute5);
        agg.process(&make_tick(1_000, 10.0));

        let bar = agg.finish().unwrap();
        assert_eq!(bar.tick_count, 1);
    }

    #[test]
    fn test_finish_empty() {
        assert!(TickAggregator::new(Timeframe::Minute1).finish().is_none());
    }
}
