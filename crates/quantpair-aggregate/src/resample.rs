//! Batch resampling of tick series into bars.

use quantpair_types::{Tick, Timeframe};

use crate::{Bar, TickAggregator};

/// Resamples one symbol's ticks into OHLC bars.
///
/// Ticks are stably sorted by timestamp first, so ties keep their arrival
/// order and the first-arrived tick of a bucket is its open. Each tick lands in
/// bucket `floor(timestamp / width) * width`; a tick whose bucket start
/// overflows `i64` is dropped. Buckets without ticks are omitted. The output
/// is strictly increasing in timestamp; an empty input yields an empty
/// output.
///
/// The symbol of each bar is taken from its first tick. Callers mixing
/// symbols should use [`resample_symbols`] instead.
#[must_use]
pub fn resample(ticks: &[Tick], timeframe: Timeframe) -> Vec<Bar> {
    let mut ordered: Vec<&Tick> = ticks.iter().collect();
    if !ordered.is_sorted_by_key(|t| t.timestamp) {
        ordered.sort_by_key(|t| t.timestamp);
    }

    let mut aggregator = TickAggregator::new(timeframe);
    let mut bars = Vec::new();

    for tick in ordered {
        if let Some(bar) = aggregator.process(tick) {
            bars.push(bar);
        }
    }

    if let Some(bar) = aggregator.finish() {
        bars.push(bar);
    }

    bars
}

/// Resamples each requested symbol out of a mixed tick set.
///
/// Bars are grouped by symbol in the order the symbols are given, each group
/// ascending by timestamp. Symbols with no ticks contribute nothing.
#[must_use]
pub fn resample_symbols<S: AsRef<str>>(
    ticks: &[Tick],
    symbols: &[S],
    timeframe: Timeframe,
) -> Vec<Bar> {
    symbols
        .iter()
        .flat_map(|symbol| {
            let symbol = symbol.as_ref();
            let own: Vec<Tick> = ticks
                .iter()
                .filter(|t| t.symbol == symbol)
                .cloned()
                .collect();
            resample(&own, timeframe)
                .into_iter()
                .map(move |bar| bar.with_symbol(symbol))
        })
        .collect()
}
