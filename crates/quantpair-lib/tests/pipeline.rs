//! Store to report, end to end.

use approx::assert_relative_eq;
use quantpair_lib::prelude::*;
use quantpair_lib::{AnalyticsError, ZSignal};
use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn seed_store(store: &TickStore, seconds: i64) {
    // Two legs ticking every 250ms; ethusdt tracks 0.05 * btcusdt with a
    // slow oscillating deviation.
    let mut ticks = Vec::new();
    for i in 0..seconds * 4 {
        let ts = 1_700_000_000_000 + i * 250;
        let btc = 40_000.0 + (i as f64 * 0.05).sin() * 200.0 + i as f64 * 0.5;
        let eth = 0.05 * btc + (i as f64 * 0.7).cos() * 0.8;
        ticks.push(Tick::new("BTCUSDT", ts, btc, 0.01));
        ticks.push(Tick::new("ETHUSDT", ts, eth, 0.1));
    }
    store.insert_batch(&ticks).unwrap();
}

#[test]
fn test_store_to_pair_report() {
    let dir = TempDir::new().unwrap();
    let store = TickStore::open(dir.path().join("ticks.db")).unwrap();
    seed_store(&store, 120);

    let frame = prepare(store.get_all().unwrap());
    assert_eq!(frame.symbol_count(), 2);
    assert_eq!(frame.total_ticks(), 960);

    let params = AnalyticsParams::new(["btcusdt", "ethusdt"], Timeframe::Second1, 30, 2.0).unwrap();
    let report = PairReport::compute(&frame, &params).unwrap();

    assert_eq!(report.observations, 480);
    assert_relative_eq!(report.hedge_ratio, 20.0, max_relative = 0.05);
    assert!(report.latest_zscore.is_some());
    assert_eq!(
        report.signal,
        report
            .latest_zscore
            .map(|z| ZSignal::classify(z, params.z_threshold))
    );

    assert_eq!(report.joined_bars, 120);
    assert_eq!(report.correlation.len(), 120);
    assert!(report.latest_correlation.unwrap() > 0.5);

    let adf = report.stationarity().unwrap();
    assert!((0.0..=1.0).contains(&adf.p_value));
}

#[test]
fn test_bars_export_from_store() {
    let dir = TempDir::new().unwrap();
    let store = TickStore::open(dir.path().join("ticks.db")).unwrap();
    store.insert(&Tick::new("btcusdt", 0, 100.0, 1.0)).unwrap();
    store.insert(&Tick::new("btcusdt", 500, 101.0, 1.0)).unwrap();
    store.insert(&Tick::new("btcusdt", 1_200, 99.0, 1.0)).unwrap();

    let frame = prepare(store.get_all().unwrap());
    let bars = frame.bars("btcusdt", Timeframe::Second1);
    assert_eq!(bars.len(), 2);
    assert_eq!(
        (bars[0].open, bars[0].high, bars[0].low, bars[0].close),
        (100.0, 101.0, 100.0, 101.0)
    );
    assert_eq!(
        (bars[1].open, bars[1].high, bars[1].low, bars[1].close),
        (99.0, 99.0, 99.0, 99.0)
    );

    let mut output = Cursor::new(Vec::new());
    CsvFormatter::new().write_bars(&bars, &mut output).unwrap();
    let csv = String::from_utf8(output.into_inner()).unwrap();
    assert_eq!(
        csv,
        "timestamp,open,high,low,close,symbol\n\
         1970-01-01T00:00:00.000Z,100,101,100,101,btcusdt\n\
         1970-01-01T00:00:01.000Z,99,99,99,99,btcusdt\n"
    );
}

#[test]
fn test_reads_during_concurrent_writes() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TickStore::open(dir.path().join("ticks.db")).unwrap());

    let writers: Vec<_> = ["btcusdt", "ethusdt"]
        .into_iter()
        .map(|symbol| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    store.insert(&Tick::new(symbol, i, 100.0 + i as f64, 1.0)).unwrap();
                }
            })
        })
        .collect();

    let mut last_seen = 0;
    for _ in 0..20 {
        let seen = store.get_all().unwrap().len();
        assert!(seen >= last_seen);
        last_seen = seen;
    }
    for writer in writers {
        writer.join().unwrap();
    }

    let frame = prepare(store.get_all().unwrap());
    assert_eq!(frame.ticks("btcusdt").len(), 200);
    assert!(
        frame
            .ticks("ethusdt")
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    );
}

#[test]
fn test_single_symbol_is_not_a_pair() {
    let frame = prepare(vec![Tick::new("btcusdt", 0, 1.0, 1.0)]);
    let params = AnalyticsParams::new(["btcusdt"], Timeframe::Minute1, 10, 2.0).unwrap();
    assert_eq!(
        PairReport::compute(&frame, &params),
        Err(AnalyticsError::PairRequired(1))
    );
}
