//! Analyze command implementation.

use crate::display::{blocking, display_value, open_store};
use anyhow::Result;
use quantpair_lib::{
    AdfResult, AnalyticsError, AnalyticsParams, PairReport, Timeframe, ZSignal, prepare,
};
use serde::Serialize;
use std::path::Path;

/// Significance level used for the stationarity verdict.
const ADF_SIGNIFICANCE: f64 = 0.05;

/// Condensed report printed by the CLI.
#[derive(Serialize)]
struct Summary<'a> {
    symbol_a: &'a str,
    symbol_b: &'a str,
    timeframe: Timeframe,
    window: usize,
    observations: usize,
    hedge_ratio: f64,
    intercept: f64,
    latest_zscore: Option<f64>,
    z_threshold: f64,
    signal: Option<ZSignal>,
    joined_bars: usize,
    latest_correlation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adf: Option<AdfResult>,
}

/// Computes and prints pair analytics for the first two `symbols`.
pub(crate) async fn analyze(
    db: &Path,
    symbols: &[String],
    timeframe: Timeframe,
    window: usize,
    z_threshold: f64,
    run_adf: bool,
    json: bool,
) -> Result<()> {
    let params = AnalyticsParams::new(symbols, timeframe, window, z_threshold)?;
    let store = open_store(db).await?;
    let ticks = blocking(move || Ok(store.get_all()?)).await?;
    let frame = prepare(ticks);

    let report = match PairReport::compute(&frame, &params) {
        Ok(report) => report,
        Err(AnalyticsError::PairRequired(_)) => {
            println!("Select at least 2 symbols for pair analytics.");
            return Ok(());
        }
        Err(e @ (AnalyticsError::InsufficientData { .. } | AnalyticsError::ZeroVariance)) => {
            println!("Collecting more data... ({e})");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let adf = if run_adf {
        match report.stationarity() {
            Ok(result) => Some(result),
            Err(e) => {
                println!("ADF test not available yet: {e}");
                None
            }
        }
    } else {
        None
    };

    let summary = Summary {
        symbol_a: &report.symbol_a,
        symbol_b: &report.symbol_b,
        timeframe,
        window,
        observations: report.observations,
        hedge_ratio: report.hedge_ratio,
        intercept: report.intercept,
        latest_zscore: report.latest_zscore,
        z_threshold,
        signal: report.signal,
        joined_bars: report.joined_bars,
        latest_correlation: report.latest_correlation,
        adf,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &Summary<'_>) {
    println!("Pair:          {} / {}", summary.symbol_a, summary.symbol_b);
    println!("Observations:  {}", summary.observations);
    println!("Hedge ratio:   {:.6}", summary.hedge_ratio);
    println!("Intercept:     {:.6}", summary.intercept);

    match (summary.latest_zscore, summary.signal) {
        (Some(z), Some(signal)) => println!(
            "Latest z:      {z:.3} [{signal}] (threshold {:.2})",
            summary.z_threshold
        ),
        _ => println!(
            "Latest z:      n/a (need {} spread points with nonzero variance)",
            summary.window
        ),
    }

    if summary.joined_bars >= summary.window {
        println!(
            "Correlation:   {} ({} bars, window {})",
            display_value(summary.latest_correlation, 4),
            summary.joined_bars,
            summary.window
        );
    } else {
        println!(
            "Correlation:   collecting more data ({} of {} {} bars)",
            summary.joined_bars, summary.window, summary.timeframe
        );
    }

    if let Some(adf) = &summary.adf {
        let verdict = if adf.is_stationary(ADF_SIGNIFICANCE) {
            "Stationary"
        } else {
            "Non-stationary"
        };
        println!(
            "ADF:           statistic {:.4}, p-value {:.4} -> {verdict} (lag {}, 5% critical {:.3})",
            adf.statistic, adf.p_value, adf.used_lag, adf.critical_values.five_percent
        );
    }
}
