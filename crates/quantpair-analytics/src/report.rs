//! Pair analytics for the first two configured symbols.

use quantpair_types::AnalyticsParams;
use serde::Serialize;
use std::fmt;

use crate::adf::{AdfResult, adf_test};
use crate::error::{AnalyticsError, Result};
use crate::frame::TickFrame;
use crate::hedge::hedge_ratio_and_spread;
use crate::pair::PairSeries;
use crate::rolling::{latest, rolling_correlation, zscore};

/// Position of the latest spread z-score relative to the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZSignal {
    /// `|z| < threshold`.
    Normal,
    /// `|z| >= threshold`.
    OutOfRange,
}

impl ZSignal {
    /// Classifies `z` against `threshold`.
    #[must_use]
    pub fn classify(z: f64, threshold: f64) -> Self {
        if z.abs() >= threshold {
            Self::OutOfRange
        } else {
            Self::Normal
        }
    }

    /// Returns the alert label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::OutOfRange => "OUT OF RANGE",
        }
    }
}

impl fmt::Display for ZSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hedge, spread, z-score and correlation of one symbol pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    /// Dependent symbol (A).
    pub symbol_a: String,
    /// Regressor symbol (B).
    pub symbol_b: String,
    /// Aligned tick observations used for the regression.
    pub observations: usize,
    /// Slope of A on B.
    pub hedge_ratio: f64,
    /// Intercept of A on B.
    pub intercept: f64,
    /// `a - hedge_ratio * b` per aligned observation.
    pub spread: Vec<f64>,
    /// Rolling z-score of the spread.
    pub zscore: Vec<Option<f64>>,
    /// Most recent defined z-score.
    pub latest_zscore: Option<f64>,
    /// Alert state of `latest_zscore`.
    pub signal: Option<ZSignal>,
    /// Bars present for both symbols at the same bucket.
    pub joined_bars: usize,
    /// Rolling correlation of bar closes; empty until `window` bars join.
    pub correlation: Vec<Option<f64>>,
    /// Most recent defined correlation.
    pub latest_correlation: Option<f64>,
}

impl PairReport {
    /// Computes the report for the first two symbols of `params`.
    ///
    /// Tick prices are right-aligned for the regression; correlation runs on
    /// bar closes joined by bucket timestamp and only once at least `window`
    /// joined bars exist.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::PairRequired`] with fewer than two symbols,
    /// or any error of [`hedge_ratio_and_spread`].
    pub fn compute(frame: &TickFrame, params: &AnalyticsParams) -> Result<Self> {
        let (symbol_a, symbol_b) = params
            .pair()
            .ok_or(AnalyticsError::PairRequired(params.symbols.len()))?;

        let pair = PairSeries::align(&frame.prices(symbol_a), &frame.prices(symbol_b));
        let fit = hedge_ratio_and_spread(pair.a(), pair.b())?;
        let zscore = zscore(&fit.spread, params.window)?;
        let latest_zscore = latest(&zscore);

        let joined = PairSeries::join_on_timestamp(
            &frame.bars(symbol_a, params.timeframe),
            &frame.bars(symbol_b, params.timeframe),
        );
        let correlation = if joined.len() >= params.window {
            rolling_correlation(joined.a(), joined.b(), params.window)?
        } else {
            Vec::new()
        };

        Ok(Self {
            symbol_a: symbol_a.to_string(),
            symbol_b: symbol_b.to_string(),
            observations: pair.len(),
            hedge_ratio: fit.hedge_ratio,
            intercept: fit.intercept,
            spread: fit.spread,
            signal: latest_zscore.map(|z| ZSignal::classify(z, params.z_threshold)),
            latest_zscore,
            zscore,
            joined_bars: joined.len(),
            latest_correlation: latest(&correlation),
            correlation,
        })
    }

    /// Runs the ADF test on the spread.
    ///
    /// # Errors
    ///
    /// See [`adf_test`].
    pub fn stationarity(&self) -> Result<AdfResult> {
        adf_test(&self.spread)
    }
}
