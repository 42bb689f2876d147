//! Analytics parameters supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::{ParamsError, Timeframe};

/// Configuration surface consumed by the analytics core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsParams {
    /// Symbols to analyse; the first two form the pair.
    pub symbols: Vec<String>,
    /// Bar resampling timeframe.
    pub timeframe: Timeframe,
    /// Rolling window length for z-score and correlation.
    pub window: usize,
    /// Absolute z-score at or above which the spread is flagged.
    pub z_threshold: f64,
}

impl AnalyticsParams {
    /// Default rolling window.
    pub const DEFAULT_WINDOW: usize = 50;

    /// Default z-score alert threshold.
    pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

    /// Creates validated parameters.
    ///
    /// Symbols are trimmed, lowercased and de-duplicated (first occurrence
    /// wins, so the pair order is preserved). Empty entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if no symbols remain, the window is zero, or the
    /// threshold is negative or not finite.
    pub fn new<I, S>(
        symbols: I,
        timeframe: Timeframe,
        window: usize,
        z_threshold: f64,
    ) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim().to_ascii_lowercase();
            if !symbol.is_empty() && !normalized.contains(&symbol) {
                normalized.push(symbol);
            }
        }

        if normalized.is_empty() {
            return Err(ParamsError::NoSymbols);
        }
        if window == 0 {
            return Err(ParamsError::InvalidWindow(window));
        }
        if !z_threshold.is_finite() || z_threshold < 0.0 {
            return Err(ParamsError::InvalidThreshold(z_threshold));
        }

        Ok(Self {
            symbols: normalized,
            timeframe,
            window,
            z_threshold,
        })
    }

    /// Returns the first two symbols, if at least two were supplied.
    #[must_use]
    pub fn pair(&self) -> Option<(&str, &str)> {
        match self.symbols.as_slice() {
            [a, b, ..] => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}
