//! Hedge ratio estimation.

use serde::Serialize;

use crate::error::{AnalyticsError, Result, ensure_finite};
use crate::pair::PairSeries;

/// Ordinary least squares fit of price A on price B.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HedgeFit {
    /// Slope of A on B.
    pub hedge_ratio: f64,
    /// Intercept of the regression.
    pub intercept: f64,
    /// `a[i] - hedge_ratio * b[i]` over the aligned pair.
    pub spread: Vec<f64>,
}

/// Regresses A on B with an intercept and returns the hedge ratio and spread.
///
/// The two series are right-aligned first (see [`PairSeries::align`]). The
/// spread excludes the intercept.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] with fewer than two aligned
/// points, [`AnalyticsError::NonFinite`] if either series holds NaN or
/// infinity, and [`AnalyticsError::ZeroVariance`] if B is constant.
pub fn hedge_ratio_and_spread(a: &[f64], b: &[f64]) -> Result<HedgeFit> {
    let pair = PairSeries::align(a, b);
    let n = pair.len();
    if n < 2 {
        return Err(AnalyticsError::InsufficientData {
            required: 2,
            available: n,
        });
    }
    ensure_finite(pair.a())?;
    ensure_finite(pair.b())?;

    // Shift by the first observation so a constant series has exactly zero
    // deviations.
    let (shift_a, shift_b) = (pair.a()[0], pair.b()[0]);
    let count = n as f64;
    let mean_a = pair.a().iter().map(|x| x - shift_a).sum::<f64>() / count;
    let mean_b = pair.b().iter().map(|x| x - shift_b).sum::<f64>() / count;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in pair.b().iter().zip(pair.a()) {
        let dx = x - shift_b - mean_b;
        let dy = y - shift_a - mean_a;
        sxy += dx * dy;
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        return Err(AnalyticsError::ZeroVariance);
    }

    let hedge_ratio = sxy / sxx;
    let intercept = (mean_a + shift_a) - hedge_ratio * (mean_b + shift_b);
    let spread = pair
        .a()
        .iter()
        .zip(pair.b())
        .map(|(a, b)| a - hedge_ratio * b)
        .collect();

    Ok(HedgeFit {
        hedge_ratio,
        intercept,
        spread,
    })
}
