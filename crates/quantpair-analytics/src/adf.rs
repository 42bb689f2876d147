//! Augmented Dickey-Fuller unit-root test with a constant term.
//!
//! The test regression is
//!
//! ```text
//! Δy[t] = α + γ·y[t-1] + Σ β[i]·Δy[t-i] + ε[t],   i = 1..=p
//! ```
//!
//! The lag order `p` is chosen by AIC over `0..=maxlag`, with every candidate
//! fit on the same trailing sample; the chosen model is then refit on all
//! available observations. The statistic is the t-ratio of `γ`. P-values use
//! MacKinnon's (1994) response-surface regression and critical values his
//! (2010) finite-sample surfaces, both for the constant-only case.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use std::f64::consts::{PI, SQRT_2};

use crate::error::{AnalyticsError, Result, ensure_finite};

/// Minimum series length accepted by [`adf_test`].
pub const MIN_ADF_OBSERVATIONS: usize = 20;

// MacKinnon (1994), constant, one variable.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALLP: [f64; 3] = [2.1659, 1.4412, 0.038_269];
const TAU_LARGEP: [f64; 4] = [1.7339, 0.932_02, -0.127_45, -0.010_368];

// MacKinnon (2010), constant: b0 + b1/T + b2/T^2 + b3/T^3.
const CRIT_1PCT: [f64; 4] = [-3.430_35, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.861_54, -2.8903, -4.234, -40.04];
const CRIT_10PCT: [f64; 4] = [-2.566_77, -1.5384, -2.809, 0.0];

/// Test statistic thresholds at conventional significance levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    /// 1% level.
    pub one_percent: f64,
    /// 5% level.
    pub five_percent: f64,
    /// 10% level.
    pub ten_percent: f64,
}

impl CriticalValues {
    /// Finite-sample critical values for `nobs` regression observations.
    #[must_use]
    pub fn for_nobs(nobs: usize) -> Self {
        let inv = 1.0 / nobs as f64;
        Self {
            one_percent: polyval(&CRIT_1PCT, inv),
            five_percent: polyval(&CRIT_5PCT, inv),
            ten_percent: polyval(&CRIT_10PCT, inv),
        }
    }
}

/// Outcome of an ADF test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdfResult {
    /// t-ratio of the lagged level coefficient.
    pub statistic: f64,
    /// Approximate p-value of the unit-root null.
    pub p_value: f64,
    /// Number of lagged differences in the selected model.
    pub used_lag: usize,
    /// Observations used in the final regression.
    pub nobs: usize,
    /// Critical values for `nobs`.
    pub critical_values: CriticalValues,
    /// AIC of the selected model on the common selection sample.
    pub aic: f64,
}

impl AdfResult {
    /// Returns true if the unit-root null is rejected at `significance`.
    #[must_use]
    pub fn is_stationary(&self, significance: f64) -> bool {
        self.p_value < significance
    }
}

/// Default maximum lag: `ceil(12 * (n / 100)^(1/4))`, capped at `n / 2 - 2`.
#[must_use]
pub fn default_max_lag(n: usize) -> usize {
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    schwert.min((n / 2).saturating_sub(2))
}

/// Runs the ADF test with the default maximum lag.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] for fewer than
/// [`MIN_ADF_OBSERVATIONS`] points, [`AnalyticsError::NonFinite`] for NaN or
/// infinite input, [`AnalyticsError::ZeroVariance`] for a constant or
/// perfectly fitted series, and [`AnalyticsError::Singular`] if no candidate
/// regression can be solved.
pub fn adf_test(series: &[f64]) -> Result<AdfResult> {
    adf_test_with_max_lag(series, default_max_lag(series.len()))
}

/// Runs the ADF test searching lags `0..=max_lag`.
///
/// `max_lag` is capped at `n / 2 - 2`.
///
/// # Errors
///
/// See [`adf_test`].
pub fn adf_test_with_max_lag(series: &[f64], max_lag: usize) -> Result<AdfResult> {
    let n = series.len();
    if n < MIN_ADF_OBSERVATIONS {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_ADF_OBSERVATIONS,
            available: n,
        });
    }
    ensure_finite(series)?;
    if series.iter().all(|v| *v == series[0]) {
        return Err(AnalyticsError::ZeroVariance);
    }

    let max_lag = max_lag.min(n / 2 - 2);
    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    let mut best: Option<(usize, f64)> = None;
    for lag in 0..=max_lag {
        let (x, y) = design(series, &diffs, lag, max_lag);
        let Ok(fit) = ols(&x, &y) else {
            continue;
        };
        let aic = fit.aic();
        if best.is_none_or(|(_, best_aic)| aic < best_aic) {
            best = Some((lag, aic));
        }
    }
    let (used_lag, aic) = best.ok_or(AnalyticsError::Singular)?;

    let (x, y) = design(series, &diffs, used_lag, used_lag);
    let fit = ols(&x, &y)?;
    let statistic = fit.t_value(1);
    if !statistic.is_finite() {
        return Err(AnalyticsError::ZeroVariance);
    }

    Ok(AdfResult {
        statistic,
        p_value: mackinnon_p(statistic),
        used_lag,
        nobs: fit.nobs,
        critical_values: CriticalValues::for_nobs(fit.nobs),
        aic,
    })
}

/// Returns the ADF p-value of `spread`.
///
/// By convention a p-value below 0.05 is read as stationary.
///
/// # Errors
///
/// See [`adf_test`].
pub fn stationarity_test(spread: &[f64]) -> Result<f64> {
    adf_test(spread).map(|r| r.p_value)
}

/// Builds the regression for `lags` lagged differences on rows
/// `start..diffs.len()`. Columns: constant, lagged level, lagged differences.
fn design(
    levels: &[f64],
    diffs: &[f64],
    lags: usize,
    start: usize,
) -> (DMatrix<f64>, DVector<f64>) {
    let rows = diffs.len() - start;
    let x = DMatrix::from_fn(rows, 2 + lags, |r, c| {
        let t = start + r;
        match c {
            0 => 1.0,
            1 => levels[t],
            _ => diffs[t - (c - 1)],
        }
    });
    let y = DVector::from_fn(rows, |r, _| diffs[start + r]);
    (x, y)
}

struct OlsFit {
    params: DVector<f64>,
    cov_unscaled: DMatrix<f64>,
    ssr: f64,
    nobs: usize,
}

fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit> {
    let xt = x.transpose();
    let chol = (&xt * x).cholesky().ok_or(AnalyticsError::Singular)?;
    let params = chol.solve(&(&xt * y));
    let ssr = (y - x * &params).norm_squared();
    Ok(OlsFit {
        cov_unscaled: chol.inverse(),
        params,
        ssr,
        nobs: x.nrows(),
    })
}

impl OlsFit {
    fn aic(&self) -> f64 {
        let n = self.nobs as f64;
        let k = self.params.len() as f64;
        n * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0) + 2.0 * k
    }

    fn t_value(&self, index: usize) -> f64 {
        let dof = self.nobs.saturating_sub(self.params.len()).max(1) as f64;
        let s2 = self.ssr / dof;
        self.params[index] / (s2 * self.cov_unscaled[(index, index)]).sqrt()
    }
}

fn mackinnon_p(statistic: f64) -> f64 {
    if statistic > TAU_MAX {
        return 1.0;
    }
    if statistic < TAU_MIN {
        return 0.0;
    }
    let coefs: &[f64] = if statistic <= TAU_STAR {
        &TAU_SMALLP
    } else {
        &TAU_LARGEP
    };
    normal_cdf(polyval(coefs, statistic))
}

/// Evaluates a polynomial with ascending coefficients.
fn polyval(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn normal_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}
