//! Analytics error types.

use thiserror::Error;

/// A statistic could not be computed from the given input.
///
/// Callers generally treat these as "not yet computable" rather than as
/// failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Too few observations.
    #[error("Insufficient data: need at least {required} observations, have {available}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations supplied.
        available: usize,
    },

    /// The regressor has zero variance.
    #[error("Series has zero variance")]
    ZeroVariance,

    /// The rolling window is zero.
    #[error("Window must be at least 1")]
    InvalidWindow,

    /// The regression design matrix is singular.
    #[error("Regression design matrix is singular")]
    Singular,

    /// The input contains NaN or infinite values.
    #[error("Series contains non-finite values")]
    NonFinite,

    /// A pair report needs two symbols.
    #[error("Pair analytics needs two symbols, got {0}")]
    PairRequired(usize),
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

pub(crate) fn ensure_finite(series: &[f64]) -> Result<()> {
    if series.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AnalyticsError::NonFinite)
    }
}
