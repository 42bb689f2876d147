//! Trailing-window statistics.
//!
//! Every output has one entry per input point. An entry is `None` while the
//! window is still filling, when the window holds a non-finite value, or when
//! a standard deviation in the window is zero. Windows use the sample
//! standard deviation (n - 1), so a window of 1 is never defined.

use crate::error::{AnalyticsError, Result};
use crate::pair::PairSeries;

/// Mean and sum of squared deviations of a window.
///
/// Deviations are taken from the first element so a constant window has a
/// sum of squares of exactly zero.
fn moments(window: &[f64]) -> (f64, f64) {
    let shift = window[0];
    let n = window.len() as f64;
    let mean = window.iter().map(|x| x - shift).sum::<f64>() / n;
    let ss = window
        .iter()
        .map(|x| {
            let d = x - shift - mean;
            d * d
        })
        .sum();
    (mean + shift, ss)
}

fn check_window(window: usize) -> Result<()> {
    if window == 0 {
        Err(AnalyticsError::InvalidWindow)
    } else {
        Ok(())
    }
}

/// Rolling z-score of the latest point against its trailing window.
///
/// Entry `i` is `(x[i] - mean) / std` over `x[i + 1 - window ..= i]`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidWindow`] if `window` is zero.
pub fn zscore(series: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    check_window(window)?;
    let mut out = vec![None; series.len()];
    if window < 2 {
        return Ok(out);
    }

    for (end, slot) in out.iter_mut().enumerate().skip(window - 1) {
        let values = &series[end + 1 - window..=end];
        if values.iter().any(|v| !v.is_finite()) {
            continue;
        }
        let (mean, ss) = moments(values);
        if ss == 0.0 {
            continue;
        }
        let std = (ss / (window - 1) as f64).sqrt();
        *slot = Some((series[end] - mean) / std);
    }
    Ok(out)
}

/// Rolling Pearson correlation of two series.
///
/// The series are right-aligned first, so the output has the length of the
/// shorter one.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidWindow`] if `window` is zero.
pub fn rolling_correlation(a: &[f64], b: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    check_window(window)?;
    let pair = PairSeries::align(a, b);
    let (a, b) = (pair.a(), pair.b());
    let mut out = vec![None; pair.len()];
    if window < 2 {
        return Ok(out);
    }

    for (end, slot) in out.iter_mut().enumerate().skip(window - 1) {
        let start = end + 1 - window;
        let (wa, wb) = (&a[start..=end], &b[start..=end]);
        if wa.iter().chain(wb).any(|v| !v.is_finite()) {
            continue;
        }
        let (mean_a, ss_a) = moments(wa);
        let (mean_b, ss_b) = moments(wb);
        if ss_a == 0.0 || ss_b == 0.0 {
            continue;
        }
        let cross: f64 = wa
            .iter()
            .zip(wb)
            .map(|(x, y)| (x - mean_a) * (y - mean_b))
            .sum();
        *slot = Some((cross / (ss_a * ss_b).sqrt()).clamp(-1.0, 1.0));
    }
    Ok(out)
}

/// Returns the most recent defined value of a rolling series.
#[must_use]
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().find_map(|v| *v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zscore_warmup_and_values() {
        let z = zscore(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(z.len(), 5);
        assert!(z[0].is_none() && z[1].is_none());
        // window [1,2,3]: mean 2, sample std 1
        assert_relative_eq!(z[2].unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(z[4].unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zscore_window_edge_cases() {
        assert_eq!(zscore(&[1.0, 2.0], 0), Err(AnalyticsError::InvalidWindow));
        assert!(zscore(&[1.0, 2.0, 3.0], 1).unwrap().iter().all(Option::is_none));
        assert!(zscore(&[1.0, 2.0], 5).unwrap().iter().all(Option::is_none));
        assert!(zscore(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_zscore_constant_window_is_missing() {
        let z = zscore(&[0.1, 0.1, 0.1, 0.1, 0.7], 3).unwrap();
        assert!(z[2].is_none());
        assert!(z[3].is_none());
        assert!(z[4].is_some());
    }

    #[test]
    fn test_zscore_non_finite_window_is_missing() {
        let z = zscore(&[1.0, f64::NAN, 3.0, 4.0, 5.0, 7.0], 3).unwrap();
        assert!(z[2].is_none() && z[3].is_none());
        assert!(z[4].is_some() && z[5].is_some());
    }

    #[test]
    fn test_correlation_perfect() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b: Vec<f64> = a.iter().map(|x| 10.0 - 2.0 * x).collect();
        let c = rolling_correlation(&a, &a, 4).unwrap();
        let n = rolling_correlation(&a, &b, 4).unwrap();

        assert!(c[..3].iter().all(Option::is_none));
        for i in 3..6 {
            assert_relative_eq!(c[i].unwrap(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n[i].unwrap(), -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_correlation_aligns_and_handles_flat() {
        let c = rolling_correlation(&[9.0, 1.0, 2.0, 3.0], &[5.0, 5.0, 5.0], 2).unwrap();
        assert_eq!(c.len(), 3);
        assert!(c.iter().all(Option::is_none));
        assert_eq!(
            rolling_correlation(&[1.0], &[1.0], 0),
            Err(AnalyticsError::InvalidWindow)
        );
    }

    #[test]
    fn test_latest() {
        assert_eq!(latest(&[Some(1.0), Some(2.0), None]), Some(2.0));
        assert_eq!(latest(&[None, None]), None);
    }
}
