//! Pairs-trading statistics for quantpair.
//!
//! - [`prepare`] / [`TickFrame`] - Per-symbol, time-ordered tick table
//! - [`PairSeries`] - Positional or timestamp alignment of two series
//! - [`hedge_ratio_and_spread`] - OLS hedge ratio and spread
//! - [`zscore`] / [`rolling_correlation`] - Trailing-window statistics
//! - [`adf_test`] - Augmented Dickey-Fuller stationarity test
//! - [`PairReport`] - End-to-end pair analytics

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adf;
mod error;
mod frame;
mod hedge;
mod pair;
mod report;
mod rolling;

pub use adf::{
    AdfResult, CriticalValues, MIN_ADF_OBSERVATIONS, adf_test, adf_test_with_max_lag,
    default_max_lag, stationarity_test,
};
pub use error::{AnalyticsError, Result};
pub use frame::{TickFrame, prepare};
pub use hedge::{HedgeFit, hedge_ratio_and_spread};
pub use pair::PairSeries;
pub use report::{PairReport, ZSignal};
pub use rolling::{latest, rolling_correlation, zscore};
