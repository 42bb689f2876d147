//! OHLC bar resampling for quantpair.
//!
//! This crate provides tick-to-bar (candlestick) aggregation:
//!
//! - [`Bar`] - OHLC bar data structure
//! - [`resample`] - Batch resampling of one symbol's ticks
//! - [`resample_symbols`] - Resampling of several symbols from a mixed tick set
//! - [`TickAggregator`] - Streaming tick aggregator

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
mod resample;

pub use aggregator::TickAggregator;
pub use bar::Bar;
pub use resample::{resample, resample_symbols};
