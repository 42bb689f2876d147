//! Core types for quantpair.
//!
//! This crate provides the fundamental data structures used throughout quantpair:
//!
//! - [`Tick`] - A single trade with symbol, timestamp, price, and quantity
//! - [`Timeframe`] - Bar resampling interval
//! - [`AnalyticsParams`] - Caller-supplied analytics configuration

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod params;
mod tick;
mod timeframe;

pub use error::{ParamsError, TickError};
pub use params::AnalyticsParams;
pub use tick::Tick;
pub use timeframe::{Timeframe, TimeframeParseError};
