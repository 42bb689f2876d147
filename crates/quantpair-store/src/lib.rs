//! Durable tick storage for quantpair.
//!
//! - [`TickStore`] - SQLite-backed append-only tick table
//! - [`TickSink`] - Write seam used by ingestion
//! - [`SymbolSummary`] - Per-symbol aggregate over stored ticks

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod store;

pub use error::{Result, StorageError};
pub use store::{SymbolSummary, TickSink, TickStore};
