//! Live trade-stream ingestion for quantpair.
//!
//! - [`StreamController`] - Owns the streaming session; `start`/`stop`
//! - [`IngestWorker`] - Dedicated thread and runtime hosting a controller
//! - [`FeedConnector`] - Network seam; [`BinanceTradeFeed`] is the live feed
//! - [`parse_trade`] - Feed message to [`quantpair_types::Tick`] mapping
//! - [`Backoff`] - Capped exponential reconnect delay

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backoff;
mod config;
mod connection;
mod controller;
mod error;
mod feed;
mod message;
mod worker;

#[cfg(test)]
mod testing;

pub use backoff::{Backoff, BackoffConfig};
pub use config::IngestConfig;
pub use connection::{ConnectionState, ConnectionStats, ConnectionStatus};
pub use controller::{SessionInfo, StreamController};
pub use error::{ConnectionError, ParseError, WorkerError};
pub use feed::{BinanceTradeFeed, FeedConnector, FeedStream};
pub use message::parse_trade;
pub use worker::IngestWorker;
