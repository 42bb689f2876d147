//! Live tick capture and pairs-trading analytics.
//!
//! This is a facade crate that re-exports functionality from the quantpair
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use quantpair_types::*;

// Re-export storage
pub use quantpair_store::{StorageError, SymbolSummary, TickSink, TickStore};

// Re-export aggregation
pub use quantpair_aggregate::{Bar, TickAggregator, resample, resample_symbols};

// Re-export ingestion
#[cfg(feature = "ingest")]
pub use quantpair_ingest::{
    Backoff, BackoffConfig, BinanceTradeFeed, ConnectionError, ConnectionState, ConnectionStats,
    ConnectionStatus, FeedConnector, FeedStream, IngestConfig, IngestWorker, ParseError,
    SessionInfo, StreamController, WorkerError, parse_trade,
};

// Re-export analytics
#[cfg(feature = "analytics")]
pub use quantpair_analytics::{
    AdfResult, AnalyticsError, CriticalValues, HedgeFit, PairReport, PairSeries, TickFrame,
    ZSignal, adf_test, hedge_ratio_and_spread, prepare, rolling_correlation, stationarity_test,
    zscore,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use quantpair_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
    format_timestamp,
};

/// Prelude module for convenient imports.
///
/// ```
/// use quantpair_lib::prelude::*;
/// ```
pub mod prelude {
    pub use quantpair_types::{AnalyticsParams, Tick, Timeframe};

    pub use quantpair_store::{TickSink, TickStore};

    pub use quantpair_aggregate::{Bar, resample};

    #[cfg(feature = "ingest")]
    pub use quantpair_ingest::{BinanceTradeFeed, IngestConfig, IngestWorker, StreamController};

    #[cfg(feature = "analytics")]
    pub use quantpair_analytics::{
        PairReport, ZSignal, adf_test, hedge_ratio_and_spread, prepare, rolling_correlation,
        zscore,
    };

    #[cfg(feature = "format")]
    pub use quantpair_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
