//! Export writers for quantpair.
//!
//! - [`CsvFormatter`] - CSV/TSV with ISO-8601 timestamps
//! - [`JsonFormatter`] - JSON array or NDJSON

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, format_timestamp};
pub use json::{JsonFormatter, JsonStyle};
