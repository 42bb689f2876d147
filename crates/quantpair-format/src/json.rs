//! JSON output format.

use quantpair_aggregate::Bar;
use quantpair_types::Tick;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Records keep epoch-millisecond timestamps.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_records<T: Serialize, W: Write>(
        &self,
        records: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array if self.pretty => {
                serde_json::to_writer_pretty(&mut writer, records)?;
                writeln!(writer)?;
            }
            JsonStyle::Array => {
                serde_json::to_writer(&mut writer, records)?;
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_records(ticks, writer)
    }

    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        self.write_records(bars, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
