//! CSV output format.

use quantpair_aggregate::Bar;
use quantpair_types::Tick;
use std::io::Write;

use crate::formatter::format_timestamp;
use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Bars are written as `timestamp,open,high,low,close,symbol`; ticks as
/// `timestamp,symbol,price,qty`. Timestamps are ISO-8601 UTC with
/// milliseconds.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
    /// Whether bar rows carry volume and tick count.
    include_volume: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
            include_volume: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Appends `volume` and `tick_count` columns to bar rows.
    #[must_use]
    pub const fn with_volume(mut self, include: bool) -> Self {
        self.include_volume = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }
}

impl Formatter for CsvFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}symbol{d}price{d}qty")?;
        }

        for tick in ticks {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}",
                format_timestamp(tick.timestamp),
                tick.symbol,
                tick.price,
                tick.qty
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            write!(writer, "timestamp{d}open{d}high{d}low{d}close{d}symbol")?;
            if self.include_volume {
                write!(writer, "{d}volume{d}tick_count")?;
            }
            writeln!(writer)?;
        }

        for bar in bars {
            write!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                format_timestamp(bar.timestamp),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.symbol
            )?;
            if self.include_volume {
                write!(writer, "{d}{}{d}{}", bar.volume, bar.tick_count)?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
