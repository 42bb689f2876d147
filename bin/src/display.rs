//! Shared helpers and output formatting for the quantpair CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use quantpair_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    /// Comma-separated values with a header row
    Csv,
    /// A single JSON array
    Json,
    /// One JSON object per line
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Resolves the database path, falling back to the platform data directory.
pub(crate) fn db_path(db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(TickStore::default_path)
}

/// Runs blocking store work off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("Blocking task panicked")?
}

/// Opens the tick store at `path` on the blocking pool.
pub(crate) async fn open_store(path: &Path) -> Result<TickStore> {
    let path = path.to_path_buf();
    blocking(move || {
        TickStore::open(&path)
            .with_context(|| format!("Failed to open tick store {}", path.display()))
    })
    .await
}

/// Writes bars to `output` ("-" is stdout) in the specified format.
pub(crate) fn write_bars(bars: &[Bar], output: &Path, format: OutputFormat) -> Result<()> {
    if output == Path::new("-") {
        return write_bars_to(bars, std::io::stdout(), format);
    }
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_bars_to(bars, BufWriter::new(file), format)
}

fn write_bars_to<W: Write + Send>(bars: &[Bar], writer: W, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_bars(bars, writer)?,
        OutputFormat::Json => JsonFormatter::new().write_bars(bars, writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer)?,
    }
    Ok(())
}

/// Formats an optional statistic for display.
pub(crate) fn display_value(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}
