//! Bars command implementation.

use crate::display::{Format, blocking, open_store, write_bars};
use anyhow::Result;
use quantpair_lib::{Bar, OutputFormat, Timeframe, prepare};
use std::path::{Path, PathBuf};

/// Resamples stored ticks of `symbols` and writes the bars.
pub(crate) async fn export_bars(
    db: &Path,
    symbols: &[String],
    timeframe: Timeframe,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let format = OutputFormat::from(format);
    let store = open_store(db).await?;
    let ticks = blocking(move || Ok(store.get_all()?)).await?;
    let frame = prepare(ticks);

    let bars: Vec<Bar> = symbols
        .iter()
        .flat_map(|symbol| frame.bars(&symbol.to_ascii_lowercase(), timeframe))
        .collect();

    // Default name: price_bars_<timeframe>.<format>
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!("price_bars_{timeframe}.{}", format.extension()))
    });
    write_bars(&bars, &output, format)?;

    if !quiet && output != Path::new("-") {
        println!("Wrote {} bars to {}", bars.len(), output.display());
    }
    Ok(())
}
