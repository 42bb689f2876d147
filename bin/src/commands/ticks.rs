//! Ticks command implementation.

use crate::display::{blocking, open_store};
use anyhow::Result;
use quantpair_lib::format_timestamp;
use std::path::Path;

/// Prints per-symbol tick counts and time spans.
pub(crate) async fn show_ticks(db: &Path) -> Result<()> {
    let store = open_store(db).await?;
    let summaries = blocking(move || Ok(store.symbol_summaries()?)).await?;

    if summaries.is_empty() {
        println!("No ticks stored in {}", db.display());
        return Ok(());
    }

    println!(
        "{:<12} {:>10}  {:<24}  {:<24}",
        "SYMBOL", "TICKS", "FIRST", "LAST"
    );
    println!("{}", "-".repeat(76));
    for summary in &summaries {
        println!(
            "{:<12} {:>10}  {:<24}  {:<24}",
            summary.symbol,
            summary.count,
            format_timestamp(summary.first_timestamp),
            format_timestamp(summary.last_timestamp)
        );
    }

    let total: u64 = summaries.iter().map(|s| s.count).sum();
    println!();
    println!("Total ticks: {total}  Symbols: {}", summaries.len());
    Ok(())
}
