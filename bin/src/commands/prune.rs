//! Prune command implementation.

use crate::commands::stream::retention_cutoff;
use crate::display::{blocking, open_store};
use anyhow::Result;
use std::path::Path;

/// Deletes ticks older than `hours`.
pub(crate) async fn prune(db: &Path, hours: u64, quiet: bool) -> Result<()> {
    let store = open_store(db).await?;
    let cutoff = retention_cutoff(chrono::Utc::now().timestamp_millis(), hours);
    let removed = blocking(move || Ok(store.prune_before(cutoff)?)).await?;

    if !quiet {
        println!("Removed {removed} ticks older than {hours}h");
    }
    Ok(())
}
