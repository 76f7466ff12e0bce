//! Canonical table construction at startup
//!
//! The table is read from the CSV cache when one exists, otherwise every
//! source is fetched and merged and the result is cached. Failures abort
//! startup; the service never runs with a partial table.

use std::path::Path;

use anyhow::{Context, Result};
use llmc_common::cache::{read_table, write_table};
use llmc_common::{merge_sources, CanonicalTable};
use tracing::{info, warn};

use crate::fetch::SourceClient;

/// Load or build the canonical table
///
/// `refresh` ignores an existing cache. An unreadable cache falls back to
/// fetching; a failed cache write is logged and does not stop startup.
pub async fn load_canonical_table(
    client: &SourceClient,
    cache_path: &Path,
    refresh: bool,
) -> Result<CanonicalTable> {
    if !refresh && cache_path.exists() {
        match read_table(cache_path) {
            Ok(table) => {
                info!(rows = table.len(), "✓ Canonical table loaded from cache");
                return Ok(table);
            }
            Err(e) => {
                warn!(path = %cache_path.display(), "Cache unreadable, fetching sources: {}", e);
            }
        }
    }

    let sources = client
        .collect_sources()
        .await
        .context("Failed to fetch leaderboard sources")?;
    let table = merge_sources(&sources);
    if table.is_empty() {
        warn!("Merged canonical table is empty");
    }

    if let Err(e) = write_table(cache_path, &table) {
        warn!(path = %cache_path.display(), "Failed to write cache: {}", e);
    }

    info!(rows = table.len(), "✓ Canonical table built from sources");
    Ok(table)
}
