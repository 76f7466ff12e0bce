//! Canonical table CSV cache
//!
//! The merged table is written to a flat CSV file so the leaderboard can
//! start without re-fetching every source. Headers are the canonical
//! column names; absent values are empty cells.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::merge::CanonicalTable;
use crate::model::{ModelRecord, CANONICAL_COLUMNS};
use crate::{Error, Result};

/// Write the canonical table to `path`, replacing any existing file
pub fn write_table(path: &Path, table: &CanonicalTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for record in table.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = table.len(), "Wrote canonical table cache");
    Ok(())
}

/// Read a canonical table previously written by [`write_table`]
///
/// A header row that differs from [`CANONICAL_COLUMNS`] is rejected.
/// An empty file reads as an empty table.
pub fn read_table(path: &Path) -> Result<CanonicalTable> {
    if !path.exists() {
        return Err(Error::MissingSource(format!(
            "cache file not found: {}",
            path.display()
        )));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?;
    if !headers.is_empty() && !headers.iter().eq(CANONICAL_COLUMNS) {
        return Err(Error::InvalidInput(format!(
            "cache header does not match the canonical columns: {}",
            path.display()
        )));
    }
    let records = reader
        .deserialize::<ModelRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    info!(path = %path.display(), rows = records.len(), "Loaded canonical table cache");
    Ok(CanonicalTable::from_records(records))
}
