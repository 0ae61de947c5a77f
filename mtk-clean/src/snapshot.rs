//! Tag snapshot files
//!
//! A snapshot is a JSON array of [`MediaTags`], one entry per media file.

use crate::tags::MediaTags;
use mtk_common::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a snapshot file
pub fn read_snapshot(path: &Path) -> Result<Vec<MediaTags>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Write a snapshot file, replacing any existing content
pub fn write_snapshot(path: &Path, records: &[MediaTags]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize snapshot: {}", e)))?;
    fs::write(path, json)?;
    Ok(())
}
