use std::fs;
use std::path::Path;
use tracing::info;
use crate::error::Result;
use crate::models::ScrapeResult;

/// Overwrite the snapshot file with the latest result, pretty-printed.
pub fn write_snapshot(path: &Path, result: &ScrapeResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<ScrapeResult> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
