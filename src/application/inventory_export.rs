//! Inventory record export
//!
//! Records are written as a pretty-printed JSON array, one object per
//! detail URL in input order. Absent fields are omitted, so a page that
//! could not be fetched shows up as `{}`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::domain::VehicleDetails;

/// Serialize records as a pretty-printed JSON array.
pub fn inventory_to_json(records: &[VehicleDetails]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Write records to `path`, creating missing parent directories.
pub async fn save_inventory_json(records: &[VehicleDetails], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let json = inventory_to_json(records).context("Failed to serialize inventory records")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write inventory to {}", path.display()))?;

    info!("Saved {} vehicle records to {}", records.len(), path.display());
    Ok(())
}
