//! Versioned schema upgrade for the inventory table file.
//!
//! Upgrades run once when a store is opened, never inline during reads.
//! The only historical migration is inventory v1 -> v2: early spreadsheet
//! variants had no `Sub_Status` column; v2 adds it, backfilled with "N/A".

use std::path::Path;

use jigtrack_core::asset::SUB_STATUS_NA;

use crate::error::StoreError;

/// Current inventory file schema version.
pub const INVENTORY_SCHEMA_VERSION: u32 = 2;

/// Detected schema generation of an inventory file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySchema {
    /// Pre-`Sub_Status` layout.
    V1,
    /// Current layout.
    V2,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Detect the schema of an inventory file from its header row.
///
/// Returns `None` for a missing or headerless (empty) file -- there is
/// nothing to upgrade; the first save writes the current schema.
pub fn detect_inventory_schema(path: &Path) -> Result<Option<InventorySchema>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?;
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(None);
    }
    if headers.iter().any(|header| header == "Sub_Status") {
        Ok(Some(InventorySchema::V2))
    } else {
        Ok(Some(InventorySchema::V1))
    }
}

// ---------------------------------------------------------------------------
// Upgrade
// ---------------------------------------------------------------------------

/// Upgrade an inventory file to the current schema if needed.
pub fn upgrade_inventory_file(path: &Path) -> Result<(), StoreError> {
    match detect_inventory_schema(path)? {
        None | Some(InventorySchema::V2) => Ok(()),
        Some(InventorySchema::V1) => {
            upgrade_v1_to_v2(path)?;
            tracing::info!(
                path = %path.display(),
                version = INVENTORY_SCHEMA_VERSION,
                "Upgraded inventory file schema (added Sub_Status column)",
            );
            Ok(())
        }
    }
}

/// Insert a `Sub_Status` column after `Status` (or at the end when there is
/// no `Status` column), backfilled with "N/A" on every row.
fn upgrade_v1_to_v2(path: &Path) -> Result<(), StoreError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let insert_at = headers
        .iter()
        .position(|header| header == "Status")
        .map_or(headers.len(), |status| status + 1);

    let mut new_headers: Vec<String> = headers.iter().map(ToString::to_string).collect();
    new_headers.insert(insert_at, "Sub_Status".to_string());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(ToString::to_string).collect();
        // Short rows are padded first so the insert index is always valid.
        while row.len() < headers.len() {
            row.push(String::new());
        }
        row.insert(insert_at, SUB_STATUS_NA.to_string());
        rows.push(row);
    }
    drop(reader);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&new_headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
