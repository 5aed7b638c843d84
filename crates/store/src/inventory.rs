//! The Inventory Table: one CSV row per known asset.
//!
//! Reads are tolerant (column lookup by header name, hand-edited cells map
//! to defaults); writes always produce the full current schema.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use jigtrack_core::asset::{sub_status_str, Asset, AssetStatus, RepairStage};
use jigtrack_core::ident::PanelId;
use jigtrack_core::transaction::Outcome;
use jigtrack_core::types::Timestamp;

use crate::error::StoreError;

pub const HEADERS: [&str; 5] = [
    "Panel_ID",
    "Status",
    "Sub_Status",
    "Location",
    "Last_Updated",
];

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load the inventory table.
///
/// A missing file is an empty table; it is created on the first commit.
pub fn load(path: &Path) -> Result<Vec<Asset>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    // Flexible: hand-edited files may carry short rows; missing cells read
    // as defaults instead of failing the whole load.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let id_col = column("Panel_ID");
    let status_col = column("Status");
    let sub_status_col = column("Sub_Status");
    let location_col = column("Location");
    let updated_col = column("Last_Updated");

    let mut assets = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field =
            |col: Option<usize>| col.and_then(|index| record.get(index)).unwrap_or("");

        let id = match PanelId::new(field(id_col)) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!("Skipping inventory row with blank Panel_ID");
                continue;
            }
        };

        assets.push(Asset {
            id,
            status: AssetStatus::from_str(field(status_col)),
            sub_status: RepairStage::from_str(field(sub_status_col)),
            location: field(location_col).trim().to_string(),
            last_updated: parse_timestamp(field(updated_col)),
        });
    }
    Ok(assets)
}

/// Rewrite the inventory table wholesale.
pub fn save(path: &Path, assets: &[Asset]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;
    for asset in assets {
        let last_updated = asset.last_updated.to_rfc3339();
        writer.write_record([
            asset.id.as_str(),
            asset.status.as_str(),
            sub_status_str(asset.sub_status),
            asset.location.as_str(),
            last_updated.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (this system's format) and the naive formats the legacy
/// spreadsheets carried. Unparseable cells fall back to the epoch sentinel so
/// a damaged cell never blocks a load.
fn parse_timestamp(raw: &str) -> Timestamp {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.and_utc();
        }
    }
    DateTime::UNIX_EPOCH
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

/// Apply a transaction outcome to the in-memory table.
///
/// Inserts a row if the asset is unknown; otherwise overwrites only
/// status/sub_status/location/last_updated. Returns the resulting row.
pub fn apply_outcome(
    assets: &mut Vec<Asset>,
    id: &PanelId,
    outcome: &Outcome,
    now: Timestamp,
) -> Asset {
    if let Some(asset) = assets.iter_mut().find(|asset| asset.id == *id) {
        asset.status = outcome.status;
        asset.sub_status = outcome.sub_status;
        asset.location = outcome.location.clone();
        asset.last_updated = now;
        return asset.clone();
    }

    let asset = Asset {
        id: id.clone(),
        status: outcome.status,
        sub_status: outcome.sub_status,
        location: outcome.location.clone(),
        last_updated: now,
    };
    assets.push(asset.clone());
    asset
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
