//! The History Table: an append-only CSV transaction log.
//!
//! The table is logically append-only (rows are never edited or deleted),
//! but physically it is rewritten wholesale on every commit like the
//! inventory file.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use jigtrack_core::asset::{sub_status_str, RepairStage};
use jigtrack_core::transaction::{TransactionAction, TransactionRecord};
use jigtrack_core::types::Timestamp;

use crate::error::StoreError;

pub const HEADERS: [&str; 7] = [
    "Date",
    "Panel_ID",
    "Action",
    "User",
    "Category",
    "Sub_Status",
    "Comments",
];

/// Minute-resolution timestamp format used in the Date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load the history table. A missing file is an empty log.
pub fn load(path: &Path) -> Result<Vec<TransactionRecord>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let date_col = column("Date");
    let id_col = column("Panel_ID");
    let action_col = column("Action");
    let user_col = column("User");
    let category_col = column("Category");
    let sub_status_col = column("Sub_Status");
    let comments_col = column("Comments");

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field =
            |col: Option<usize>| col.and_then(|index| record.get(index)).unwrap_or("");

        records.push(TransactionRecord {
            timestamp: parse_timestamp(field(date_col)),
            panel_id: field(id_col).trim().to_uppercase(),
            action: TransactionAction::from_str(field(action_col)),
            user: field(user_col).to_string(),
            category: field(category_col).to_string(),
            sub_status: RepairStage::from_str(field(sub_status_col)),
            comments: field(comments_col).to_string(),
        });
    }
    Ok(records)
}

/// Rewrite the history file wholesale.
pub fn save(path: &Path, records: &[TransactionRecord]) -> Result<(), StoreError> {
    let file = std::fs::File::create(path)?;
    write_to(file, records)
}

/// Serialize the log to any writer (backs both [`save`] and the CSV export).
pub fn write_to<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<(), StoreError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for record in records {
        let date = record.timestamp.format(DATE_FORMAT).to_string();
        csv_writer.write_record([
            date.as_str(),
            record.panel_id.as_str(),
            record.action.as_str(),
            record.user.as_str(),
            record.category.as_str(),
            sub_status_str(record.sub_status),
            record.comments.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render the log as a CSV string for the one-way export.
pub fn to_csv_string(records: &[TransactionRecord]) -> Result<String, StoreError> {
    let mut buffer = Vec::new();
    write_to(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn parse_timestamp(raw: &str) -> Timestamp {
    let raw = raw.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
        return parsed.and_utc();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    DateTime::UNIX_EPOCH
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
