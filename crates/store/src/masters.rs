//! Newline-delimited master lists: technician names and authorized panel IDs.
//!
//! Missing list files are created with placeholder content rather than
//! treated as fatal; the authorized-ID list grows automatically when an
//! operator registers a previously unlisted panel.

use std::fs;
use std::io::Write;
use std::path::Path;

use jigtrack_core::ident::PanelId;

use crate::error::StoreError;

/// Seed content for a missing technician list.
pub const DEFAULT_TECHNICIANS: &str = "Admin\nAnand\n";

/// Seed content for a missing authorized-ID list.
pub const DEFAULT_AUTHORIZED_IDS: &str = "SAMPLE-PANEL-ID\n";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load_list(path: &Path, default_content: &str) -> Result<Vec<String>, StoreError> {
    if !path.exists() {
        fs::write(path, default_content)?;
        tracing::info!(path = %path.display(), "Created missing master list with placeholder content");
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Load the technician list, creating it with defaults if absent.
pub fn load_technicians(path: &Path) -> Result<Vec<String>, StoreError> {
    load_list(path, DEFAULT_TECHNICIANS)
}

/// Load the authorized-ID list, creating it with a placeholder if absent.
/// Entries are normalized to canonical (uppercased) form.
pub fn load_authorized_ids(path: &Path) -> Result<Vec<String>, StoreError> {
    Ok(load_list(path, DEFAULT_AUTHORIZED_IDS)?
        .into_iter()
        .map(|entry| entry.to_uppercase())
        .collect())
}

// ---------------------------------------------------------------------------
// Appending
// ---------------------------------------------------------------------------

/// Append a newly registered ID unless it is already listed.
///
/// Returns `true` if the list grew.
pub fn append_authorized_id(path: &Path, id: &PanelId) -> Result<bool, StoreError> {
    let existing = load_authorized_ids(path)?;
    if existing.iter().any(|entry| entry == id.as_str()) {
        return Ok(false);
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{id}")?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
