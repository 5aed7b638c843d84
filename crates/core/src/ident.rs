//! Panel ID normalization.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// PanelId
// ---------------------------------------------------------------------------

/// Normalized panel-holder identifier.
///
/// IDs arrive from barcode scanners and hand-typing, so they are trimmed and
/// uppercased once at construction; everything downstream compares the
/// canonical form. Any non-empty string is structurally acceptable -- there
/// is no checksum or format constraint on panel IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PanelId(String);

impl PanelId {
    /// Build a canonical ID from raw operator input.
    ///
    /// Returns `CoreError::Validation` if the input is empty after trimming.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation(
                "panel id must not be empty".to_string(),
            ));
        }
        Ok(PanelId(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PanelId {
    type Error = CoreError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        PanelId::new(&raw)
    }
}

impl From<PanelId> for String {
    fn from(id: PanelId) -> String {
        id.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
