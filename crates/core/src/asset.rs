//! Asset state model: the Inventory Table row and its closed status enums.
//!
//! Statuses and repair stages were free strings in the legacy spreadsheets;
//! here they are closed enumerations validated where operator input enters
//! the system. Loading is tolerant (unrecognized stored strings map to
//! `Unknown`), writing is strict.

use serde::{Deserialize, Serialize};

use crate::ident::PanelId;
use crate::types::Timestamp;

/// Placeholder the tables use for an absent sub-status.
pub const SUB_STATUS_NA: &str = "N/A";

/// Well-known locations used by the outcome rules.
pub mod locations {
    pub const WORKSHOP: &str = "Workshop";
    pub const STORAGE: &str = "Storage";
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Current status of a panel holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    #[serde(rename = "In Use")]
    InUse,
    #[serde(rename = "Under Repair")]
    UnderRepair,
    #[serde(rename = "Under PM")]
    UnderPm,
    Damaged,
    Storage,
    Unknown,
    Other,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 7] = [
        AssetStatus::InUse,
        AssetStatus::UnderRepair,
        AssetStatus::UnderPm,
        AssetStatus::Damaged,
        AssetStatus::Storage,
        AssetStatus::Unknown,
        AssetStatus::Other,
    ];

    /// String representation for table storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::InUse => "In Use",
            AssetStatus::UnderRepair => "Under Repair",
            AssetStatus::UnderPm => "Under PM",
            AssetStatus::Damaged => "Damaged",
            AssetStatus::Storage => "Storage",
            AssetStatus::Unknown => "Unknown",
            AssetStatus::Other => "Other",
        }
    }

    /// Parse from a stored string, defaulting to `Unknown` for unrecognized
    /// values. Legacy files carry hand-edited cells.
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "In Use" => AssetStatus::InUse,
            "Under Repair" => AssetStatus::UnderRepair,
            "Under PM" => AssetStatus::UnderPm,
            "Damaged" => AssetStatus::Damaged,
            "Storage" => AssetStatus::Storage,
            "Other" => AssetStatus::Other,
            _ => AssetStatus::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// RepairStage
// ---------------------------------------------------------------------------

/// Pipeline stage of an asset under repair. Meaningful only while the
/// asset's status is [`AssetStatus::UnderRepair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairStage {
    #[serde(rename = "To check")]
    ToCheck,
    #[serde(rename = "Waiting Parts")]
    WaitingParts,
    #[serde(rename = "Ready to Install")]
    ReadyToInstall,
}

impl RepairStage {
    pub const ALL: [RepairStage; 3] = [
        RepairStage::ToCheck,
        RepairStage::WaitingParts,
        RepairStage::ReadyToInstall,
    ];

    /// String representation for table storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStage::ToCheck => "To check",
            RepairStage::WaitingParts => "Waiting Parts",
            RepairStage::ReadyToInstall => "Ready to Install",
        }
    }

    /// Parse from a stored string. `"N/A"`, empty, and unrecognized values
    /// all mean "no sub-status".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "To check" => Some(RepairStage::ToCheck),
            "Waiting Parts" => Some(RepairStage::WaitingParts),
            "Ready to Install" => Some(RepairStage::ReadyToInstall),
            _ => None,
        }
    }
}

/// Render an optional repair stage the way the tables store it.
pub fn sub_status_str(sub_status: Option<RepairStage>) -> &'static str {
    sub_status.map_or(SUB_STATUS_NA, |stage| stage.as_str())
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// One row of the Inventory Table: the current state of a panel holder.
///
/// The Inventory Table is a derived cache of the latest transaction per
/// asset. Rows are created by explicit registration or by the first
/// transaction against an ID, mutated by every later transaction, and never
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: PanelId,
    pub status: AssetStatus,
    pub sub_status: Option<RepairStage>,
    /// Free-form: a machine name, "Workshop", or "Storage".
    pub location: String,
    pub last_updated: Timestamp,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
