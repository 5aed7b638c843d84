//! Transaction model and the outcome derivation rules.
//!
//! A transaction is one Install or Remove action applied to an asset. The
//! action and its sub-parameters deterministically resolve to a
//! `(status, sub_status, location)` triple:
//!
//! | action  | sub-parameter          | status       | sub_status | location |
//! |---------|------------------------|--------------|------------|----------|
//! | Install | target machine         | In Use       | --         | machine  |
//! | Remove  | Repair + stage         | Under Repair | stage      | Workshop |
//! | Remove  | Preventive Maintenance | Under PM     | --         | Workshop |
//! | Remove  | Damaged                | Damaged      | --         | Workshop |
//! | Remove  | Other                  | Other        | --         | Workshop |
//! | Remove  | Unknown                | Unknown      | --         | Workshop |

use serde::{Deserialize, Serialize};

use crate::asset::{locations, AssetStatus, RepairStage};
use crate::error::CoreError;
use crate::ident::PanelId;
use crate::types::Timestamp;

/// Category recorded for every install transaction.
pub const INSTALL_CATEGORY: &str = "Production";

// ---------------------------------------------------------------------------
// TransactionAction
// ---------------------------------------------------------------------------

/// The two transaction kinds the ledger records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAction {
    Install,
    Remove,
}

impl TransactionAction {
    /// String representation for table storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionAction::Install => "Install",
            TransactionAction::Remove => "Remove",
        }
    }

    /// Parse from a stored string, defaulting to `Remove` for unrecognized
    /// values (removals dominate legacy logs and carry the richer fields).
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "Install" => TransactionAction::Install,
            _ => TransactionAction::Remove,
        }
    }
}

// ---------------------------------------------------------------------------
// RemovalReason
// ---------------------------------------------------------------------------

/// Why an asset was pulled off a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    Repair,
    #[serde(rename = "Preventive Maintenance")]
    PreventiveMaintenance,
    Damaged,
    Other,
    Unknown,
}

impl RemovalReason {
    pub const ALL: [RemovalReason; 5] = [
        RemovalReason::Repair,
        RemovalReason::PreventiveMaintenance,
        RemovalReason::Damaged,
        RemovalReason::Other,
        RemovalReason::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Repair => "Repair",
            RemovalReason::PreventiveMaintenance => "Preventive Maintenance",
            RemovalReason::Damaged => "Damaged",
            RemovalReason::Other => "Other",
            RemovalReason::Unknown => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// FailureCategory
// ---------------------------------------------------------------------------

/// Failure source recorded on removals, used by the trend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCategory {
    #[serde(rename = "CSS")]
    Css,
    Tape,
    Other,
}

impl FailureCategory {
    pub const ALL: [FailureCategory; 3] = [
        FailureCategory::Css,
        FailureCategory::Tape,
        FailureCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Css => "CSS",
            FailureCategory::Tape => "Tape",
            FailureCategory::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Requested action
// ---------------------------------------------------------------------------

/// Parameters of a removal, as accepted at the operator boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalDetails {
    pub reason: RemovalReason,
    /// Repair pipeline stage; only meaningful when `reason` is `Repair`.
    /// Absent means the operator left the default, `To check`.
    pub stage: Option<RepairStage>,
    pub category: FailureCategory,
    /// Free-text explanation; required when `category` is `Other`.
    pub other_detail: String,
}

/// A requested action with its sub-parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    Install { machine: String },
    Remove(RemovalDetails),
}

impl ActionRequest {
    pub fn action(&self) -> TransactionAction {
        match self {
            ActionRequest::Install { .. } => TransactionAction::Install,
            ActionRequest::Remove(_) => TransactionAction::Remove,
        }
    }

    /// Category string recorded in the history row.
    pub fn category_str(&self) -> &'static str {
        match self {
            ActionRequest::Install { .. } => INSTALL_CATEGORY,
            ActionRequest::Remove(details) => details.category.as_str(),
        }
    }
}

/// A validated transaction ready to be committed against the ledger.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub id: PanelId,
    pub technician: String,
    pub request: ActionRequest,
    /// Operator observations, free text, may be empty.
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Outcome derivation
// ---------------------------------------------------------------------------

/// The `(status, sub_status, location)` triple a transaction resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: AssetStatus,
    pub sub_status: Option<RepairStage>,
    pub location: String,
}

/// Derive the outcome triple for a requested action.
///
/// The one validation that blocks a commit lives here: a removal
/// categorized `Other` without an explanation is rejected before any state
/// is touched. Every other field is accepted as-is, including empty notes.
pub fn derive_outcome(request: &ActionRequest) -> Result<Outcome, CoreError> {
    match request {
        ActionRequest::Install { machine } => {
            let machine = machine.trim();
            if machine.is_empty() {
                return Err(CoreError::Validation(
                    "install target machine must not be empty".to_string(),
                ));
            }
            Ok(Outcome {
                status: AssetStatus::InUse,
                sub_status: None,
                location: machine.to_string(),
            })
        }
        ActionRequest::Remove(details) => {
            if details.category == FailureCategory::Other
                && details.other_detail.trim().is_empty()
            {
                return Err(CoreError::Validation(
                    "an explanation is required when the failure category is 'Other'"
                        .to_string(),
                ));
            }
            let (status, sub_status) = match details.reason {
                RemovalReason::Repair => (
                    AssetStatus::UnderRepair,
                    Some(details.stage.unwrap_or(RepairStage::ToCheck)),
                ),
                RemovalReason::PreventiveMaintenance => (AssetStatus::UnderPm, None),
                RemovalReason::Damaged => (AssetStatus::Damaged, None),
                RemovalReason::Other => (AssetStatus::Other, None),
                RemovalReason::Unknown => (AssetStatus::Unknown, None),
            };
            Ok(Outcome {
                status,
                sub_status,
                location: locations::WORKSHOP.to_string(),
            })
        }
    }
}

/// Compose the history comment string.
///
/// The `Other` explanation is spliced in ahead of the free-text notes so
/// legacy trend tooling that greps `[Category]` prefixes keeps working.
pub fn compose_comment(category: &str, other_detail: &str, notes: &str) -> String {
    if category == FailureCategory::Other.as_str() {
        format!("[{category}] {other_detail} | {notes}")
    } else {
        format!("[{category}] {notes}")
    }
}

// ---------------------------------------------------------------------------
// TransactionRecord
// ---------------------------------------------------------------------------

/// One append-only row of the History Table.
///
/// `panel_id` is a plain string, not a foreign key: the row survives even if
/// the asset never appears in (or vanishes from) the Inventory Table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub timestamp: Timestamp,
    pub panel_id: String,
    pub action: TransactionAction,
    pub user: String,
    pub category: String,
    pub sub_status: Option<RepairStage>,
    pub comments: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
