//! Handler for committing ledger transactions.
//!
//! The request body carries the operator form verbatim; conversion into a
//! [`TransactionInput`] is where free-form input meets the closed domain
//! enums. Outcome derivation and persistence live in core and store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jigtrack_core::asset::{Asset, RepairStage};
use jigtrack_core::ident::PanelId;
use jigtrack_core::transaction::{
    ActionRequest, FailureCategory, RemovalDetails, RemovalReason, TransactionAction,
    TransactionInput, TransactionRecord,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Request body for a transaction commit.
#[derive(Debug, Deserialize)]
pub struct CommitTransaction {
    pub panel_id: String,
    pub technician: String,
    pub action: TransactionAction,
    /// Install target; required when `action` is `Install`.
    pub machine: Option<String>,
    /// Removal reason; required when `action` is `Remove`.
    pub reason: Option<RemovalReason>,
    /// Repair pipeline stage; defaults to `To check` for repair removals.
    pub stage: Option<RepairStage>,
    /// Failure category; required when `action` is `Remove`.
    pub category: Option<FailureCategory>,
    /// Explanation for category `Other`.
    pub other_detail: Option<String>,
    /// Operator observations, free text.
    pub notes: Option<String>,
}

impl CommitTransaction {
    fn into_input(self) -> Result<TransactionInput, AppError> {
        let id = PanelId::new(&self.panel_id)?;

        let technician = self.technician.trim().to_string();
        if technician.is_empty() {
            return Err(AppError::BadRequest(
                "technician must not be empty".to_string(),
            ));
        }

        let request = match self.action {
            TransactionAction::Install => {
                let machine = self.machine.unwrap_or_default();
                ActionRequest::Install { machine }
            }
            TransactionAction::Remove => {
                let reason = self.reason.ok_or_else(|| {
                    AppError::BadRequest("reason is required for a removal".to_string())
                })?;
                let category = self.category.ok_or_else(|| {
                    AppError::BadRequest("category is required for a removal".to_string())
                })?;
                ActionRequest::Remove(RemovalDetails {
                    reason,
                    stage: self.stage,
                    category,
                    other_detail: self.other_detail.unwrap_or_default(),
                })
            }
        };

        Ok(TransactionInput {
            id,
            technician,
            request,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// Response payload: the new asset state and the appended history row.
#[derive(Debug, Serialize)]
pub struct AppliedResponse {
    pub asset: Asset,
    pub record: TransactionRecord,
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// POST /api/v1/transactions
///
/// Apply one Install or Remove transaction. A rejected commit (the
/// empty-'Other'-explanation rule, blank machine) returns 400 and leaves
/// both tables unchanged.
pub async fn commit_transaction(
    State(state): State<AppState>,
    Json(input): Json<CommitTransaction>,
) -> AppResult<impl IntoResponse> {
    let input = input.into_input()?;
    let applied = state.store.commit_transaction(&input)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AppliedResponse {
                asset: applied.asset,
                record: applied.record,
            },
        }),
    ))
}
