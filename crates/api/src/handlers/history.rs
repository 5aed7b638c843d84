//! Handlers for the audit view and the one-way CSV export of the history
//! log.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use jigtrack_core::reporting;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Cap on returned rows, applied after newest-first ordering.
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Audit listing
// ---------------------------------------------------------------------------

/// GET /api/v1/history
///
/// History rows newest-first.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.store.load()?;
    let mut rows = reporting::audit_listing(&snapshot.history);
    if let Some(limit) = params.limit {
        rows.truncate(limit);
    }
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// GET /api/v1/history/export
///
/// The full history log as a CSV attachment, in append order.
pub async fn export_history(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv_output = state.store.export_history_csv()?;

    Ok(axum::response::Response::builder()
        .status(200)
        .header("Content-Type", "text/csv")
        .header("Content-Disposition", "attachment; filename=\"history.csv\"")
        .body(axum::body::Body::from(csv_output))
        .map_err(|err| crate::error::AppError::InternalError(err.to_string()))?
        .into_response())
}
