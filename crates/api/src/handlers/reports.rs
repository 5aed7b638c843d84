//! Handlers for the KPI and trend report endpoints.
//!
//! Thin wrappers over `jigtrack_core::reporting`; aggregates are recomputed
//! from the tables on every request, never stored.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use jigtrack_core::reporting::{self, StatusCounts};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Status counts (KPI bar)
// ---------------------------------------------------------------------------

/// KPI payload: per-status counts plus the master-list fleet size.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Size of the authorized-ID master list, which may differ from the
    /// number of inventory rows (soft whitelist).
    pub total_fleet: usize,
    pub counts: StatusCounts,
}

/// GET /api/v1/reports/status-counts
pub async fn status_counts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.store.load()?;
    let total_fleet = state.store.authorized_ids()?.len();

    Ok(Json(DataResponse {
        data: StatusReport {
            total_fleet,
            counts: reporting::status_counts(&snapshot.inventory),
        },
    }))
}

// ---------------------------------------------------------------------------
// Repair pipeline
// ---------------------------------------------------------------------------

/// GET /api/v1/reports/repair-pipeline
pub async fn repair_pipeline(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.store.load()?;
    Ok(Json(DataResponse {
        data: reporting::repair_pipeline(&snapshot.inventory),
    }))
}

// ---------------------------------------------------------------------------
// Removal trend
// ---------------------------------------------------------------------------

/// GET /api/v1/reports/removal-trend
///
/// Per-day Remove counts grouped by failure category.
pub async fn removal_trend(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.store.load()?;
    Ok(Json(DataResponse {
        data: reporting::removal_trend(&snapshot.history),
    }))
}
