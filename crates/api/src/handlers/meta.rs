//! Handler for the operator form options.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use jigtrack_core::asset::RepairStage;
use jigtrack_core::transaction::{FailureCategory, RemovalReason};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything the operator form needs to render its selectors.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    /// Technician names from the master list.
    pub technicians: Vec<String>,
    /// Install targets from server configuration.
    pub machines: Vec<String>,
    pub removal_reasons: Vec<&'static str>,
    pub repair_stages: Vec<&'static str>,
    pub failure_categories: Vec<&'static str>,
}

/// GET /api/v1/meta/form-options
pub async fn form_options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let technicians = state.store.technicians()?;

    Ok(Json(DataResponse {
        data: FormOptions {
            technicians,
            machines: state.config.machines.clone(),
            removal_reasons: RemovalReason::ALL.iter().map(|r| r.as_str()).collect(),
            repair_stages: RepairStage::ALL.iter().map(|s| s.as_str()).collect(),
            failure_categories: FailureCategory::ALL.iter().map(|c| c.as_str()).collect(),
        },
    }))
}
