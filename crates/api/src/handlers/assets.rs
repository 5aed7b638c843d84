//! Handlers for the asset inventory: listing, scanned-ID lookup, and
//! explicit registration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jigtrack_core::asset::Asset;
use jigtrack_core::ident::PanelId;
use jigtrack_core::lookup::IdLookup;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
///
/// Current inventory snapshot, in table order.
pub async fn list_assets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.store.load()?;
    Ok(Json(DataResponse {
        data: snapshot.inventory,
    }))
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Lookup result for a scanned ID.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// `"known"` or `"registrable"`.
    pub classification: &'static str,
    /// Current state when the panel is known; `null` for a registrable ID.
    pub asset: Option<Asset>,
}

/// GET /api/v1/assets/{id}
///
/// Classify a scanned ID. IDs absent from both the inventory and the master
/// list return 404 with code `NOT_IN_MASTER_LIST`; the operator can recover
/// by registering the panel.
pub async fn lookup_asset(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = PanelId::new(&raw_id)?;

    let response = match state.store.lookup(&id)? {
        IdLookup::Known(asset) => LookupResponse {
            classification: "known",
            asset: Some(asset),
        },
        IdLookup::Registrable => LookupResponse {
            classification: "registrable",
            asset: None,
        },
        IdLookup::Unlisted => return Err(AppError::UnlistedPanel(id.to_string())),
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Request body for explicit panel registration.
#[derive(Debug, Deserialize)]
pub struct RegisterPanel {
    pub panel_id: String,
}

/// POST /api/v1/assets
///
/// Register a panel: creates its inventory row in Storage and adds the ID to
/// the authorized list if missing. Registering an already-known panel is a
/// 409 conflict.
pub async fn register_asset(
    State(state): State<AppState>,
    Json(input): Json<RegisterPanel>,
) -> AppResult<impl IntoResponse> {
    let id = PanelId::new(&input.panel_id)?;
    let asset = state.store.register(&id)?;

    tracing::info!(panel_id = %asset.id, "Panel registered via API");

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}
