//! Route definitions for the asset inventory.
//!
//! ```text
//! GET  /assets        -> list_assets
//! POST /assets        -> register_asset
//! GET  /assets/{id}   -> lookup_asset
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assets", get(assets::list_assets).post(assets::register_asset))
        .route("/assets/{id}", get(assets::lookup_asset))
}
