//! Route definitions for the audit view of the history log.
//!
//! ```text
//! GET /history         -> list_history
//! GET /history/export  -> export_history
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(history::list_history))
        .route("/history/export", get(history::export_history))
}
