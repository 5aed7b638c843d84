//! Route definitions for operator form metadata.
//!
//! ```text
//! GET /meta/form-options  -> form_options
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/meta/form-options", get(meta::form_options))
}
