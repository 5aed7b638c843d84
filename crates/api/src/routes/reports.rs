//! Route definitions for KPI and trend reports.
//!
//! All report data is recomputed from the tables on every request.
//!
//! ```text
//! GET /reports/status-counts    -> status_counts
//! GET /reports/repair-pipeline  -> repair_pipeline
//! GET /reports/removal-trend    -> removal_trend
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/status-counts", get(reports::status_counts))
        .route("/reports/repair-pipeline", get(reports::repair_pipeline))
        .route("/reports/removal-trend", get(reports::removal_trend))
}
