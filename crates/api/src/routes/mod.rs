pub mod assets;
pub mod health;
pub mod history;
pub mod meta;
pub mod reports;
pub mod transactions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets              asset listing, lookup, registration
/// /transactions        ledger commits
/// /history             audit listing and CSV export
/// /reports             KPI and trend aggregates
/// /meta                operator form options
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(assets::router())
        .merge(transactions::router())
        .merge(history::router())
        .merge(reports::router())
        .merge(meta::router())
}
