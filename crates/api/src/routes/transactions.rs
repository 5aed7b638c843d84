//! Route definitions for ledger transactions.
//!
//! ```text
//! POST /transactions  -> commit_transaction
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/transactions", post(transactions::commit_transaction))
}
