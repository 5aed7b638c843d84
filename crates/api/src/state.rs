use std::sync::Arc;

use jigtrack_store::LedgerStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable: the store handle holds only file paths and the
/// config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the flat-file ledger store.
    pub store: LedgerStore,
    /// Server configuration (machine roster, data directory).
    pub config: Arc<ServerConfig>,
}
