//! Shared helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jigtrack_api::config::ServerConfig;
use jigtrack_api::router::build_app_router;
use jigtrack_api::state::AppState;
use jigtrack_store::LedgerStore;

/// Build a test `ServerConfig` with safe defaults rooted at `data_dir`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and the default machine roster.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        machines: vec![
            "ECP101".to_string(),
            "ECP102".to_string(),
            "ECP103".to_string(),
        ],
    }
}

/// Build the full application router over a store rooted at `data_dir`.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let store = LedgerStore::open(data_dir).expect("test store must open");

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}
