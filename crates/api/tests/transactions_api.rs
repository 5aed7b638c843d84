//! Integration tests for transaction commits: the install/remove lifecycle
//! and the validations that block a commit.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Install / remove lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn install_then_remove_walks_the_expected_states() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    // Install to Machine 1.
    let response = post_json(
        app.clone(),
        "/api/v1/transactions",
        json!({
            "panel_id": "54r15564",
            "technician": "Anand",
            "action": "Install",
            "machine": "Machine 1",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["asset"]["id"], "54R15564");
    assert_eq!(json["data"]["asset"]["status"], "In Use");
    assert_eq!(json["data"]["asset"]["location"], "Machine 1");
    assert_eq!(json["data"]["record"]["action"], "Install");
    assert_eq!(json["data"]["record"]["user"], "Anand");
    assert_eq!(json["data"]["record"]["category"], "Production");

    // Remove for repair, waiting on parts.
    let response = post_json(
        app.clone(),
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "reason": "Repair",
            "stage": "Waiting Parts",
            "category": "CSS",
            "notes": "tape feed jammed",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["asset"]["status"], "Under Repair");
    assert_eq!(json["data"]["asset"]["sub_status"], "Waiting Parts");
    assert_eq!(json["data"]["asset"]["location"], "Workshop");
    assert_eq!(json["data"]["record"]["comments"], "[CSS] tape feed jammed");

    // Exactly one inventory row, two history rows; the install row is
    // untouched by the second commit.
    let listing = body_json(get(app.clone(), "/api/v1/assets").await).await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);

    let history = body_json(get(app, "/api/v1/history").await).await;
    let rows = history["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest-first audit ordering.
    assert_eq!(rows[0]["action"], "Remove");
    assert_eq!(rows[1]["action"], "Install");
    assert_eq!(rows[1]["category"], "Production");
}

#[tokio::test]
async fn repeated_installs_keep_a_single_inventory_row() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    for machine in ["ECP101", "ECP102", "ECP103"] {
        let response = post_json(
            app.clone(),
            "/api/v1/transactions",
            json!({
                "panel_id": "54R15564",
                "technician": "Admin",
                "action": "Install",
                "machine": machine,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listing = body_json(get(app.clone(), "/api/v1/assets").await).await;
    let assets = listing["data"].as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["location"], "ECP103");

    let history = body_json(get(app, "/api/v1/history").await).await;
    assert_eq!(history["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn removal_for_pm_clears_sub_status() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "reason": "Preventive Maintenance",
            "category": "Tape",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["asset"]["status"], "Under PM");
    assert!(json["data"]["asset"]["sub_status"].is_null());
    assert_eq!(json["data"]["asset"]["location"], "Workshop");
}

// ---------------------------------------------------------------------------
// Blocking validations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn other_category_without_explanation_leaves_tables_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app.clone(),
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "reason": "Repair",
            "category": "Other",
            "notes": "notes do not satisfy the explanation rule",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // No state change, no log entry.
    let listing = body_json(get(app.clone(), "/api/v1/assets").await).await;
    assert_eq!(listing["data"], serde_json::json!([]));
    let history = body_json(get(app, "/api/v1/history").await).await;
    assert_eq!(history["data"], serde_json::json!([]));
}

#[tokio::test]
async fn other_category_with_explanation_commits() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "reason": "Other",
            "category": "Other",
            "other_detail": "bent frame",
            "notes": "see photo",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["asset"]["status"], "Other");
    assert_eq!(
        json["data"]["record"]["comments"],
        "[Other] bent frame | see photo",
    );
}

#[tokio::test]
async fn install_without_machine_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Install",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn removal_without_reason_or_category_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app.clone(),
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "category": "CSS",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "Anand",
            "action": "Remove",
            "reason": "Repair",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_technician_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/v1/transactions",
        json!({
            "panel_id": "54R15564",
            "technician": "  ",
            "action": "Install",
            "machine": "ECP101",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
