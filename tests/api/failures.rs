use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PanickingStore, UnreachableStore, spawn_app_with};

#[tokio::test]
async fn store_failure_is_an_internal_error_without_details() {
    let app = spawn_app_with(Arc::new(UnreachableStore));
    let expected = json!({"success": false, "error": "internal server error"});

    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = app.get("/api/users/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = app
        .post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = app
        .put(
            "/api/users/1",
            json!({"name": "Ana", "email": "ana@x.com", "role": "user"}),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = app.delete("/api/users/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);
    assert!(!body.to_string().contains("pool"));
}

#[tokio::test]
async fn health_does_not_depend_on_the_store() {
    let app = spawn_app_with(Arc::new(UnreachableStore));
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn handler_panic_is_rendered_as_internal_error() {
    let app = spawn_app_with(Arc::new(PanickingStore));

    let (status, body) = app.get("/api/users/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "internal server error"}));

    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}
