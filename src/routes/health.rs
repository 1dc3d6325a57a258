use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{errors::ApiError, startup::AppState};

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.environment,
    }))
}

pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Roster API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "users": "/api/users",
            "health": "/health",
        },
    }))
}

pub async fn route_not_found() -> ApiError {
    tracing::warn!("No route matched");
    ApiError::RouteNotFound
}
