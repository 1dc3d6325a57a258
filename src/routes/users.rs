use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use super::extract::{ApiJson, ApiPath};
use crate::{
    errors::ApiError,
    models::{Envelope, NewUser, UserChanges},
    startup::AppState,
};

#[instrument(name = "HTTP: List users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_service.list().await?;
    let count = users.len();
    Ok(Json(Envelope::data(users).with_count(count)))
}

#[instrument(name = "HTTP: Get user", skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.get(id).await?;
    Ok(Json(Envelope::data(user)))
}

#[instrument(name = "HTTP: Create user", skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(user).with_message("user created successfully")),
    ))
}

#[instrument(name = "HTTP: Update user", skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UserChanges>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.update(id, payload).await?;
    Ok(Json(
        Envelope::data(user).with_message("user updated successfully"),
    ))
}

#[instrument(name = "HTTP: Delete user", skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.delete(id).await?;
    Ok(Json(
        Envelope::data(user).with_message("user removed successfully"),
    ))
}
