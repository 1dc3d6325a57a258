use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::Envelope;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// A required field is missing or the body is unreadable.
    #[error("{0}")]
    Validation(String),

    /// A unique column already holds the submitted value.
    #[error("{0}")]
    Conflict(String),

    #[error("user not found")]
    NotFound,

    #[error("route not found")]
    RouteNotFound,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::failure(self.to_string()));
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation("invalid JSON body".into())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        // A non-numeric id cannot match any row.
        tracing::warn!("Rejected path parameter: {}", rejection.body_text());
        ApiError::NotFound
    }
}
