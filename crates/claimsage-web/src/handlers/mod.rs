//! HTTP handlers for all API routes.

pub mod chat;
pub mod patents;
pub mod system;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use claimsage_common::ClaimsageError;
use serde_json::json;

/// Maps domain errors onto HTTP status codes with a JSON error body.
pub struct ApiError(pub ClaimsageError);

impl From<ClaimsageError> for ApiError {
    fn from(err: ClaimsageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ClaimsageError::PatentNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Patent not found: {id}"))
            }
            ClaimsageError::InvalidQuestion(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
