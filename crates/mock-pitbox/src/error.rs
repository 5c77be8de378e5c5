//! Error types for the mock backend.
//!
//! [`ApiError`] implements [`axum::response::IntoResponse`] and renders
//! `{"detail": "..."}` bodies, the shape the real assistant service uses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pitbox_models::ModelError;
use serde_json::json;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ModelError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
