//! HTTP error mapping.
//!
//! Handlers return `Result<T, ApiError>`; every error becomes a JSON body
//! `{"message": "..."}`. Invalid input is echoed back to the caller.
//! Transcoder and storage failures are logged in full but reported only by
//! kind, so scratch paths and stderr never reach clients.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::application::{IndexError, SubmitError};

/// All errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("expected multipart/form-data: {0}")]
    NotMultipart(#[from] MultipartRejection),
}

impl ApiError {
    /// Status code and client-facing message
    fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Submit(SubmitError::InvalidInput(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Submit(e @ SubmitError::TranscodeFailure(_)) => {
                error!(kind = e.kind(), error = %e, "conversion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "conversion failed: transcoder error".to_owned(),
                )
            }
            ApiError::Submit(e @ SubmitError::StorageFailure(_)) => {
                error!(kind = e.kind(), error = %e, "conversion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "conversion failed: storage error".to_owned(),
                )
            }
            ApiError::Index(e) => {
                error!(error = %e, "index regeneration failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "index regeneration failed".to_owned(),
                )
            }
            ApiError::Multipart(e) => {
                let status = match e.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, format!("malformed upload: {}", e.body_text()))
            }
            ApiError::NotMultipart(e) => (
                StatusCode::BAD_REQUEST,
                format!("expected multipart/form-data: {}", e.body_text()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "message": message }))).into_response()
    }
}
