//! Unified API error handling
//!
//! Every failing endpoint answers with the same envelope:
//! `{ "success": false, "error": <code>, "message": ..., "data": null }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domains::certificates::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    pub data: Option<()>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Declared content type is not an accepted image or PDF (415)
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    /// No `file` part in the multipart body (400)
    #[error("No file provided in field \"file\"")]
    MissingFile,

    /// Upload exceeds the configured maximum (413)
    #[error("File too large. Maximum size is {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: usize },

    /// Malformed multipart body, empty file or undecodable image (400)
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Lookup found nothing (404)
    #[error("{0}")]
    NotFound(String),

    /// Persistence failed (500)
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::MissingFile | ApiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnsupportedMediaType(_) => "unsupported_media_type",
            ApiError::MissingFile => "missing_file",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
            ApiError::InvalidUpload(_) => "invalid_upload",
            ApiError::NotFound(_) => "not_found",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: self.code(),
            message: match &self {
                // Database details stay in the logs.
                ApiError::Storage(_) => "Failed to access certificate storage".to_string(),
                other => other.to_string(),
            },
            data: None,
        };

        (status, Json(body)).into_response()
    }
}
