//! Error types for the verifier server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compliance_engine::VerificationError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("No file provided")]
    NoFileProvided,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Unsupported file format")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::NoFileProvided => (StatusCode::BAD_REQUEST, "NO_FILE_PROVIDED"),
            ServerError::NoFileSelected => (StatusCode::BAD_REQUEST, "NO_FILE_SELECTED"),
            ServerError::UnsupportedFormat(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
            }
            ServerError::Verification(err) => match err {
                VerificationError::NotFound { .. } => (StatusCode::NOT_FOUND, "FILE_NOT_FOUND"),
                VerificationError::UnsupportedFormat { .. } => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
                }
                VerificationError::ExtractionFailure { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
                }
            },
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for ServerError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}
