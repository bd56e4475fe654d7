//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::export::ExportError;
use crate::stats::StatsError;
use crate::storage::StorageError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Statistics request error
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Storage(e) => match e {
                StorageError::IndexOutOfRange { .. } => {
                    (StatusCode::BAD_REQUEST, "INDEX_OUT_OF_RANGE")
                }
                StorageError::NoData => (StatusCode::BAD_REQUEST, "NO_DATA"),
                StorageError::Io(_) | StorageError::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
            },
            ApiError::Stats(e) => match e {
                StatsError::DateParse { .. } => (StatusCode::BAD_REQUEST, "DATE_PARSE_ERROR"),
                StatsError::InvalidTimezone(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
                }
            },
            ApiError::Export(e) => match e {
                ExportError::NoData => (StatusCode::BAD_REQUEST, "NO_DATA"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
