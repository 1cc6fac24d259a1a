//! Maps protocol and infrastructure errors to HTTP responses.
//!
//! The body shape is also what peers parse when a delivery is rejected:
//! a non-empty `details` map becomes a validation error on their side.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use s2s_core::error::{AppError, ErrorKind, ShareError};
use s2s_core::types::ValidationReport;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Per-entity validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationReport>,
}

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub ShareError);

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        Self(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(ShareError::App(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, error_code, details) = match self.0 {
            ShareError::Validation(report) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Some(report))
            }
            ShareError::Share { errors, .. } => (StatusCode::BAD_REQUEST, "SHARE_ERROR", errors),
            ShareError::App(err) => {
                let (status, code) = app_status(&err);
                (status, code, None)
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

fn app_status(err: &AppError) -> (StatusCode, &'static str) {
    match err.kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Encryption => (StatusCode::BAD_REQUEST, "ENCRYPTION_ERROR"),
        ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => {
            tracing::error!(error = %err, "Internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}
