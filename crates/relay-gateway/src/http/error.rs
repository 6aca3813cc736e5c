//! API error type for the HTTP surface
//!
//! The wire shape is a flat `{"error": <message>}` object; the Display string
//! of each variant is the message the client sees.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_common::AppError;
use relay_notify::PushError;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Errors surfaced by the HTTP endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credential query parameter is absent
    #[error("channelName and uid required")]
    MissingTokenParams,

    /// The participant ID is not a finite numeric identifier
    #[error("uid must be numeric")]
    NonNumericUid,

    /// The push recipient has no notification address on file
    #[error("No push token for recipient")]
    NoPushToken,

    /// The signing primitive failed
    #[error("token_generation_failed")]
    TokenGeneration(#[source] AppError),

    /// The delivery collaborator failed
    #[error("push_failed")]
    PushFailed(#[source] PushError),

    /// Request body failed validation
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingTokenParams
            | Self::NonNumericUid
            | Self::NoPushToken
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TokenGeneration(_) | Self::PushFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors with their source chain
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
