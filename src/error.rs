use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Returned to clients in place of internal error text
pub const GENERIC_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing your request. Please try again shortly.";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure - message + status code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Internal failures never expose their raw text.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::ExternalService(msg)
            | Self::ServiceUnavailable(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
        };
        ErrorResponse { message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::BadRequest(_) | Self::NotFound(_) => {
                tracing::warn!(error = %self, status = %status.as_u16(), "Request rejected");
            }
            _ => {
                tracing::error!(error = %self, status = %status.as_u16(), "Request failed");
            }
        }

        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
