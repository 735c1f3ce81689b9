use reqwest::StatusCode;
use serde_json::Value;

use crate::error::GENERIC_ERROR_MESSAGE;

/// Failure of a call to a third-party API, classified for retry decisions.
/// The message is always safe to show to a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExternalApiError {
    /// Network failures, timeouts and 5xx responses
    #[error("{0}")]
    Transient(String),
    /// 429 responses
    #[error("{0}")]
    RateLimited(String),
    /// Client errors other than 429. Never retried.
    #[error("{0}")]
    Rejected(String),
}

impl ExternalApiError {
    pub fn transient() -> Self {
        Self::Transient(GENERIC_ERROR_MESSAGE.to_string())
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transient(msg) | Self::RateLimited(msg) | Self::Rejected(msg) => msg,
        }
    }

    /// Classify a non-success response. `body_message` is the vendor's own message, if any.
    pub fn from_status(status: StatusCode, body_message: Option<String>) -> Self {
        let message = body_message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimited(message)
        } else if status.is_client_error() {
            Self::Rejected(message)
        } else {
            Self::Transient(message)
        }
    }
}

impl From<reqwest::Error> for ExternalApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status, None),
            None => Self::transient(),
        }
    }
}

/// Pull a human readable message out of a vendor error body by trying each
/// JSON pointer in turn.
pub fn extract_error_message(body: &str, pointers: &[&str]) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    pointers
        .iter()
        .filter_map(|pointer| json.pointer(pointer))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

/// Read a failed response body and turn it into a classified error
pub async fn error_from_response(
    response: reqwest::Response,
    pointers: &[&str],
) -> ExternalApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = %status.as_u16(), body = %body, "External API returned an error");
    ExternalApiError::from_status(status, extract_error_message(&body, pointers))
}
