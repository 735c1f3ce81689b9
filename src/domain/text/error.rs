use crate::error::AppError;
use crate::infrastructure::repositories::ExternalApiError;

#[derive(Debug, thiserror::Error)]
pub enum TextServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("dependency error: {0}")]
    Dependency(#[from] ExternalApiError),
}

impl From<TextServiceError> for AppError {
    fn from(err: TextServiceError) -> Self {
        match err {
            TextServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TextServiceError::NotConfigured => AppError::ServiceUnavailable(
                "Text generation is not available right now. Please write your own text."
                    .to_string(),
            ),
            TextServiceError::Dependency(e) => AppError::ExternalService(format!(
                "There was an issue communicating with the Anthropic API: \"{}\"",
                e.message()
            )),
        }
    }
}
