use crate::domain::provider::ProviderIdentity;
use crate::error::AppError;
use crate::infrastructure::repositories::ExternalApiError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} is not configured")]
    ProviderNotConfigured(ProviderIdentity),
    #[error("{provider} synthesis failed: {source}")]
    ProviderFailed {
        provider: ProviderIdentity,
        #[source]
        source: ExternalApiError,
    },
}

impl SynthesisServiceError {
    /// Provider at fault, if any
    pub fn provider(&self) -> Option<ProviderIdentity> {
        match self {
            SynthesisServiceError::Invalid(_) => None,
            SynthesisServiceError::ProviderNotConfigured(provider)
            | SynthesisServiceError::ProviderFailed { provider, .. } => Some(*provider),
        }
    }
}

impl From<SynthesisServiceError> for AppError {
    fn from(err: SynthesisServiceError) -> Self {
        match err {
            SynthesisServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SynthesisServiceError::ProviderNotConfigured(provider) => AppError::ServiceUnavailable(
                format!("{provider} is not available right now. Please try again shortly."),
            ),
            SynthesisServiceError::ProviderFailed { provider, source } => {
                AppError::ExternalService(format!(
                    "There was an issue communicating with the {provider} API: \"{}\"",
                    source.message()
                ))
            }
        }
    }
}
