use super::api_error::ExternalApiError;
use async_trait::async_trait;

/// Language model that writes a short monologue for a character
#[async_trait]
pub trait TextGenerationRepository: Send + Sync {
    async fn generate_text(&self, character_description: &str) -> Result<String, ExternalApiError>;
}
