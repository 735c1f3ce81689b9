use super::error::TextServiceError;
use crate::domain::shared::validation::validate_character_description;
use crate::infrastructure::repositories::TextGenerationRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct TextService {
    generator: Option<Arc<dyn TextGenerationRepository>>,
}

impl TextService {
    pub fn new(generator: Option<Arc<dyn TextGenerationRepository>>) -> Self {
        Self { generator }
    }
}

#[async_trait]
pub trait TextServiceApi: Send + Sync {
    /// Generate a short line of dialogue for the described character.
    /// Generator errors are passed through unchanged; retries live in the generator.
    async fn generate_text(&self, character_description: &str) -> Result<String, TextServiceError>;
}

#[async_trait]
impl TextServiceApi for TextService {
    async fn generate_text(&self, character_description: &str) -> Result<String, TextServiceError> {
        validate_character_description(character_description).map_err(TextServiceError::Invalid)?;

        let generator = self.generator.as_ref().ok_or(TextServiceError::NotConfigured)?;

        tracing::info!(
            description_length = character_description.len(),
            "Generating text"
        );

        let text = generator.generate_text(character_description.trim()).await?;
        Ok(text)
    }
}
