use super::error::SynthesisServiceError;
use super::model::{ComparisonPair, SynthesisOption};
use super::registry::ProviderRegistry;
use crate::domain::provider::{ProviderIdentity, ProviderSelector};
use crate::domain::shared::validation::{validate_character_description, validate_text};
use crate::infrastructure::repositories::{ExternalApiError, SynthesizedAudio, TtsRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SynthesisService {
    selector: Arc<ProviderSelector>,
    registry: Arc<ProviderRegistry>,
}

impl SynthesisService {
    pub fn new(selector: Arc<ProviderSelector>, registry: Arc<ProviderRegistry>) -> Self {
        Self { selector, registry }
    }
}

#[async_trait]
pub trait SynthesisServiceApi: Send + Sync {
    /// Run one synthesis round
    ///
    /// This operation:
    /// - Validates the description and text
    /// - Selects a provider pair (Hume against itself when the text was edited)
    /// - Calls both providers concurrently with identical input
    /// - Randomly assigns the two results to option A and option B
    ///
    /// Fails as a whole if either provider fails; no partial pair is returned.
    async fn synthesize(
        &self,
        character_description: &str,
        text: &str,
        text_modified: bool,
    ) -> Result<ComparisonPair, SynthesisServiceError>;
}

#[async_trait]
impl SynthesisServiceApi for SynthesisService {
    async fn synthesize(
        &self,
        character_description: &str,
        text: &str,
        text_modified: bool,
    ) -> Result<ComparisonPair, SynthesisServiceError> {
        validate_character_description(character_description)
            .map_err(SynthesisServiceError::Invalid)?;
        validate_text(text).map_err(SynthesisServiceError::Invalid)?;

        let (provider_a, provider_b) = self.selector.select_providers(text_modified);

        tracing::info!(
            provider_a = %provider_a,
            provider_b = %provider_b,
            text_modified = text_modified,
            text_length = text.len(),
            "Starting synthesis round"
        );

        let repo_a = self.lookup(provider_a)?;
        let repo_b = self.lookup(provider_b)?;

        // Both calls run to completion even if one fails first
        let (result_a, result_b) = tokio::join!(
            repo_a.synthesize(character_description, text),
            repo_b.synthesize(character_description, text),
        );

        let (first, second) = tag(provider_a, result_a)
            .and_then(|first| tag(provider_b, result_b).map(|second| (first, second)))
            .map_err(|e| {
                log_failure(&e);
                e
            })?;

        Ok(ComparisonPair::shuffled(first, second, &mut rand::thread_rng()))
    }
}

impl SynthesisService {
    fn lookup(
        &self,
        provider: ProviderIdentity,
    ) -> Result<Arc<dyn TtsRepository>, SynthesisServiceError> {
        self.registry.get(provider).ok_or_else(|| {
            tracing::error!(provider = %provider, "Selected provider is not configured");
            SynthesisServiceError::ProviderNotConfigured(provider)
        })
    }
}

fn tag(
    provider: ProviderIdentity,
    result: Result<SynthesizedAudio, ExternalApiError>,
) -> Result<SynthesisOption, SynthesisServiceError> {
    result
        .map(|audio| SynthesisOption {
            provider,
            audio_ref: audio.audio_ref,
            generation_id: audio.generation_id,
        })
        .map_err(|source| SynthesisServiceError::ProviderFailed { provider, source })
}

fn log_failure(err: &SynthesisServiceError) {
    tracing::error!(
        provider = ?err.provider(),
        error = %err,
        "Synthesis round failed"
    );
}
