use super::api_error::ExternalApiError;
use async_trait::async_trait;

/// Result of one provider synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    /// Vendor-assigned id, absent for vendors that don't return one
    pub generation_id: Option<String>,
    /// Locator of the stored audio file
    pub audio_ref: String,
}

/// Synthesis capability of a single TTS provider.
///
/// Implementations own their retry budget and per-attempt timeout, and are
/// responsible for persisting the returned audio.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` in a voice matching `voice_description`
    ///
    /// # Errors
    /// Returns the last classified failure once retries are exhausted, or
    /// immediately for rejected input
    async fn synthesize(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<SynthesizedAudio, ExternalApiError>;
}
