use super::api_error::{error_from_response, ExternalApiError};
use super::tts_repository::{SynthesizedAudio, TtsRepository};
use crate::domain::provider::ProviderIdentity;
use crate::infrastructure::audio::AudioStore;
use crate::infrastructure::retry::RetryPolicy;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const OPENAI_API_BASE_URL: &str = "https://api.openai.com";

pub const OPENAI_TTS_MODEL: &str = "gpt-4o-mini-tts";

const OPENAI_RETRY_POLICY: RetryPolicy =
    RetryPolicy::fixed(2, Duration::from_secs(2), Duration::from_secs(40));

/// Base voices a round can be spoken with
const BASE_VOICES: [&str; 9] = [
    "alloy", "ash", "coral", "echo", "fable", "onyx", "nova", "sage", "shimmer",
];

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    /// Steers delivery; carries the character description
    instructions: &'a str,
    response_format: &'static str,
}

/// OpenAI speech endpoint. A base voice is picked at random per request and
/// the character description is sent as speaking instructions.
pub struct OpenAiTtsRepository {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    audio_store: Arc<AudioStore>,
    retry: RetryPolicy,
}

impl OpenAiTtsRepository {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        model: String,
        audio_store: Arc<AudioStore>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: OPENAI_API_BASE_URL.to_string(),
            model,
            audio_store,
            retry: OPENAI_RETRY_POLICY,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn random_voice() -> &'static str {
        BASE_VOICES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("alloy")
    }

    async fn call_openai(
        &self,
        voice_description: &str,
        text: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ExternalApiError> {
        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice,
            instructions: voice_description,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/v1/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &["/error/message"]).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<SynthesizedAudio, ExternalApiError> {
        let start_time = std::time::Instant::now();
        let voice = Self::random_voice();

        tracing::debug!(
            provider = %ProviderIdentity::OpenAi,
            model = %self.model,
            voice = voice,
            description_length = voice_description.len(),
            text_length = text.len(),
            "Starting OpenAI TTS synthesis"
        );

        let audio = self
            .retry
            .run("openai_tts", || self.call_openai(voice_description, text, voice))
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = %ProviderIdentity::OpenAi,
                    error = %e,
                    "OpenAI TTS failed"
                );
                e
            })?;

        let audio_ref = self
            .audio_store
            .save(ProviderIdentity::OpenAi, &audio)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store OpenAI audio");
                ExternalApiError::transient()
            })?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = %ProviderIdentity::OpenAi,
            model = %self.model,
            voice = voice,
            latency_ms = duration.as_millis() as u64,
            latency_secs = duration.as_secs_f64(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            generation_id: None,
            audio_ref,
        })
    }
}
