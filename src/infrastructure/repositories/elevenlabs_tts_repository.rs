use super::api_error::{error_from_response, ExternalApiError};
use super::tts_repository::{SynthesizedAudio, TtsRepository};
use crate::domain::provider::ProviderIdentity;
use crate::infrastructure::audio::AudioStore;
use crate::infrastructure::retry::RetryPolicy;
use async_trait::async_trait;
use base64::Engine;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const ELEVENLABS_API_BASE_URL: &str = "https://api.elevenlabs.io";
const OUTPUT_FORMAT: &str = "mp3_44100_128";

const ELEVENLABS_RETRY_POLICY: RetryPolicy =
    RetryPolicy::fixed(2, Duration::from_secs(2), Duration::from_secs(40));

#[derive(Serialize)]
struct CreatePreviewsRequest<'a> {
    voice_description: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct CreatePreviewsResponse {
    #[serde(default)]
    previews: Vec<VoicePreview>,
}

#[derive(Deserialize)]
struct VoicePreview {
    generated_voice_id: String,
    audio_base_64: String,
}

/// ElevenLabs Voice Design: designs a voice from the description and speaks the text with it
pub struct ElevenLabsTtsRepository {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    audio_store: Arc<AudioStore>,
    retry: RetryPolicy,
}

impl ElevenLabsTtsRepository {
    pub fn new(client: reqwest::Client, api_key: String, audio_store: Arc<AudioStore>) -> Self {
        Self {
            client,
            api_key,
            base_url: ELEVENLABS_API_BASE_URL.to_string(),
            audio_store,
            retry: ELEVENLABS_RETRY_POLICY,
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

    async fn create_previews(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<Vec<VoicePreview>, ExternalApiError> {
        let response = self
            .client
            .post(format!("{}/v1/text-to-voice/create-previews", self.base_url))
            .query(&[("output_format", OUTPUT_FORMAT)])
            .header("xi-api-key", &self.api_key)
            .json(&CreatePreviewsRequest {
                voice_description,
                text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &["/detail/message", "/message"]).await);
        }

        let body: CreatePreviewsResponse = response.json().await?;
        if body.previews.is_empty() {
            tracing::error!("ElevenLabs API returned no previews");
            return Err(ExternalApiError::transient());
        }
        Ok(body.previews)
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<SynthesizedAudio, ExternalApiError> {
        let start_time = std::time::Instant::now();

        let previews = self
            .retry
            .run("elevenlabs_tts", || self.create_previews(voice_description, text))
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = %ProviderIdentity::ElevenLabs,
                    error = %e,
                    "ElevenLabs TTS failed"
                );
                e
            })?;

        let preview_count = previews.len();
        let preview = previews
            .choose(&mut rand::thread_rng())
            .ok_or_else(ExternalApiError::transient)?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(preview.audio_base_64.as_bytes())
            .map_err(|e| {
                tracing::error!(error = %e, "ElevenLabs returned undecodable audio");
                ExternalApiError::transient()
            })?;
        let generated_voice_id = preview.generated_voice_id.clone();

        let audio_ref = self
            .audio_store
            .save(ProviderIdentity::ElevenLabs, &audio)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store ElevenLabs audio");
                ExternalApiError::transient()
            })?;

        tracing::info!(
            provider = %ProviderIdentity::ElevenLabs,
            generated_voice_id = %generated_voice_id,
            preview_count = preview_count,
            latency_ms = start_time.elapsed().as_millis() as u64,
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            generation_id: None,
            audio_ref,
        })
    }
}
