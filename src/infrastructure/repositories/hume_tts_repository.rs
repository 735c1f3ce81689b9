use super::api_error::{error_from_response, ExternalApiError};
use super::tts_repository::{SynthesizedAudio, TtsRepository};
use crate::domain::provider::ProviderIdentity;
use crate::infrastructure::audio::AudioStore;
use crate::infrastructure::retry::RetryPolicy;
use async_trait::async_trait;
use base64::Engine;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const HUME_API_BASE_URL: &str = "https://api.hume.ai";
const RATE_LIMIT_MESSAGE: &str =
    "We're working on scaling capacity. Please try again in a few seconds.";

const HUME_RETRY_POLICY: RetryPolicy =
    RetryPolicy::fixed(2, Duration::from_secs(2), Duration::from_secs(40));

#[derive(Serialize)]
struct HumeTtsRequest<'a> {
    utterances: [HumeUtterance<'a>; 1],
    format: HumeFormat,
}

#[derive(Serialize)]
struct HumeUtterance<'a> {
    text: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct HumeFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct HumeTtsResponse {
    #[serde(default)]
    generations: Vec<HumeGeneration>,
}

#[derive(Deserialize)]
struct HumeGeneration {
    generation_id: String,
    audio: String,
}

/// Hume Octave TTS over the REST API
pub struct HumeTtsRepository {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    audio_store: Arc<AudioStore>,
    retry: RetryPolicy,
}

impl HumeTtsRepository {
    pub fn new(client: reqwest::Client, api_key: String, audio_store: Arc<AudioStore>) -> Self {
        Self {
            client,
            api_key,
            base_url: HUME_API_BASE_URL.to_string(),
            audio_store,
            retry: HUME_RETRY_POLICY,
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

    async fn call_hume(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<HumeGeneration, ExternalApiError> {
        let request = HumeTtsRequest {
            utterances: [HumeUtterance {
                text,
                description: voice_description,
            }],
            format: HumeFormat { kind: "mp3" },
        };

        let response = self
            .client
            .post(format!("{}/v0/tts", self.base_url))
            .header("X-Hume-Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ExternalApiError::RateLimited(RATE_LIMIT_MESSAGE.to_string()));
        }
        if !response.status().is_success() {
            return Err(error_from_response(response, &["/message"]).await);
        }

        let body: HumeTtsResponse = response.json().await?;
        body.generations.into_iter().next().ok_or_else(|| {
            tracing::error!("Hume API returned no generations");
            ExternalApiError::transient()
        })
    }
}

#[async_trait]
impl TtsRepository for HumeTtsRepository {
    async fn synthesize(
        &self,
        voice_description: &str,
        text: &str,
    ) -> Result<SynthesizedAudio, ExternalApiError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            provider = %ProviderIdentity::HumeAi,
            description_length = voice_description.len(),
            text_length = text.len(),
            "Starting Hume TTS synthesis"
        );

        let generation = self
            .retry
            .run("hume_tts", || self.call_hume(voice_description, text))
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = %ProviderIdentity::HumeAi,
                    error = %e,
                    "Hume TTS failed"
                );
                e
            })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(generation.audio.as_bytes())
            .map_err(|e| {
                tracing::error!(error = %e, "Hume returned undecodable audio");
                ExternalApiError::transient()
            })?;

        let audio_ref = self
            .audio_store
            .save(ProviderIdentity::HumeAi, &audio)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store Hume audio");
                ExternalApiError::transient()
            })?;

        tracing::info!(
            provider = %ProviderIdentity::HumeAi,
            generation_id = %generation.generation_id,
            latency_ms = start_time.elapsed().as_millis() as u64,
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            generation_id: Some(generation.generation_id),
            audio_ref,
        })
    }
}
