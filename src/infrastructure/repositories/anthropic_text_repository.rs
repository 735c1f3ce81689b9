use super::api_error::{error_from_response, ExternalApiError};
use super::text_generation_repository::TextGenerationRepository;
use crate::infrastructure::retry::RetryPolicy;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";
const MAX_TOKENS: u32 = 300;

const ANTHROPIC_RETRY_POLICY: RetryPolicy = RetryPolicy::exponential(
    3,
    Duration::from_secs(2),
    Duration::from_secs(5),
    Duration::from_secs(30),
);

const SYSTEM_PROMPT: &str = "You write short lines of dialogue that will be read aloud by a \
text-to-speech engine. Write between 10 and 50 words as one complete thought with a clear \
beginning and end. Sound human, conversational and emotionally expressive, with a small \
emotional arc. Use only periods, question marks and ellipses for punctuation; use ellipses \
for pauses. Never use newlines, quotation marks, parentheticals or asterisks. Avoid rare or \
hard to pronounce words and avoid trailing filler such as \"hm?\" or \"oh\".";

fn build_prompt(character_description: &str) -> String {
    format!(
        "Character description: {character_description}\n\n\
         Write one line this character would naturally say, in their own voice, capturing \
         their personality and emotional state. Follow every rule from the system prompt and \
         reply with the line only."
    )
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Claude messages API used to generate arena text
pub struct AnthropicTextRepository {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl AnthropicTextRepository {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: ANTHROPIC_API_BASE_URL.to_string(),
            retry: ANTHROPIC_RETRY_POLICY,
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

    async fn call_claude(&self, prompt: &str) -> Result<String, ExternalApiError> {
        let request = MessagesRequest {
            model: ANTHROPIC_MODEL,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &["/error/message"]).await);
        }

        let body: MessagesResponse = response.json().await?;
        let text = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.trim().is_empty() {
            tracing::error!("Anthropic response contained no text blocks");
            return Err(ExternalApiError::transient());
        }
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TextGenerationRepository for AnthropicTextRepository {
    async fn generate_text(&self, character_description: &str) -> Result<String, ExternalApiError> {
        let start_time = std::time::Instant::now();
        let prompt = build_prompt(character_description);

        let text = self
            .retry
            .run("anthropic_generate_text", || self.call_claude(&prompt))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Anthropic text generation failed");
                e
            })?;

        tracing::info!(
            model = ANTHROPIC_MODEL,
            latency_ms = start_time.elapsed().as_millis() as u64,
            text_length = text.len(),
            "Text generated"
        );

        Ok(text)
    }
}
