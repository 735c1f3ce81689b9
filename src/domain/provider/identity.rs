use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text-to-speech vendors competing in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderIdentity {
    #[serde(rename = "Hume AI")]
    HumeAi,
    #[serde(rename = "OpenAI")]
    OpenAi,
    #[serde(rename = "ElevenLabs")]
    ElevenLabs,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown TTS provider: {0}")]
pub struct UnknownProvider(pub String);

impl ProviderIdentity {
    /// Every known provider, in the order used for tie-breaks and head-to-head tables
    pub const ALL: [ProviderIdentity; 3] = [
        ProviderIdentity::HumeAi,
        ProviderIdentity::OpenAi,
        ProviderIdentity::ElevenLabs,
    ];

    /// Display name, also the value persisted in `vote_results`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderIdentity::HumeAi => "Hume AI",
            ProviderIdentity::OpenAi => "OpenAI",
            ProviderIdentity::ElevenLabs => "ElevenLabs",
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            ProviderIdentity::HumeAi => "Octave",
            ProviderIdentity::OpenAi => "gpt-4o-mini-tts",
            ProviderIdentity::ElevenLabs => "Voice Design",
        }
    }

    pub fn provider_link(&self) -> &'static str {
        match self {
            ProviderIdentity::HumeAi => "https://hume.ai/",
            ProviderIdentity::OpenAi => "https://openai.com/",
            ProviderIdentity::ElevenLabs => "https://elevenlabs.io/",
        }
    }

    pub fn model_link(&self) -> &'static str {
        match self {
            ProviderIdentity::HumeAi => {
                "https://www.hume.ai/blog/octave-the-first-text-to-speech-model-that-understands-what-its-saying"
            }
            ProviderIdentity::OpenAi => "https://platform.openai.com/docs/models/gpt-4o-mini-tts",
            ProviderIdentity::ElevenLabs => "https://elevenlabs.io/blog/rvg",
        }
    }
}

impl std::fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderIdentity {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderIdentity::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
