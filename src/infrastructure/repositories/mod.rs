pub mod anthropic_text_repository;
pub mod api_error;
pub mod elevenlabs_tts_repository;
pub mod hume_tts_repository;
pub mod openai_tts_repository;
pub mod text_generation_repository;
pub mod tts_repository;
pub mod vote_repository;

pub use anthropic_text_repository::AnthropicTextRepository;
pub use api_error::ExternalApiError;
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use hume_tts_repository::HumeTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use text_generation_repository::TextGenerationRepository;
pub use tts_repository::{SynthesizedAudio, TtsRepository};
pub use vote_repository::{PgVoteRepository, VoteRepository};
