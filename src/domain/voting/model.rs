use crate::domain::provider::{CategoryError, ComparisonCategory, ProviderIdentity};
use crate::domain::synthesis::{ComparisonPair, OptionSlot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// A vote ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVote {
    pub comparison_type: ComparisonCategory,
    pub winning_provider: ProviderIdentity,
    pub winning_option: OptionSlot,
    pub option_a_provider: ProviderIdentity,
    pub option_b_provider: ProviderIdentity,
    pub option_a_generation_id: Option<String>,
    pub option_b_generation_id: Option<String>,
    pub voice_description: String,
    pub text: String,
    pub is_custom_text: bool,
}

impl NewVote {
    /// Fails for provider pairs outside the known category table
    pub fn from_selection(
        pair: &ComparisonPair,
        winning_option: OptionSlot,
        text_modified: bool,
        character_description: &str,
        text: &str,
    ) -> Result<Self, CategoryError> {
        let comparison_type = pair.category()?;

        Ok(Self {
            comparison_type,
            winning_provider: pair.option(winning_option).provider,
            winning_option,
            option_a_provider: pair.option_a.provider,
            option_b_provider: pair.option_b.provider,
            option_a_generation_id: pair.option_a.generation_id.clone(),
            option_b_generation_id: pair.option_b.generation_id.clone(),
            voice_description: character_description.to_string(),
            text: text.to_string(),
            is_custom_text: text_modified,
        })
    }
}

/// A persisted vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub vote: NewVote,
}

/// One synthesized round as the server remembers it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaRound {
    pub pair: ComparisonPair,
    pub character_description: String,
    pub text: String,
    pub text_modified: bool,
}

impl ArenaRound {
    pub fn new(
        pair: ComparisonPair,
        character_description: impl Into<String>,
        text: impl Into<String>,
        text_modified: bool,
    ) -> Self {
        Self {
            pair,
            character_description: character_description.into(),
            text: text.into(),
            text_modified,
        }
    }
}

/// Result of casting a vote for a round
#[derive(Debug)]
pub enum VoteOutcome {
    Accepted {
        round: ArenaRound,
        winning_provider: ProviderIdentity,
        losing_provider: ProviderIdentity,
        winning_option: OptionSlot,
        /// Background persistence task; callers may ignore it
        persistence: JoinHandle<()>,
    },
    AlreadyVoted {
        round: ArenaRound,
    },
    /// Never synthesized here, or expired
    UnknownRound,
}
