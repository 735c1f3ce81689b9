use super::model::ArenaRound;
use crate::domain::provider::ProviderIdentity;
use crate::domain::synthesis::{OptionSlot, SynthesisOption};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the listener sees of one option: the audio, never the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub audio_ref: String,
}

impl From<&SynthesisOption> for OptionView {
    fn from(option: &SynthesisOption) -> Self {
        Self {
            audio_ref: option.audio_ref.clone(),
        }
    }
}

/// Response for POST /api/synthesize, echoed back in vote responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub round_id: Uuid,
    pub option_a: OptionView,
    pub option_b: OptionView,
    pub character_description: String,
    pub text: String,
    pub text_modified: bool,
    pub vote_submitted: bool,
}

impl RoundView {
    pub fn new(round_id: Uuid, round: &ArenaRound, vote_submitted: bool) -> Self {
        Self {
            round_id,
            option_a: OptionView::from(&round.pair.option_a),
            option_b: OptionView::from(&round.pair.option_b),
            character_description: round.character_description.clone(),
            text: round.text.clone(),
            text_modified: round.text_modified,
            vote_submitted,
        }
    }
}

/// Request for POST /api/votes
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteRequest {
    pub round_id: Uuid,
    pub selected_option: OptionSlot,
    /// Set by clients that already voted on this round
    #[serde(default)]
    pub vote_submitted: bool,
}

/// Response for POST /api/votes
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    /// False when the round had already been voted on
    pub accepted: bool,
    pub round: RoundView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VoteResult>,
}

/// Providers revealed once the vote is in
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResult {
    pub winning_provider: ProviderIdentity,
    pub losing_provider: ProviderIdentity,
    pub winning_option: OptionSlot,
}
