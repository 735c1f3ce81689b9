use super::model::{ArenaRound, NewVote, VoteOutcome};
use super::rounds::RoundStore;
use crate::domain::synthesis::{ComparisonPair, OptionSlot};
use crate::infrastructure::db::{SessionFactory, StorageSession};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct VotingService {
    sessions: SessionFactory,
    rounds: RoundStore,
}

impl VotingService {
    pub fn new(sessions: SessionFactory) -> Self {
        Self::with_round_store(sessions, RoundStore::new())
    }

    pub fn with_round_store(sessions: SessionFactory, rounds: RoundStore) -> Self {
        Self { sessions, rounds }
    }
}

#[async_trait]
pub trait VotingServiceApi: Send + Sync {
    /// Record a vote, best effort.
    ///
    /// Never fails: invalid provider pairs and storage errors are logged and
    /// the vote is dropped. Without a storage backend the vote is only logged.
    async fn submit_vote(
        &self,
        pair: &ComparisonPair,
        winning_option: OptionSlot,
        text_modified: bool,
        character_description: &str,
        text: &str,
    );
}

#[async_trait]
impl VotingServiceApi for VotingService {
    async fn submit_vote(
        &self,
        pair: &ComparisonPair,
        winning_option: OptionSlot,
        text_modified: bool,
        character_description: &str,
        text: &str,
    ) {
        let vote = match NewVote::from_selection(
            pair,
            winning_option,
            text_modified,
            character_description,
            text,
        ) {
            Ok(vote) => vote,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    option_a_provider = %pair.option_a.provider,
                    option_b_provider = %pair.option_b.provider,
                    "Dropping vote with invalid provider pair"
                );
                return;
            }
        };

        match self.sessions.open() {
            StorageSession::Null => {
                let details =
                    serde_json::to_string_pretty(&vote).unwrap_or_else(|_| format!("{vote:?}"));
                tracing::info!(
                    comparison_type = %vote.comparison_type,
                    winning_provider = %vote.winning_provider,
                    vote = %details,
                    "No database configured, vote not persisted"
                );
            }
            StorageSession::Real(repo) => match repo.create_vote(&vote).await {
                Ok(record) => tracing::info!(
                    vote_id = record.id,
                    comparison_type = %vote.comparison_type,
                    winning_provider = %vote.winning_provider,
                    is_custom_text = vote.is_custom_text,
                    "Vote recorded"
                ),
                Err(e) => tracing::error!(
                    error = %e,
                    comparison_type = %vote.comparison_type,
                    winning_provider = %vote.winning_provider,
                    option_a_provider = %vote.option_a_provider,
                    option_b_provider = %vote.option_b_provider,
                    "Failed to persist vote"
                ),
            },
        }
    }
}

impl VotingService {
    /// Remember a freshly synthesized round so it can be voted on later
    pub async fn open_round(&self, round: ArenaRound) -> Uuid {
        self.rounds.open(round).await
    }

    /// Accept a vote for the round `round_id` at most once.
    ///
    /// Providers are resolved from the stored round, never from the caller.
    /// Persistence runs in a background task, so the caller never waits on storage.
    pub async fn cast_vote(
        self: &Arc<Self>,
        round_id: Uuid,
        selected: OptionSlot,
        caller_already_voted: bool,
    ) -> VoteOutcome {
        let Some(open) = self.rounds.get(&round_id).await else {
            tracing::warn!(round_id = %round_id, "Vote for unknown or expired round");
            return VoteOutcome::UnknownRound;
        };

        if caller_already_voted || !open.claim_vote() {
            tracing::debug!(
                round_id = %round_id,
                "Vote already submitted for this round, ignoring"
            );
            return VoteOutcome::AlreadyVoted {
                round: open.round.clone(),
            };
        }

        let round = open.round.clone();
        let winning_provider = round.pair.option(selected).provider;
        let losing_provider = round.pair.option(selected.other()).provider;

        let service = Arc::clone(self);
        let persisted = round.clone();
        let persistence = tokio::spawn(async move {
            service
                .submit_vote(
                    &persisted.pair,
                    selected,
                    persisted.text_modified,
                    &persisted.character_description,
                    &persisted.text,
                )
                .await;
        });

        VoteOutcome::Accepted {
            round,
            winning_provider,
            losing_provider,
            winning_option: selected,
            persistence,
        }
    }
}
