use crate::domain::leaderboard::VoteTally;
use crate::domain::provider::{ComparisonCategory, ProviderIdentity};
use crate::domain::voting::{NewVote, VoteRecord};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Append-only vote storage
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert one vote inside a transaction
    async fn create_vote(&self, vote: &NewVote) -> AppResult<VoteRecord>;

    /// Vote counts grouped by comparison type and winning provider
    async fn tally_votes(&self) -> AppResult<Vec<VoteTally>>;
}

pub struct PgVoteRepository {
    pool: Arc<DbPool>,
}

impl PgVoteRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    async fn create_vote(&self, vote: &NewVote) -> AppResult<VoteRecord> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, (i32, DateTime<Utc>)>(
            r#"
            INSERT INTO vote_results (
                comparison_type, winning_provider, winning_option,
                option_a_provider, option_b_provider,
                option_a_generation_id, option_b_generation_id,
                voice_description, text, is_custom_text
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, created_at
            "#,
        )
        .bind(vote.comparison_type.label())
        .bind(vote.winning_provider.as_str())
        .bind(vote.winning_option.as_str())
        .bind(vote.option_a_provider.as_str())
        .bind(vote.option_b_provider.as_str())
        .bind(vote.option_a_generation_id.as_deref())
        .bind(vote.option_b_generation_id.as_deref())
        .bind(&vote.voice_description)
        .bind(&vote.text)
        .bind(vote.is_custom_text)
        .fetch_one(&mut *tx)
        .await;

        let (id, created_at) = match inserted {
            Ok(row) => row,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Vote insert rollback failed");
                }
                return Err(e.into());
            }
        };

        tx.commit().await?;

        Ok(VoteRecord {
            id,
            created_at,
            vote: vote.clone(),
        })
    }

    async fn tally_votes(&self) -> AppResult<Vec<VoteTally>> {
        let rows = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT comparison_type, winning_provider, COUNT(*)
            FROM vote_results
            GROUP BY comparison_type, winning_provider
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let tallies = rows
            .into_iter()
            .filter_map(|(comparison_type, winning_provider, votes)| {
                let category = comparison_type.parse::<ComparisonCategory>();
                let winner = winning_provider.parse::<ProviderIdentity>();
                match (category, winner) {
                    (Ok(category), Ok(winning_provider)) => Some(VoteTally {
                        category,
                        winning_provider,
                        votes,
                    }),
                    _ => {
                        tracing::warn!(
                            comparison_type = %comparison_type,
                            winning_provider = %winning_provider,
                            votes = votes,
                            "Skipping votes with unrecognized comparison type or provider"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(tallies)
    }
}
