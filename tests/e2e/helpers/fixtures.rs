use anyhow::Result;
use sqlx::PgPool;
use std::time::Duration;
use tts_arena_backend::domain::provider::{category_of, ProviderIdentity};

pub struct TestFixtures {
    pool: PgPool,
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert `count` votes where `winner` beat `loser`, winner shown as option A
    pub async fn record_wins(
        &self,
        winner: ProviderIdentity,
        loser: ProviderIdentity,
        count: usize,
    ) -> Result<()> {
        let category = category_of(winner, loser)?;

        for i in 0..count {
            sqlx::query(
                r#"
                INSERT INTO vote_results (
                    comparison_type, winning_provider, winning_option,
                    option_a_provider, option_b_provider,
                    option_a_generation_id, option_b_generation_id,
                    voice_description, text, is_custom_text
                )
                VALUES ($1, $2, 'option_a', $2, $3, NULL, NULL, $4, $5, false)
                "#,
            )
            .bind(category.label())
            .bind(winner.as_str())
            .bind(loser.as_str())
            .bind(format!("Fixture character number {}", i))
            .bind("Fixture text")
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn vote_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vote_results")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Votes are persisted in the background; poll until `expected` rows exist
    pub async fn wait_for_votes(&self, expected: i64) -> Result<i64> {
        let mut count = self.vote_count().await?;
        for _ in 0..50 {
            if count >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            count = self.vote_count().await?;
        }
        Ok(count)
    }

    /// (comparison_type, winning_provider, winning_option, is_custom_text) of the latest vote
    pub async fn latest_vote(&self) -> Result<Option<(String, String, String, bool)>> {
        let row = sqlx::query_as::<_, (String, String, String, bool)>(
            r#"
            SELECT comparison_type, winning_provider, winning_option, is_custom_text
            FROM vote_results
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
