use crate::domain::provider::{ComparisonCategory, ProviderIdentity};
use serde::{Deserialize, Serialize};

/// Number of votes won by a provider within one comparison category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub category: ComparisonCategory,
    pub winning_provider: ProviderIdentity,
    pub votes: i64,
}

/// One row of the ranked leaderboard. Placeholder rows have no provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub provider: Option<ProviderIdentity>,
    pub model: Option<String>,
    pub provider_link: Option<String>,
    pub model_link: Option<String>,
    pub win_rate: f64,
    pub total_wins: i64,
    pub total_comparisons: i64,
}

impl LeaderboardEntry {
    pub fn for_provider(
        provider: ProviderIdentity,
        total_wins: i64,
        total_comparisons: i64,
        win_rate: f64,
    ) -> Self {
        Self {
            rank: 0,
            provider: Some(provider),
            model: Some(provider.model_name().to_string()),
            provider_link: Some(provider.provider_link().to_string()),
            model_link: Some(provider.model_link().to_string()),
            win_rate,
            total_wins,
            total_comparisons,
        }
    }

    pub fn placeholder(rank: usize) -> Self {
        Self {
            rank,
            provider: None,
            model: None,
            provider_link: None,
            model_link: None,
            win_rate: 0.0,
            total_wins: 0,
            total_comparisons: 0,
        }
    }

    pub fn win_rate_label(&self) -> String {
        format_percent(self.win_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCount {
    pub comparison_type: ComparisonCategory,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseWinRate {
    pub comparison_type: ComparisonCategory,
    pub first_provider: ProviderIdentity,
    pub second_provider: ProviderIdentity,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub total: i64,
}

impl PairwiseWinRate {
    pub fn first_win_rate_label(&self) -> String {
        format_percent(self.first_win_rate)
    }

    pub fn second_win_rate_label(&self) -> String {
        format_percent(self.second_win_rate)
    }
}

/// All three statistics views computed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub battle_counts: Vec<BattleCount>,
    pub win_rates: Vec<PairwiseWinRate>,
}

impl Default for LeaderboardSnapshot {
    fn default() -> Self {
        Self {
            leaderboard: super::stats::placeholder_leaderboard(),
            battle_counts: super::stats::battle_counts(&[]),
            win_rates: super::stats::win_rates(&[]),
        }
    }
}

/// "66.67%", "50%", "0%"
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}
