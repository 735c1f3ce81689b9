//! Pure statistics over grouped vote tallies.

use super::model::{BattleCount, LeaderboardEntry, PairwiseWinRate, VoteTally};
use crate::domain::provider::{ComparisonCategory, ProviderIdentity};

const PLACEHOLDER_ROWS: usize = 3;

/// Percentage rounded to two decimals; 0 when `whole` is 0
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 100.0 / whole as f64 * 100.0).round() / 100.0
}

/// Fixed-shape table shown when there is no data
pub fn placeholder_leaderboard() -> Vec<LeaderboardEntry> {
    (1..=PLACEHOLDER_ROWS).map(LeaderboardEntry::placeholder).collect()
}

/// Rank providers by win rate over comparisons against a different provider.
/// Ties are broken by total wins, then by canonical provider order.
pub fn rank_providers(tallies: &[VoteTally]) -> Vec<LeaderboardEntry> {
    if tallies.is_empty() {
        return placeholder_leaderboard();
    }

    let mut entries: Vec<LeaderboardEntry> = ProviderIdentity::ALL
        .into_iter()
        .map(|provider| {
            let head_to_head = tallies.iter().filter(|tally| {
                !tally.category.is_self_comparison() && tally.category.involves(provider)
            });

            let (wins, comparisons) = head_to_head.fold((0, 0), |(wins, comparisons), tally| {
                let won = if tally.winning_provider == provider { tally.votes } else { 0 };
                (wins + won, comparisons + tally.votes)
            });

            LeaderboardEntry::for_provider(
                provider,
                wins,
                comparisons,
                percentage(wins, comparisons),
            )
        })
        .collect();

    // Stable sort keeps canonical order among full ties
    entries.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.total_wins.cmp(&a.total_wins))
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    entries
}

fn votes_in(
    tallies: &[VoteTally],
    category: ComparisonCategory,
) -> impl Iterator<Item = &VoteTally> {
    tallies.iter().filter(move |tally| tally.category == category)
}

/// Votes per head-to-head category, zero-filled, sorted by label
pub fn battle_counts(tallies: &[VoteTally]) -> Vec<BattleCount> {
    ComparisonCategory::head_to_head()
        .into_iter()
        .map(|category| BattleCount {
            comparison_type: category,
            count: votes_in(tallies, category).map(|tally| tally.votes).sum(),
        })
        .collect()
}

/// Share of each head-to-head category won by each side, zero-filled, sorted by label
pub fn win_rates(tallies: &[VoteTally]) -> Vec<PairwiseWinRate> {
    ComparisonCategory::head_to_head()
        .into_iter()
        .map(|category| {
            let won_by = |provider: ProviderIdentity| -> i64 {
                votes_in(tallies, category)
                    .filter(|tally| tally.winning_provider == provider)
                    .map(|tally| tally.votes)
                    .sum()
            };
            let total: i64 = votes_in(tallies, category).map(|tally| tally.votes).sum();

            PairwiseWinRate {
                comparison_type: category,
                first_provider: category.first(),
                second_provider: category.second(),
                first_win_rate: percentage(won_by(category.first()), total),
                second_win_rate: percentage(won_by(category.second()), total),
                total,
            }
        })
        .collect()
}
