use super::cache::{is_stale, CacheEntry};
use super::model::{BattleCount, LeaderboardEntry, LeaderboardSnapshot, PairwiseWinRate, VoteTally};
use super::stats;
use crate::infrastructure::db::{SessionFactory, StorageSession};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::time::Duration;

pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The cached snapshot is younger than the minimum interval
    Throttled,
    /// Recomputed, but identical to the cached snapshot
    Unchanged,
    Updated(LeaderboardSnapshot),
}

pub struct LeaderboardService {
    sessions: SessionFactory,
    cache: RwLock<Option<CacheEntry<LeaderboardSnapshot>>>,
    min_refresh_interval: Duration,
}

impl LeaderboardService {
    pub fn new(sessions: SessionFactory, min_refresh_interval: Duration) -> Self {
        Self {
            sessions,
            cache: RwLock::new(None),
            min_refresh_interval,
        }
    }
}

#[async_trait]
pub trait LeaderboardServiceApi: Send + Sync {
    /// Ranked providers; the 3-row placeholder when there is no data
    async fn get_leaderboard(&self) -> Vec<LeaderboardEntry>;

    /// Votes per head-to-head pair, zero-filled
    async fn get_battle_counts(&self) -> Vec<BattleCount>;

    /// Win share per head-to-head pair, zero-filled
    async fn get_win_rates(&self) -> Vec<PairwiseWinRate>;

    /// Recompute all views unless throttled. `force` bypasses both the
    /// staleness check and the unchanged-checksum check.
    async fn refresh(&self, force: bool) -> RefreshOutcome;

    fn cached_snapshot(&self) -> Option<LeaderboardSnapshot>;
}

#[async_trait]
impl LeaderboardServiceApi for LeaderboardService {
    async fn get_leaderboard(&self) -> Vec<LeaderboardEntry> {
        match self.load_tallies("leaderboard").await {
            Some(tallies) => stats::rank_providers(&tallies),
            None => stats::placeholder_leaderboard(),
        }
    }

    async fn get_battle_counts(&self) -> Vec<BattleCount> {
        let tallies = self.load_tallies("battle_counts").await.unwrap_or_default();
        stats::battle_counts(&tallies)
    }

    async fn get_win_rates(&self) -> Vec<PairwiseWinRate> {
        let tallies = self.load_tallies("win_rates").await.unwrap_or_default();
        stats::win_rates(&tallies)
    }

    async fn refresh(&self, force: bool) -> RefreshOutcome {
        let now = Utc::now();

        let stale = {
            let cache = self.cache.read();
            is_stale(cache.as_ref(), now, self.min_refresh_interval)
        };
        if !force && !stale {
            tracing::debug!("Leaderboard refresh throttled");
            return RefreshOutcome::Throttled;
        }

        let snapshot = LeaderboardSnapshot {
            leaderboard: self.get_leaderboard().await,
            battle_counts: self.get_battle_counts().await,
            win_rates: self.get_win_rates().await,
        };

        self.store(CacheEntry::new(snapshot, now), force)
    }

    fn cached_snapshot(&self) -> Option<LeaderboardSnapshot> {
        self.cache.read().as_ref().map(|entry| entry.data.clone())
    }
}

impl LeaderboardService {
    /// One independent storage read per view; `None` means fall back to defaults
    async fn load_tallies(&self, view: &'static str) -> Option<Vec<VoteTally>> {
        match self.sessions.open() {
            StorageSession::Null => {
                tracing::debug!(view = view, "No database configured, using default statistics");
                None
            }
            StorageSession::Real(repo) => match repo.tally_votes().await {
                Ok(tallies) => Some(tallies),
                Err(e) => {
                    tracing::error!(error = %e, view = view, "Failed to read vote statistics");
                    None
                }
            },
        }
    }

    fn store(&self, entry: CacheEntry<LeaderboardSnapshot>, force: bool) -> RefreshOutcome {
        let mut cache = self.cache.write();
        let unchanged = cache
            .as_ref()
            .map(|current| current.checksum == entry.checksum)
            .unwrap_or(false);

        if unchanged && !force {
            tracing::debug!(checksum = %entry.checksum, "Leaderboard unchanged");
            if let Some(current) = cache.as_mut() {
                current.computed_at = entry.computed_at;
            }
            return RefreshOutcome::Unchanged;
        }

        tracing::debug!(checksum = %entry.checksum, forced = force, "Leaderboard updated");
        let snapshot = entry.data.clone();
        *cache = Some(entry);
        RefreshOutcome::Updated(snapshot)
    }
}
