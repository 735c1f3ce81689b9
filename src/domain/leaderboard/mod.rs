pub mod cache;
pub mod dto;
pub mod model;
pub mod service;
pub mod stats;

pub use cache::{checksum_of, is_stale, CacheEntry};
pub use model::{BattleCount, LeaderboardEntry, LeaderboardSnapshot, PairwiseWinRate, VoteTally};
pub use service::{LeaderboardService, LeaderboardServiceApi, RefreshOutcome};
