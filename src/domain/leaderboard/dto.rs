use super::model::LeaderboardSnapshot;
use serde::{Deserialize, Serialize};

/// Query for GET /api/leaderboard
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub force: bool,
}

/// Response for GET /api/leaderboard
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub snapshot: LeaderboardSnapshot,
    /// Whether this request recomputed the statistics
    pub updated: bool,
}
