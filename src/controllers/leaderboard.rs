use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::domain::leaderboard::dto::{LeaderboardQuery, LeaderboardResponse};
use crate::domain::leaderboard::{LeaderboardService, LeaderboardServiceApi, RefreshOutcome};

pub struct LeaderboardController {
    leaderboard_service: Arc<LeaderboardService>,
}

impl LeaderboardController {
    pub fn new(leaderboard_service: Arc<LeaderboardService>) -> Self {
        Self { leaderboard_service }
    }

    /// GET /api/leaderboard - Current statistics, recomputed at most once per refresh interval
    pub async fn get_leaderboard(
        State(controller): State<Arc<LeaderboardController>>,
        Query(query): Query<LeaderboardQuery>,
    ) -> Json<LeaderboardResponse> {
        let service = &controller.leaderboard_service;

        let response = match service.refresh(query.force).await {
            RefreshOutcome::Updated(snapshot) => LeaderboardResponse {
                snapshot,
                updated: true,
            },
            RefreshOutcome::Unchanged | RefreshOutcome::Throttled => LeaderboardResponse {
                snapshot: service.cached_snapshot().unwrap_or_default(),
                updated: false,
            },
        };

        Json(response)
    }
}
