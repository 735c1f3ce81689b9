use super::model::ArenaRound;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Rounds live as long as their audio files
pub const DEFAULT_ROUND_TTL: Duration = Duration::from_secs(30 * 60);

const MAX_OPEN_ROUNDS: u64 = 10_000;

/// A synthesized round held server-side until it expires
#[derive(Debug)]
pub struct OpenRound {
    pub round: ArenaRound,
    voted: AtomicBool,
}

impl OpenRound {
    fn new(round: ArenaRound) -> Self {
        Self {
            round,
            voted: AtomicBool::new(false),
        }
    }

    /// True for exactly one caller per round
    pub fn claim_vote(&self) -> bool {
        !self.voted.swap(true, Ordering::AcqRel)
    }

    pub fn is_voted(&self) -> bool {
        self.voted.load(Ordering::Acquire)
    }
}

/// Provider assignments of open rounds, keyed by round id.
///
/// Clients only ever see the round id and audio references, so a vote can
/// only be cast for a round this process synthesized.
#[derive(Clone)]
pub struct RoundStore {
    rounds: Cache<Uuid, Arc<OpenRound>>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_ROUND_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            rounds: Cache::builder()
                .max_capacity(MAX_OPEN_ROUNDS)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn open(&self, round: ArenaRound) -> Uuid {
        let round_id = Uuid::new_v4();
        self.rounds
            .insert(round_id, Arc::new(OpenRound::new(round)))
            .await;

        tracing::debug!(round_id = %round_id, "Round opened");
        round_id
    }

    pub async fn get(&self, round_id: &Uuid) -> Option<Arc<OpenRound>> {
        self.rounds.get(round_id).await
    }
}

impl Default for RoundStore {
    fn default() -> Self {
        Self::new()
    }
}
