pub mod leaderboard;
pub mod provider;
pub mod shared;
pub mod synthesis;
pub mod text;
pub mod voting;
