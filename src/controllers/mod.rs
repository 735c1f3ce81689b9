pub mod arena;
pub mod health;
pub mod leaderboard;
