pub mod dto;
pub mod model;
pub mod rounds;
pub mod service;

pub use model::{ArenaRound, NewVote, VoteOutcome, VoteRecord};
pub use rounds::{OpenRound, RoundStore};
pub use service::{VotingService, VotingServiceApi};
