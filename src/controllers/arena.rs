use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::synthesis::dto::{GenerateTextRequest, GenerateTextResponse, SynthesizeRequest};
use crate::domain::voting::dto::{RoundView, VoteRequest, VoteResponse, VoteResult};
use crate::{
    domain::{
        synthesis::{SynthesisService, SynthesisServiceApi},
        text::{TextService, TextServiceApi},
        voting::{ArenaRound, VoteOutcome, VotingService},
    },
    error::{AppError, AppResult},
};

pub struct ArenaController {
    text_service: Arc<TextService>,
    synthesis_service: Arc<SynthesisService>,
    voting_service: Arc<VotingService>,
}

impl ArenaController {
    pub fn new(
        text_service: Arc<TextService>,
        synthesis_service: Arc<SynthesisService>,
        voting_service: Arc<VotingService>,
    ) -> Self {
        Self {
            text_service,
            synthesis_service,
            voting_service,
        }
    }

    /// POST /api/text - Generate text for a character description
    pub async fn generate_text(
        State(controller): State<Arc<ArenaController>>,
        Json(request): Json<GenerateTextRequest>,
    ) -> AppResult<Json<GenerateTextResponse>> {
        let text = controller
            .text_service
            .generate_text(&request.character_description)
            .await?;
        Ok(Json(GenerateTextResponse { text }))
    }

    /// POST /api/synthesize - Start a new comparison round
    ///
    /// Providers stay server-side until the round is voted on.
    pub async fn synthesize(
        State(controller): State<Arc<ArenaController>>,
        Json(request): Json<SynthesizeRequest>,
    ) -> AppResult<Json<RoundView>> {
        let text_modified = request.text_modified();
        let pair = controller
            .synthesis_service
            .synthesize(&request.character_description, &request.text, text_modified)
            .await?;

        let round = ArenaRound::new(
            pair,
            request.character_description,
            request.text,
            text_modified,
        );
        let round_id = controller.voting_service.open_round(round.clone()).await;

        Ok(Json(RoundView::new(round_id, &round, false)))
    }

    /// POST /api/votes - Vote for one option of a round
    pub async fn vote(
        State(controller): State<Arc<ArenaController>>,
        Json(request): Json<VoteRequest>,
    ) -> AppResult<Json<VoteResponse>> {
        let outcome = controller
            .voting_service
            .cast_vote(
                request.round_id,
                request.selected_option,
                request.vote_submitted,
            )
            .await;

        let response = match outcome {
            VoteOutcome::Accepted {
                round,
                winning_provider,
                losing_provider,
                winning_option,
                ..
            } => VoteResponse {
                accepted: true,
                round: RoundView::new(request.round_id, &round, true),
                result: Some(VoteResult {
                    winning_provider,
                    losing_provider,
                    winning_option,
                }),
            },
            VoteOutcome::AlreadyVoted { round } => VoteResponse {
                accepted: false,
                round: RoundView::new(request.round_id, &round, true),
                result: None,
            },
            VoteOutcome::UnknownRound => {
                return Err(AppError::NotFound(
                    "This round has expired. Please synthesize a new one.".to_string(),
                ))
            }
        };

        Ok(Json(response))
    }
}
