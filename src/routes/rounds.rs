//! Round routes: the live board, score submission, manual completion, and
//! scorecard OCR.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::{
        round::{CompleteRoundResponse, RoundBoard, SubmitScoreRequest, SubmitScoreResponse},
        scorecard::{ParseScorecardRequest, ParseScorecardResponse},
    },
    error::AppError,
    routes::identity::CurrentUser,
    services::round_service,
    state::SharedState,
};

/// Routes handling round play.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/rounds/{id}", get(round_board))
        .route("/rounds/{id}/scores", post(submit_score))
        .route("/rounds/{id}/complete", post(complete_round))
        .route("/scorecards/parse", post(parse_scorecard))
}

/// Live (or final) leaderboard for a round.
#[utoipa::path(
    get,
    path = "/rounds/{id}",
    tag = "rounds",
    params(("id" = Uuid, Path, description = "Round identifier")),
    responses((status = 200, description = "Round board", body = RoundBoard))
)]
pub async fn round_board(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RoundBoard>, AppError> {
    let board = round_service::round_board(&state, id, user).await?;
    Ok(Json(board))
}

/// Submit (or resubmit) the caller's score for an active round. When this is
/// the last expected score, the round completes as a side effect.
#[utoipa::path(
    post,
    path = "/rounds/{id}/scores",
    tag = "rounds",
    params(("id" = Uuid, Path, description = "Round identifier")),
    request_body = SubmitScoreRequest,
    responses((status = 200, description = "Score stored", body = SubmitScoreResponse))
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<SubmitScoreRequest>>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let response = round_service::submit_score(&state, id, user, payload).await?;
    Ok(Json(response))
}

/// Manually finalize a round (league owner only). Safe to call on an
/// already-completed round.
#[utoipa::path(
    post,
    path = "/rounds/{id}/complete",
    tag = "rounds",
    params(("id" = Uuid, Path, description = "Round identifier")),
    responses((status = 200, description = "Round completed", body = CompleteRoundResponse))
)]
pub async fn complete_round(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CompleteRoundResponse>, AppError> {
    let response = round_service::complete_round_as(&state, id, user).await?;
    Ok(Json(response))
}

/// Read a gross score off a captured scorecard. A failed read is a normal
/// response; the client falls back to manual entry.
#[utoipa::path(
    post,
    path = "/scorecards/parse",
    tag = "scorecards",
    request_body = ParseScorecardRequest,
    responses((status = 200, description = "Extraction outcome", body = ParseScorecardResponse))
)]
pub async fn parse_scorecard(
    State(state): State<SharedState>,
    CurrentUser(_user): CurrentUser,
    Valid(Json(payload)): Valid<Json<ParseScorecardRequest>>,
) -> Json<ParseScorecardResponse> {
    let verdict = state
        .scorecards()
        .extract_score(&payload.image_base64, &payload.player_name)
        .await;
    Json(verdict)
}
