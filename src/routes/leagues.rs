//! League management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::league::{
        CreateLeagueRequest, CreateTeamRequest, HandicapRequest, JoinLeagueRequest,
        LeagueOverview, LeagueSummary, MemberSummary, TeamHandicapRequest, TeamSummary,
    },
    error::AppError,
    routes::identity::CurrentUser,
    services::league_service,
    state::SharedState,
};

/// Routes handling league, handicap, and team management.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leagues", post(create_league))
        .route("/leagues/join", post(join_league))
        .route("/leagues/{id}", get(league_overview))
        .route("/leagues/{id}/handicaps/{user_id}", put(set_handicap))
        .route("/leagues/{id}/teams", post(create_team))
        .route("/teams/{id}", delete(delete_team))
        .route("/teams/{id}/handicap", put(set_team_handicap))
}

/// Create a league owned by the caller.
#[utoipa::path(
    post,
    path = "/leagues",
    tag = "leagues",
    request_body = CreateLeagueRequest,
    responses((status = 200, description = "League created", body = LeagueSummary))
)]
pub async fn create_league(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(payload)): Valid<Json<CreateLeagueRequest>>,
) -> Result<Json<LeagueSummary>, AppError> {
    let summary = league_service::create_league(&state, user, payload).await?;
    Ok(Json(summary))
}

/// Join a league by invite code.
#[utoipa::path(
    post,
    path = "/leagues/join",
    tag = "leagues",
    request_body = JoinLeagueRequest,
    responses((status = 200, description = "Joined", body = LeagueSummary))
)]
pub async fn join_league(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(payload)): Valid<Json<JoinLeagueRequest>>,
) -> Result<Json<LeagueSummary>, AppError> {
    let summary = league_service::join_league(&state, user, payload).await?;
    Ok(Json(summary))
}

/// Full league view: members, teams, handicaps, and the active season.
#[utoipa::path(
    get,
    path = "/leagues/{id}",
    tag = "leagues",
    params(("id" = Uuid, Path, description = "League identifier")),
    responses((status = 200, description = "League overview", body = LeagueOverview))
)]
pub async fn league_overview(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LeagueOverview>, AppError> {
    let overview = league_service::league_overview(&state, id, user).await?;
    Ok(Json(overview))
}

/// Set a member's handicap (league owner only).
#[utoipa::path(
    put,
    path = "/leagues/{id}/handicaps/{user_id}",
    tag = "leagues",
    params(
        ("id" = Uuid, Path, description = "League identifier"),
        ("user_id" = Uuid, Path, description = "Member whose handicap changes"),
    ),
    request_body = HandicapRequest,
    responses((status = 200, description = "Handicap updated", body = MemberSummary))
)]
pub async fn set_handicap(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    Valid(Json(payload)): Valid<Json<HandicapRequest>>,
) -> Result<Json<MemberSummary>, AppError> {
    let summary =
        league_service::set_handicap(&state, id, user_id, user, payload.strokes).await?;
    Ok(Json(summary))
}

/// Create a scramble team (league owner only).
#[utoipa::path(
    post,
    path = "/leagues/{id}/teams",
    tag = "leagues",
    params(("id" = Uuid, Path, description = "League identifier")),
    request_body = CreateTeamRequest,
    responses((status = 200, description = "Team created", body = TeamSummary))
)]
pub async fn create_team(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<Json<TeamSummary>, AppError> {
    let summary = league_service::create_team(&state, id, user, payload).await?;
    Ok(Json(summary))
}

/// Delete a team (league owner only).
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "leagues",
    params(("id" = Uuid, Path, description = "Team identifier")),
    responses((status = 200, description = "Team deleted"))
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<(), AppError> {
    league_service::delete_team(&state, id, user).await?;
    Ok(())
}

/// Set a team's handicap (league owner only).
#[utoipa::path(
    put,
    path = "/teams/{id}/handicap",
    tag = "leagues",
    params(("id" = Uuid, Path, description = "Team identifier")),
    request_body = TeamHandicapRequest,
    responses((status = 200, description = "Team handicap updated", body = TeamSummary))
)]
pub async fn set_team_handicap(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<TeamHandicapRequest>>,
) -> Result<Json<TeamSummary>, AppError> {
    let summary = league_service::set_team_handicap(&state, id, user, payload.strokes).await?;
    Ok(Json(summary))
}
