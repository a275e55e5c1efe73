//! Season routes: starting, closing, and the standings table.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::season::{SeasonStartResponse, SeasonSummary, StandingsTable},
    error::AppError,
    routes::identity::CurrentUser,
    services::season_service,
    state::SharedState,
};

/// Routes handling season lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leagues/{id}/seasons", post(start_season))
        .route("/seasons/{id}/complete", post(end_season))
        .route("/seasons/{id}/standings", get(standings))
}

/// Start the league's next season (league owner only).
#[utoipa::path(
    post,
    path = "/leagues/{id}/seasons",
    tag = "seasons",
    params(("id" = Uuid, Path, description = "League identifier")),
    responses((status = 200, description = "Season started", body = SeasonStartResponse))
)]
pub async fn start_season(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SeasonStartResponse>, AppError> {
    let response = season_service::start_season(&state, id, user).await?;
    Ok(Json(response))
}

/// Close a season (league owner only).
#[utoipa::path(
    post,
    path = "/seasons/{id}/complete",
    tag = "seasons",
    params(("id" = Uuid, Path, description = "Season identifier")),
    responses((status = 200, description = "Season closed", body = SeasonSummary))
)]
pub async fn end_season(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SeasonSummary>, AppError> {
    let summary = season_service::end_season(&state, id, user).await?;
    Ok(Json(summary))
}

/// The season standings table, best-first.
#[utoipa::path(
    get,
    path = "/seasons/{id}/standings",
    tag = "seasons",
    params(("id" = Uuid, Path, description = "Season identifier")),
    responses((status = 200, description = "Standings", body = StandingsTable))
)]
pub async fn standings(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StandingsTable>, AppError> {
    let table = season_service::standings(&state, id, user).await?;
    Ok(Json(table))
}
