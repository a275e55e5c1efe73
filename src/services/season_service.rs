//! Season lifecycle: creation with a randomized course schedule, standings
//! seeding, closing, and the standings table.
//!
//! `start_season` is a chain of keyed upserts with no transaction around it,
//! matching the storage contract's saga rules: a rerun after a partial
//! failure rewrites the same rows instead of duplicating them. The active
//! season conflict check runs first so a complete season is never doubled.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    dao::models::{LeagueFormat, RoundEntity, SeasonEntity, SeasonStandingEntity},
    dto::{
        round::RoundSummary,
        season::{SeasonStartResponse, SeasonSummary, StandingRow, StandingsTable},
    },
    error::ServiceError,
    services::{announcements, league_service, round_service},
    state::{
        SharedState,
        lifecycle::{RoundStatus, SeasonStatus},
    },
};

/// Start the league's next season. Owner only; fails with a conflict when an
/// active season already exists.
///
/// Draws one course per round from the catalog, creates round 1 active and
/// the rest pending, attaches existing teams (scramble), seeds a zeroed
/// standing per participant, and announces that round 1 is live.
pub async fn start_season(
    state: &SharedState,
    league_id: Uuid,
    by: Uuid,
) -> Result<SeasonStartResponse, ServiceError> {
    let store = state.require_league_store().await?;
    let league = league_service::require_league(&store, league_id).await?;
    league_service::ensure_owner(&store, league_id, by).await?;

    if store.find_active_season(league_id).await?.is_some() {
        return Err(ServiceError::InvalidState(
            "league already has an active season".into(),
        ));
    }

    let season_number = store
        .latest_season_number(league_id)
        .await?
        .unwrap_or(0)
        + 1;

    let now = SystemTime::now();
    let season = SeasonEntity {
        id: Uuid::new_v4(),
        league_id,
        season_number,
        rounds_total: league.rounds_per_season,
        status: SeasonStatus::Active,
        created_at: now,
    };
    store.save_season(season.clone()).await?;

    let courses = state.config().draw_courses(league.rounds_per_season);
    let mut rounds = Vec::with_capacity(courses.len());
    for (index, course) in courses.into_iter().enumerate() {
        let round = RoundEntity {
            id: Uuid::new_v4(),
            season_id: season.id,
            league_id,
            round_number: index as u32 + 1,
            course_name: course.name,
            course_location: course.location,
            course_par: course.par,
            status: if index == 0 {
                RoundStatus::Active
            } else {
                RoundStatus::Pending
            },
            created_at: now,
        };
        store.save_round(round.clone()).await?;
        rounds.push(round);
    }

    if matches!(league.format, LeagueFormat::Scramble) {
        store.attach_teams_to_season(league_id, season.id).await?;
    }

    let participants = round_service::participant_names(&store, &league).await?;
    for entity_id in participants.keys() {
        store
            .seed_standing(SeasonStandingEntity::zeroed(season.id, *entity_id))
            .await?;
    }

    if let Some(first) = rounds.first() {
        announcements::announce_round_open(
            state,
            &league,
            &season,
            first,
            participants.values().cloned().collect(),
        )
        .await;
    }

    Ok(SeasonStartResponse {
        season: season.into(),
        rounds: rounds.iter().map(RoundSummary::from).collect(),
    })
}

/// Close a season. Owner only; the active → completed move is conditional, so
/// closing twice (or closing a never-active season) is a conflict.
///
/// Does not touch a still-active round. Announces the champion from the
/// standings when any exist.
pub async fn end_season(
    state: &SharedState,
    season_id: Uuid,
    by: Uuid,
) -> Result<SeasonSummary, ServiceError> {
    let store = state.require_league_store().await?;

    let mut season = store
        .find_season(season_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("season `{season_id}` not found")))?;
    let league = league_service::require_league(&store, season.league_id).await?;
    league_service::ensure_owner(&store, season.league_id, by).await?;

    let closed = store
        .transition_season(season_id, SeasonStatus::Active, SeasonStatus::Completed)
        .await?;
    if !closed {
        return Err(ServiceError::InvalidState("season is not active".into()));
    }
    season.status = SeasonStatus::Completed;

    let table = standings_rows(state, &season).await?;
    if let Some(champion) = table.first() {
        announcements::announce_season_complete(
            state,
            &league,
            &season,
            champion.display_name.clone(),
            champion.total_points,
        )
        .await;
    }

    Ok(season.into())
}

/// The season standings table, sorted best-first. Members only.
pub async fn standings(
    state: &SharedState,
    season_id: Uuid,
    user: Uuid,
) -> Result<StandingsTable, ServiceError> {
    let store = state.require_league_store().await?;

    let season = store
        .find_season(season_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("season `{season_id}` not found")))?;
    league_service::require_member(&store, season.league_id, user).await?;

    let rows = standings_rows(state, &season).await?;
    Ok(StandingsTable {
        season: season.into(),
        rows,
    })
}

async fn standings_rows(
    state: &SharedState,
    season: &SeasonEntity,
) -> Result<Vec<StandingRow>, ServiceError> {
    let store = state.require_league_store().await?;
    let league = league_service::require_league(&store, season.league_id).await?;
    let names = round_service::participant_names(&store, &league).await?;

    let mut rows: Vec<StandingRow> = store
        .list_standings(season.id)
        .await?
        .into_iter()
        .map(|standing| {
            let name = names
                .get(&standing.entity_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".into());
            StandingRow::new(standing, name)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    Ok(rows)
}
