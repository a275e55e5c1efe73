//! Round lifecycle: score submission, completion detection, result
//! persistence, standings accumulation, and next-round activation.
//!
//! `complete_round` is written as a re-runnable saga. Any number of clients
//! may race it: result rows are conditional inserts, standing updates only
//! follow a row this invocation actually created, and the round's
//! active → completed move is a conditional update at the store. Whoever wins
//! that update announces the results and opens the next round; everyone else
//! just observes.

use std::{collections::HashMap, sync::Arc, time::SystemTime};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    dao::{
        league_store::{LeagueStore, StandingDelta},
        models::{
            LeagueEntity, LeagueFormat, RoundEntity, RoundResultEntity, ScoreEntity, TeamEntity,
        },
    },
    dto::round::{
        BoardEntry, CompleteRoundResponse, MAX_GROSS_SCORE, MIN_GROSS_SCORE, ResultSummary,
        RoundBoard, RoundSummary, SubmitScoreRequest, SubmitScoreResponse,
    },
    error::ServiceError,
    notify::ResultRow,
    scoring::{LeadTieRule, RoundPoints, ScoreEntry, calculate_round_points},
    services::{announcements, league_service},
    state::{SharedState, lifecycle::RoundStatus},
};

/// Submit (or resubmit) a score for an active round.
///
/// For singles the net score is frozen here from the member's current
/// handicap; later handicap edits never touch it. For scramble the score is
/// recorded against the submitter's team. An attached scorecard link is
/// optional and its absence never blocks the submission.
pub async fn submit_score(
    state: &SharedState,
    round_id: Uuid,
    user: Uuid,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    let store = state.require_league_store().await?;

    let round = require_round(&store, round_id).await?;
    let league = league_service::require_league(&store, round.league_id).await?;
    league_service::require_member(&store, round.league_id, user).await?;

    if !matches!(round.status, RoundStatus::Active) {
        return Err(ServiceError::InvalidState(
            "round is not open for score submission".into(),
        ));
    }

    let gross = request.gross_score;
    if !(MIN_GROSS_SCORE..=MAX_GROSS_SCORE).contains(&gross) {
        return Err(ServiceError::InvalidInput(format!(
            "score must be between {MIN_GROSS_SCORE} and {MAX_GROSS_SCORE}"
        )));
    }

    let score = match league.format {
        LeagueFormat::Singles => {
            let strokes = store
                .find_handicap(round.league_id, user)
                .await?
                .map(|h| h.strokes)
                .unwrap_or(0);

            ScoreEntity {
                round_id,
                entity_id: user,
                gross_score: gross,
                net_score: Some(gross - strokes as i32),
                handicap_used: Some(strokes),
                scorecard_image_url: request.scorecard_image_url,
                submitted_by: user,
                submitted_at: SystemTime::now(),
            }
        }
        LeagueFormat::Scramble => {
            let team = store
                .find_team_for_user(round.league_id, user)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotOnTeam("you are not on a team in this league".into())
                })?;

            ScoreEntity {
                round_id,
                entity_id: team.id,
                gross_score: gross,
                net_score: None,
                handicap_used: None,
                scorecard_image_url: request.scorecard_image_url,
                submitted_by: user,
                submitted_at: SystemTime::now(),
            }
        }
    };

    store.upsert_score(score.clone()).await?;

    let completion = check_and_complete(state, round_id).await?;

    Ok(SubmitScoreResponse {
        score: score.into(),
        round_completed: completion.is_some(),
    })
}

/// Complete the round if and only if every expected participant has a score
/// in. Anything less is a no-op.
pub async fn check_and_complete(
    state: &SharedState,
    round_id: Uuid,
) -> Result<Option<CompleteRoundResponse>, ServiceError> {
    let store = state.require_league_store().await?;

    let round = require_round(&store, round_id).await?;
    if !matches!(round.status, RoundStatus::Active) {
        return Ok(None);
    }

    let league = league_service::require_league(&store, round.league_id).await?;
    let expected = participant_names(&store, &league).await?;
    let scores = store.list_scores(round_id).await?;
    if !all_submitted(&expected, &scores) {
        return Ok(None);
    }

    complete_round(state, round_id).await.map(Some)
}

/// Manually trigger round completion. League owner only; still re-verifies
/// that every score is in.
pub async fn complete_round_as(
    state: &SharedState,
    round_id: Uuid,
    by: Uuid,
) -> Result<CompleteRoundResponse, ServiceError> {
    let store = state.require_league_store().await?;
    let round = require_round(&store, round_id).await?;
    league_service::ensure_owner(&store, round.league_id, by).await?;

    complete_round(state, round_id).await
}

/// Run the completion saga for a round.
///
/// Idempotent: an already-completed round returns its frozen results without
/// touching anything, and a rerun after a partial failure picks up exactly
/// where the previous attempt stopped.
pub async fn complete_round(
    state: &SharedState,
    round_id: Uuid,
) -> Result<CompleteRoundResponse, ServiceError> {
    let store = state.require_league_store().await?;

    let round = require_round(&store, round_id).await?;
    let league = league_service::require_league(&store, round.league_id).await?;
    let names = participant_names(&store, &league).await?;

    match round.status {
        RoundStatus::Completed => {
            let results = store.list_round_results(round_id).await?;
            return Ok(CompleteRoundResponse {
                already_completed: true,
                results: result_summaries_from_entities(results, &names),
                next_round: None,
            });
        }
        RoundStatus::Pending => {
            return Err(ServiceError::InvalidState(
                "round has not opened yet".into(),
            ));
        }
        RoundStatus::Active => {}
    }

    let _gate = state
        .begin_round_completion(round_id)
        .ok_or_else(|| ServiceError::InvalidState("round completion already in progress".into()))?;

    // State may have moved between the status read and here, so the
    // all-submitted check runs against fresh reads.
    let scores = store.list_scores(round_id).await?;
    let outstanding = names
        .keys()
        .filter(|id| !scores.iter().any(|s| s.entity_id == **id))
        .count();
    if outstanding > 0 {
        return Err(ServiceError::InvalidState(format!(
            "waiting for {outstanding} more score(s)"
        )));
    }

    let teams = match league.format {
        LeagueFormat::Scramble => store.list_teams(round.league_id).await?,
        LeagueFormat::Singles => Vec::new(),
    };
    let entries = scoring_entries(league.format, &scores, &teams);
    let points = calculate_round_points(&entries, LeadTieRule::FlatHalf);

    for award in &points {
        let created = store
            .insert_round_result(RoundResultEntity {
                round_id,
                entity_id: award.id,
                points: award.points,
                position: award.position,
                gross_score: award.gross_score,
                net_score: award.net_score,
            })
            .await?;

        // A standing delta strictly follows a result row this call created;
        // reruns and racing completions therefore never double-count.
        if created {
            store
                .apply_standing_delta(
                    round.season_id,
                    award.id,
                    StandingDelta::from_points(award.points),
                )
                .await?;
        }
    }

    let won_transition = store
        .transition_round(round_id, RoundStatus::Active, RoundStatus::Completed)
        .await?;

    let mut next_round = None;
    if won_transition {
        let season = store
            .find_season(round.season_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("season not found for round".into()))?;

        announcements::announce_round_complete(
            state,
            &league,
            &season,
            &round,
            result_rows(&points, &names),
        )
        .await;

        if let Some(pending) = store.next_pending_round(round.season_id).await? {
            let activated = store
                .transition_round(pending.id, RoundStatus::Pending, RoundStatus::Active)
                .await?;
            if activated {
                announcements::announce_round_open(
                    state,
                    &league,
                    &season,
                    &pending,
                    names.values().cloned().collect(),
                )
                .await;
                next_round = Some(RoundSummary::from(&pending));
            }
        }
    }

    Ok(CompleteRoundResponse {
        already_completed: !won_transition,
        results: result_summaries(&points, &names),
        next_round,
    })
}

/// Live (or final) leaderboard for a round: one entry per expected
/// participant, with provisional points computed over the submitted subset.
pub async fn round_board(
    state: &SharedState,
    round_id: Uuid,
    user: Uuid,
) -> Result<RoundBoard, ServiceError> {
    let store = state.require_league_store().await?;

    let round = require_round(&store, round_id).await?;
    let league = league_service::require_league(&store, round.league_id).await?;
    league_service::require_member(&store, round.league_id, user).await?;

    let names = participant_names(&store, &league).await?;
    let scores = store.list_scores(round_id).await?;
    let teams = match league.format {
        LeagueFormat::Scramble => store.list_teams(round.league_id).await?,
        LeagueFormat::Singles => Vec::new(),
    };

    let entries = scoring_entries(league.format, &scores, &teams);
    let points = calculate_round_points(&entries, LeadTieRule::FlatHalf);
    let points_by_id: HashMap<Uuid, &RoundPoints> =
        points.iter().map(|award| (award.id, award)).collect();
    let scores_by_id: HashMap<Uuid, &ScoreEntity> =
        scores.iter().map(|score| (score.entity_id, score)).collect();
    let team_handicaps: HashMap<Uuid, u32> =
        teams.iter().map(|team| (team.id, team.handicap)).collect();

    let entries = names
        .iter()
        .map(|(entity_id, display_name)| {
            let score = scores_by_id.get(entity_id);
            let award = points_by_id.get(entity_id);

            // Scramble boards display the handicap-adjusted total even though
            // the frozen results never carry one.
            let net_score = score.and_then(|s| match league.format {
                LeagueFormat::Singles => s.net_score,
                LeagueFormat::Scramble => team_handicaps
                    .get(entity_id)
                    .filter(|handicap| **handicap > 0)
                    .map(|handicap| s.gross_score - *handicap as i32),
            });

            BoardEntry {
                entity_id: *entity_id,
                display_name: display_name.clone(),
                submitted: score.is_some(),
                gross_score: score.map(|s| s.gross_score),
                net_score,
                points: award.map(|a| a.points),
                position: award.map(|a| a.position),
                scorecard_image_url: score.and_then(|s| s.scorecard_image_url.clone()),
            }
        })
        .collect();

    Ok(RoundBoard {
        round: RoundSummary::from(&round),
        entries,
    })
}

async fn require_round(
    store: &Arc<dyn LeagueStore>,
    round_id: Uuid,
) -> Result<RoundEntity, ServiceError> {
    store
        .find_round(round_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("round `{round_id}` not found")))
}

/// Expected participants of a league, in display order: members for singles,
/// teams for scramble.
pub(crate) async fn participant_names(
    store: &Arc<dyn LeagueStore>,
    league: &LeagueEntity,
) -> Result<IndexMap<Uuid, String>, ServiceError> {
    let names = match league.format {
        LeagueFormat::Singles => store
            .list_members(league.id)
            .await?
            .into_iter()
            .map(|member| (member.user_id, member.display_name))
            .collect(),
        LeagueFormat::Scramble => store
            .list_teams(league.id)
            .await?
            .into_iter()
            .map(|team| (team.id, team.display_name()))
            .collect(),
    };
    Ok(names)
}

fn all_submitted(expected: &IndexMap<Uuid, String>, scores: &[ScoreEntity]) -> bool {
    expected
        .keys()
        .all(|id| scores.iter().any(|score| score.entity_id == *id))
}

/// Build scoring-engine entries from the persisted scores. Singles reuse the
/// net frozen at submission; scramble nets are derived just-in-time from the
/// current team handicap.
fn scoring_entries(
    format: LeagueFormat,
    scores: &[ScoreEntity],
    teams: &[TeamEntity],
) -> Vec<ScoreEntry> {
    scores
        .iter()
        .map(|score| match format {
            LeagueFormat::Singles => ScoreEntry::Singles {
                id: score.entity_id,
                gross: score.gross_score,
                net: score.net_score.unwrap_or(score.gross_score),
            },
            LeagueFormat::Scramble => {
                let handicap = teams
                    .iter()
                    .find(|team| team.id == score.entity_id)
                    .map(|team| team.handicap)
                    .unwrap_or(0);
                ScoreEntry::Scramble {
                    id: score.entity_id,
                    gross: score.gross_score,
                    net: (handicap > 0).then(|| score.gross_score - handicap as i32),
                }
            }
        })
        .collect()
}

fn display_name(names: &IndexMap<Uuid, String>, id: Uuid) -> String {
    names.get(&id).cloned().unwrap_or_else(|| "Unknown".into())
}

fn result_summaries(
    points: &[RoundPoints],
    names: &IndexMap<Uuid, String>,
) -> Vec<ResultSummary> {
    points
        .iter()
        .map(|award| ResultSummary {
            entity_id: award.id,
            display_name: display_name(names, award.id),
            points: award.points,
            position: award.position,
            gross_score: award.gross_score,
            net_score: award.net_score,
        })
        .collect()
}

fn result_summaries_from_entities(
    results: Vec<RoundResultEntity>,
    names: &IndexMap<Uuid, String>,
) -> Vec<ResultSummary> {
    let mut summaries: Vec<ResultSummary> = results
        .into_iter()
        .map(|result| ResultSummary {
            entity_id: result.entity_id,
            display_name: display_name(names, result.entity_id),
            points: result.points,
            position: result.position,
            gross_score: result.gross_score,
            net_score: result.net_score,
        })
        .collect();
    summaries.sort_by_key(|summary| summary.position);
    summaries
}

fn result_rows(points: &[RoundPoints], names: &IndexMap<Uuid, String>) -> Vec<ResultRow> {
    points
        .iter()
        .map(|award| ResultRow {
            name: display_name(names, award.id),
            gross_score: award.gross_score,
            net_score: award.net_score,
            points: award.points,
            position: award.position,
        })
        .collect()
}
