//! Best-effort league announcements.
//!
//! Every helper here swallows delivery failures: an unreachable webhook is
//! logged and forgotten, it never fails or retries the round/season operation
//! that triggered it. Leagues without a configured webhook are skipped
//! silently.

use tracing::warn;

use crate::{
    dao::models::{LeagueEntity, RoundEntity, SeasonEntity},
    notify::{Announcement, ResultRow},
    state::SharedState,
};

/// Announce that a round is open for score submissions.
pub async fn announce_round_open(
    state: &SharedState,
    league: &LeagueEntity,
    season: &SeasonEntity,
    round: &RoundEntity,
    participants: Vec<String>,
) {
    let announcement = Announcement::RoundOpen {
        league: league.name.clone(),
        season_number: season.season_number,
        round_number: round.round_number,
        course_name: round.course_name.clone(),
        course_par: round.course_par,
        participants,
    };
    deliver(state, league, announcement).await;
}

/// Announce a completed round with its sorted result rows.
pub async fn announce_round_complete(
    state: &SharedState,
    league: &LeagueEntity,
    season: &SeasonEntity,
    round: &RoundEntity,
    rows: Vec<ResultRow>,
) {
    let announcement = Announcement::RoundComplete {
        league: league.name.clone(),
        season_number: season.season_number,
        round_number: round.round_number,
        course_name: round.course_name.clone(),
        course_par: round.course_par,
        format: league.format,
        rows,
    };
    deliver(state, league, announcement).await;
}

/// Announce the season champion after a season is closed.
pub async fn announce_season_complete(
    state: &SharedState,
    league: &LeagueEntity,
    season: &SeasonEntity,
    champion: String,
    total_points: f64,
) {
    let announcement = Announcement::SeasonComplete {
        league: league.name.clone(),
        season_number: season.season_number,
        champion,
        total_points,
    };
    deliver(state, league, announcement).await;
}

async fn deliver(state: &SharedState, league: &LeagueEntity, announcement: Announcement) {
    let Some(url) = league.webhook_url.as_deref() else {
        return;
    };

    if let Err(err) = state.notifier().announce(url, announcement).await {
        warn!(
            league = %league.id,
            error = %err,
            "failed to deliver league announcement"
        );
    }
}
