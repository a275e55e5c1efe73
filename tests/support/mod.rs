//! Test doubles: an in-memory [`LeagueStore`] honoring the contract's
//! conditional/atomic semantics, and a recording notification sink.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use uuid::Uuid;

use clubhouse_back::{
    config::AppConfig,
    dao::{
        league_store::{LeagueStore, StandingDelta},
        models::{
            HandicapChangeEntity, HandicapEntity, LeagueEntity, MemberEntity, RoundEntity,
            RoundResultEntity, ScoreEntity, SeasonEntity, SeasonStandingEntity, TeamEntity,
        },
        storage::StorageResult,
    },
    notify::{Announcement, NotificationSink, NotifyError},
    state::{
        AppState, SharedState,
        lifecycle::{RoundStatus, SeasonStatus},
    },
};

#[derive(Default)]
struct Inner {
    leagues: Vec<LeagueEntity>,
    members: Vec<MemberEntity>,
    handicaps: Vec<HandicapEntity>,
    handicap_changes: Vec<HandicapChangeEntity>,
    teams: Vec<TeamEntity>,
    seasons: Vec<SeasonEntity>,
    rounds: Vec<RoundEntity>,
    scores: Vec<ScoreEntity>,
    round_results: Vec<RoundResultEntity>,
    standings: Vec<SeasonStandingEntity>,
}

/// In-memory store mirroring the semantics the MongoDB backend gets from
/// conditional updates, `$setOnInsert`, and `$inc`.
#[derive(Default, Clone)]
pub struct MemoryLeagueStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLeagueStore {
    fn with<T: Send + 'static>(
        &self,
        f: impl FnOnce(&mut Inner) -> T + Send + 'static,
    ) -> BoxFuture<'static, StorageResult<T>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut guard = inner.lock().unwrap();
            Ok(f(&mut guard))
        })
    }
}

impl LeagueStore for MemoryLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner.leagues.retain(|l| l.id != league.id);
            inner.leagues.push(league);
        })
    }

    fn find_league(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        self.with(move |inner| inner.leagues.iter().find(|l| l.id == id).cloned())
    }

    fn find_league_by_invite(
        &self,
        invite_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        self.with(move |inner| {
            inner
                .leagues
                .iter()
                .find(|l| l.invite_code == invite_code)
                .cloned()
        })
    }

    fn save_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner
                .members
                .retain(|m| !(m.league_id == member.league_id && m.user_id == member.user_id));
            inner.members.push(member);
        })
    }

    fn list_members(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        self.with(move |inner| {
            inner
                .members
                .iter()
                .filter(|m| m.league_id == league_id)
                .cloned()
                .collect()
        })
    }

    fn find_member(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>> {
        self.with(move |inner| {
            inner
                .members
                .iter()
                .find(|m| m.league_id == league_id && m.user_id == user_id)
                .cloned()
        })
    }

    fn upsert_handicap(&self, handicap: HandicapEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner
                .handicaps
                .retain(|h| !(h.league_id == handicap.league_id && h.user_id == handicap.user_id));
            inner.handicaps.push(handicap);
        })
    }

    fn find_handicap(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<HandicapEntity>>> {
        self.with(move |inner| {
            inner
                .handicaps
                .iter()
                .find(|h| h.league_id == league_id && h.user_id == user_id)
                .cloned()
        })
    }

    fn append_handicap_change(
        &self,
        change: HandicapChangeEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| inner.handicap_changes.push(change))
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner.teams.retain(|t| t.id != team.id);
            inner.teams.push(team);
        })
    }

    fn delete_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        self.with(move |inner| {
            let before = inner.teams.len();
            inner.teams.retain(|t| t.id != team_id);
            inner.teams.len() < before
        })
    }

    fn find_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        self.with(move |inner| inner.teams.iter().find(|t| t.id == team_id).cloned())
    }

    fn list_teams(&self, league_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        self.with(move |inner| {
            inner
                .teams
                .iter()
                .filter(|t| t.league_id == league_id)
                .cloned()
                .collect()
        })
    }

    fn find_team_for_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        self.with(move |inner| {
            inner
                .teams
                .iter()
                .find(|t| t.league_id == league_id && t.members.contains(&user_id))
                .cloned()
        })
    }

    fn attach_teams_to_season(
        &self,
        league_id: Uuid,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            for team in inner.teams.iter_mut().filter(|t| t.league_id == league_id) {
                team.season_id = Some(season_id);
            }
        })
    }

    fn save_season(&self, season: SeasonEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner.seasons.retain(|s| s.id != season.id);
            inner.seasons.push(season);
        })
    }

    fn find_season(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>> {
        self.with(move |inner| inner.seasons.iter().find(|s| s.id == id).cloned())
    }

    fn find_active_season(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>> {
        self.with(move |inner| {
            inner
                .seasons
                .iter()
                .find(|s| s.league_id == league_id && s.status == SeasonStatus::Active)
                .cloned()
        })
    }

    fn latest_season_number(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        self.with(move |inner| {
            inner
                .seasons
                .iter()
                .filter(|s| s.league_id == league_id)
                .map(|s| s.season_number)
                .max()
        })
    }

    fn transition_season(
        &self,
        id: Uuid,
        from: SeasonStatus,
        to: SeasonStatus,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        self.with(move |inner| {
            if !from.can_advance_to(to) {
                return false;
            }
            match inner
                .seasons
                .iter_mut()
                .find(|s| s.id == id && s.status == from)
            {
                Some(season) => {
                    season.status = to;
                    true
                }
                None => false,
            }
        })
    }

    fn save_round(&self, round: RoundEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner.rounds.retain(|r| r.id != round.id);
            inner.rounds.push(round);
        })
    }

    fn find_round(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>> {
        self.with(move |inner| inner.rounds.iter().find(|r| r.id == id).cloned())
    }

    fn list_rounds(&self, season_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<RoundEntity>>> {
        self.with(move |inner| {
            let mut rounds: Vec<RoundEntity> = inner
                .rounds
                .iter()
                .filter(|r| r.season_id == season_id)
                .cloned()
                .collect();
            rounds.sort_by_key(|r| r.round_number);
            rounds
        })
    }

    fn next_pending_round(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>> {
        self.with(move |inner| {
            inner
                .rounds
                .iter()
                .filter(|r| r.season_id == season_id && r.status == RoundStatus::Pending)
                .min_by_key(|r| r.round_number)
                .cloned()
        })
    }

    fn transition_round(
        &self,
        id: Uuid,
        from: RoundStatus,
        to: RoundStatus,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        self.with(move |inner| {
            if !from.can_advance_to(to) {
                return false;
            }
            match inner
                .rounds
                .iter_mut()
                .find(|r| r.id == id && r.status == from)
            {
                Some(round) => {
                    round.status = to;
                    true
                }
                None => false,
            }
        })
    }

    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner
                .scores
                .retain(|s| !(s.round_id == score.round_id && s.entity_id == score.entity_id));
            inner.scores.push(score);
        })
    }

    fn list_scores(&self, round_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        self.with(move |inner| {
            inner
                .scores
                .iter()
                .filter(|s| s.round_id == round_id)
                .cloned()
                .collect()
        })
    }

    fn insert_round_result(
        &self,
        result: RoundResultEntity,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        self.with(move |inner| {
            let exists = inner
                .round_results
                .iter()
                .any(|r| r.round_id == result.round_id && r.entity_id == result.entity_id);
            if exists {
                false
            } else {
                inner.round_results.push(result);
                true
            }
        })
    }

    fn list_round_results(
        &self,
        round_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RoundResultEntity>>> {
        self.with(move |inner| {
            inner
                .round_results
                .iter()
                .filter(|r| r.round_id == round_id)
                .cloned()
                .collect()
        })
    }

    fn seed_standing(
        &self,
        standing: SeasonStandingEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            inner.standings.retain(|s| {
                !(s.season_id == standing.season_id && s.entity_id == standing.entity_id)
            });
            inner.standings.push(standing);
        })
    }

    fn apply_standing_delta(
        &self,
        season_id: Uuid,
        entity_id: Uuid,
        delta: StandingDelta,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.with(move |inner| {
            let index = inner
                .standings
                .iter()
                .position(|s| s.season_id == season_id && s.entity_id == entity_id)
                .unwrap_or_else(|| {
                    inner
                        .standings
                        .push(SeasonStandingEntity::zeroed(season_id, entity_id));
                    inner.standings.len() - 1
                });

            let standing = &mut inner.standings[index];
            standing.total_points += delta.points;
            standing.wins += u32::from(delta.win);
            standing.ties += u32::from(delta.tie);
            standing.rounds_played += 1;
        })
    }

    fn list_standings(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<SeasonStandingEntity>>> {
        self.with(move |inner| {
            inner
                .standings
                .iter()
                .filter(|s| s.season_id == season_id)
                .cloned()
                .collect()
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Notification sink that records every announcement instead of sending it.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Announcement)>>,
}

impl RecordingSink {
    /// Everything announced so far, in order.
    pub fn events(&self) -> Vec<(String, Announcement)> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn announce(
        &self,
        webhook_url: &str,
        announcement: Announcement,
    ) -> BoxFuture<'static, Result<(), NotifyError>> {
        self.events
            .lock()
            .unwrap()
            .push((webhook_url.to_owned(), announcement));
        Box::pin(async { Ok(()) })
    }
}

/// Shared state wired to the in-memory store and a recording sink.
pub async fn test_state() -> (SharedState, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(AppConfig::default(), sink.clone());
    state
        .install_league_store(Arc::new(MemoryLeagueStore::default()))
        .await;
    (state, sink)
}
