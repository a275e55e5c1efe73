//! Persistence contract for leagues, seasons, rounds, scores, and standings.
//!
//! The round/season controllers run on many clients at once against shared
//! backend state, so the contract bakes the concurrency rules in rather than
//! trusting callers:
//!
//! - lifecycle moves go through [`LeagueStore::transition_round`] /
//!   [`LeagueStore::transition_season`], conditional updates that only apply
//!   when the record is still in the expected state;
//! - round results go through [`LeagueStore::insert_round_result`], a
//!   conditional insert keyed by (round, participant) that reports whether
//!   the row was newly created;
//! - standings mutate only through [`LeagueStore::apply_standing_delta`], an
//!   atomic increment (never read-modify-write in application code).

#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{
    HandicapChangeEntity, HandicapEntity, LeagueEntity, MemberEntity, RoundEntity,
    RoundResultEntity, ScoreEntity, SeasonEntity, SeasonStandingEntity, TeamEntity,
};
use crate::dao::storage::StorageResult;
use crate::state::lifecycle::{RoundStatus, SeasonStatus};

/// Increment applied to a season standing when a round result is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingDelta {
    /// Points to add to the running total.
    pub points: f64,
    /// Whether this result counts as an outright win.
    pub win: bool,
    /// Whether this result counts as a shared lead.
    pub tie: bool,
}

impl StandingDelta {
    /// Derive the delta from a round's point award: a full point is a win, a
    /// half point is a tie, anything else only counts the round as played.
    pub fn from_points(points: f64) -> Self {
        Self {
            points,
            win: points == crate::scoring::POINTS_WIN,
            tie: points == crate::scoring::POINTS_SHARED_LEAD,
        }
    }
}

/// Abstraction over the persistence layer for league state.
pub trait LeagueStore: Send + Sync {
    /// Persist a league (insert or replace by id).
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a league by id.
    fn find_league(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>>;
    /// Look up a league by its invite code.
    fn find_league_by_invite(
        &self,
        invite_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>>;

    /// Persist a membership (insert or replace by (league, user)).
    fn save_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// All members of a league, in join order.
    fn list_members(&self, league_id: Uuid)
    -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>>;
    /// A single membership, when it exists.
    fn find_member(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>>;

    /// Insert or overwrite a member's current handicap.
    fn upsert_handicap(&self, handicap: HandicapEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// A member's current handicap, when one is set.
    fn find_handicap(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<HandicapEntity>>>;
    /// Append a handicap edit to the audit trail.
    fn append_handicap_change(
        &self,
        change: HandicapChangeEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Persist a team (insert or replace by id).
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete a team; false when no such team existed.
    fn delete_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Look up a team by id.
    fn find_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// All teams of a league, in creation order.
    fn list_teams(&self, league_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// The team a user plays on within a league, when any.
    fn find_team_for_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// Point every team of the league at the given season.
    fn attach_teams_to_season(
        &self,
        league_id: Uuid,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Persist a season (insert or replace by id).
    fn save_season(&self, season: SeasonEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a season by id.
    fn find_season(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>>;
    /// The league's active season, when one exists.
    fn find_active_season(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>>;
    /// Highest season number allocated for the league so far.
    fn latest_season_number(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>>;
    /// Conditional lifecycle move: applies only when the step is legal and
    /// the season is still in `from`, and reports whether it did.
    fn transition_season(
        &self,
        id: Uuid,
        from: SeasonStatus,
        to: SeasonStatus,
    ) -> BoxFuture<'static, StorageResult<bool>>;

    /// Persist a round (insert or replace by id).
    fn save_round(&self, round: RoundEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look up a round by id.
    fn find_round(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>>;
    /// All rounds of a season ordered by round number.
    fn list_rounds(&self, season_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<RoundEntity>>>;
    /// The lowest-numbered pending round of a season, when any remain.
    fn next_pending_round(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>>;
    /// Conditional lifecycle move: applies only when the step is legal and
    /// the round is still in `from`, and reports whether it did.
    fn transition_round(
        &self,
        id: Uuid,
        from: RoundStatus,
        to: RoundStatus,
    ) -> BoxFuture<'static, StorageResult<bool>>;

    /// Insert or overwrite a score keyed by (round, participant).
    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// All scores submitted for a round.
    fn list_scores(&self, round_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>>;

    /// Conditional insert keyed by (round, participant): true when the row was
    /// newly created, false when a result already existed (left untouched).
    fn insert_round_result(
        &self,
        result: RoundResultEntity,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// All frozen results of a round.
    fn list_round_results(
        &self,
        round_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RoundResultEntity>>>;

    /// Create a zeroed standing row (insert or replace).
    fn seed_standing(
        &self,
        standing: SeasonStandingEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Atomically increment a standing, creating the row when a participant
    /// joined after the season was seeded.
    fn apply_standing_delta(
        &self,
        season_id: Uuid,
        entity_id: Uuid,
        delta: StandingDelta,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// All standings of a season.
    fn list_standings(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<SeasonStandingEntity>>>;

    /// Cheap connectivity probe used by the storage supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_delta_classifies_awards() {
        let win = StandingDelta::from_points(1.0);
        assert!(win.win && !win.tie);

        let tie = StandingDelta::from_points(0.5);
        assert!(!tie.win && tie.tie);

        let loss = StandingDelta::from_points(0.0);
        assert!(!loss.win && !loss.tie);
        assert_eq!(loss.points, 0.0);
    }
}
