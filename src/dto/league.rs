//! League, membership, and team DTOs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{
        HandicapEntity, LeagueEntity, LeagueFormat, MemberEntity, MemberRole, TeamEntity,
    },
    dto::{format_system_time, season::SeasonSummary, validation::validate_invite_code},
};

/// Payload used to create a league.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateLeagueRequest {
    /// League display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Scoring format; immutable once rounds exist.
    pub format: LeagueFormat,
    /// Players per team; required for scramble leagues.
    #[validate(range(min = 2, max = 4))]
    pub team_size: Option<u8>,
    /// Rounds generated for each season.
    #[validate(range(min = 1, max = 20))]
    pub rounds_per_season: u32,
    /// Webhook endpoint for league announcements.
    #[validate(url)]
    pub webhook_url: Option<String>,
    /// Display name recorded for the creating member.
    #[validate(length(min = 1, max = 32))]
    pub display_name: String,
}

/// Payload used to join a league by invite code.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinLeagueRequest {
    /// The league's invite code.
    #[validate(custom(function = validate_invite_code))]
    pub invite_code: String,
    /// Display name recorded for the joining member.
    #[validate(length(min = 1, max = 32))]
    pub display_name: String,
}

/// Payload used to set a member's handicap.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct HandicapRequest {
    /// Strokes subtracted from gross to form the net score.
    #[validate(range(min = 0, max = 54))]
    pub strokes: u32,
}

/// Payload used to create a scramble team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Team display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Emoji shown next to the name; defaults to the league flag.
    pub emoji: Option<String>,
    /// User ids of the roster.
    pub members: Vec<Uuid>,
}

/// Payload used to set a team's handicap.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TeamHandicapRequest {
    /// Strokes subtracted from the team's gross for comparison.
    #[validate(range(min = 0, max = 54))]
    pub strokes: u32,
}

/// Public projection of a league.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeagueSummary {
    /// League id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Scoring format.
    pub format: LeagueFormat,
    /// Players per team (scramble only).
    pub team_size: Option<u8>,
    /// Rounds generated for each season.
    pub rounds_per_season: u32,
    /// Code other players use to join.
    pub invite_code: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Public projection of a league member.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberSummary {
    /// The member's user id.
    pub user_id: Uuid,
    /// Name shown on boards and announcements.
    pub display_name: String,
    /// Role inside the league.
    pub role: MemberRole,
    /// Current handicap strokes, when one is set.
    pub handicap: Option<u32>,
}

/// Public projection of a scramble team.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Team id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Team handicap strokes; zero means none assigned.
    pub handicap: u32,
    /// User ids of the roster.
    pub members: Vec<Uuid>,
}

/// Full league view for the hub screen.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
pub struct LeagueOverview {
    /// The league itself.
    pub league: LeagueSummary,
    /// Members in join order.
    pub members: Vec<MemberSummary>,
    /// Teams in creation order (scramble only; empty for singles).
    pub teams: Vec<TeamSummary>,
    /// The currently active season, when one exists.
    pub active_season: Option<SeasonSummary>,
}

impl From<LeagueEntity> for LeagueSummary {
    fn from(league: LeagueEntity) -> Self {
        Self {
            id: league.id,
            name: league.name,
            format: league.format,
            team_size: league.team_size,
            rounds_per_season: league.rounds_per_season,
            invite_code: league.invite_code,
            created_at: format_system_time(league.created_at),
        }
    }
}

impl From<(MemberEntity, Option<HandicapEntity>)> for MemberSummary {
    fn from((member, handicap): (MemberEntity, Option<HandicapEntity>)) -> Self {
        Self {
            user_id: member.user_id,
            display_name: member.display_name,
            role: member.role,
            handicap: handicap.map(|h| h.strokes),
        }
    }
}

impl From<TeamEntity> for TeamSummary {
    fn from(team: TeamEntity) -> Self {
        Self {
            id: team.id,
            name: team.name,
            emoji: team.emoji,
            handicap: team.handicap,
            members: team.members,
        }
    }
}
