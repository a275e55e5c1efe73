//! Entities shared between the service layer and the storage backends.
//!
//! A participant is identified by an opaque `entity_id`: a user id in singles
//! leagues, a team id in scramble leagues. Scores, results, and standings are
//! all keyed that way so the two formats flow through the same persistence
//! contracts.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::lifecycle::{RoundStatus, SeasonStatus};

/// How a league compares scores and who its participants are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeagueFormat {
    /// Individual players ranked by net score (gross minus handicap).
    Singles,
    /// Teams ranked by gross total (net when a team handicap is assigned).
    Scramble,
}

/// Role of a user inside a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// League creator; may run seasons, edit handicaps, and manage teams.
    Owner,
    /// Regular participant.
    Member,
}

/// A golf league. The format is immutable once rounds exist; nothing in the
/// service layer offers a way to change it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeagueEntity {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// User who created the league.
    pub owner_id: Uuid,
    /// Scoring format.
    pub format: LeagueFormat,
    /// Players per team (scramble only).
    pub team_size: Option<u8>,
    /// Rounds generated for each new season.
    pub rounds_per_season: u32,
    /// Code other players use to join.
    pub invite_code: String,
    /// Webhook endpoint for league announcements, when configured.
    pub webhook_url: Option<String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// Membership of a user in a league. The display name is denormalized here
/// from the identity provider at join time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberEntity {
    /// League the membership belongs to.
    pub league_id: Uuid,
    /// The member's user id.
    pub user_id: Uuid,
    /// Role inside the league.
    pub role: MemberRole,
    /// Name shown on boards and announcements.
    pub display_name: String,
    /// When the user joined.
    pub joined_at: SystemTime,
}

/// Current handicap strokes for a league member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandicapEntity {
    /// League scope.
    pub league_id: Uuid,
    /// The player.
    pub user_id: Uuid,
    /// Strokes subtracted from gross to form the net score.
    pub strokes: u32,
    /// Who last edited the value.
    pub updated_by: Uuid,
    /// When the value was last edited.
    pub updated_at: SystemTime,
}

/// Append-only record of a handicap edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandicapChangeEntity {
    /// League scope.
    pub league_id: Uuid,
    /// The player whose handicap changed.
    pub user_id: Uuid,
    /// Strokes before the edit.
    pub old_strokes: u32,
    /// Strokes after the edit.
    pub new_strokes: u32,
    /// Who made the edit.
    pub updated_by: Uuid,
    /// When the edit happened.
    pub updated_at: SystemTime,
}

/// A scramble team. Members are embedded; a team belongs to its league and is
/// attached to the current season when one starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamEntity {
    /// Primary key.
    pub id: Uuid,
    /// League the team plays in.
    pub league_id: Uuid,
    /// Season the team is attached to, once one has started.
    pub season_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Team handicap strokes; zero means none assigned.
    pub handicap: u32,
    /// User ids of the roster.
    pub members: Vec<Uuid>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

impl TeamEntity {
    /// Name as shown on boards and announcements.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// One season of a league.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonEntity {
    /// Primary key.
    pub id: Uuid,
    /// Owning league.
    pub league_id: Uuid,
    /// 1-based sequence number within the league.
    pub season_number: u32,
    /// Number of rounds generated for the season.
    pub rounds_total: u32,
    /// Lifecycle state.
    pub status: SeasonStatus,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// One week of play at a drawn course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundEntity {
    /// Primary key.
    pub id: Uuid,
    /// Owning season.
    pub season_id: Uuid,
    /// Owning league (denormalized for direct lookups).
    pub league_id: Uuid,
    /// 1-based ordering within the season.
    pub round_number: u32,
    /// Course name from the catalog.
    pub course_name: String,
    /// Course location.
    pub course_location: String,
    /// Course par.
    pub course_par: u32,
    /// Lifecycle state.
    pub status: RoundStatus,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// A submitted score, keyed by (round, participant). Upserted until the round
/// completes; never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntity {
    /// Round the score belongs to.
    pub round_id: Uuid,
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Raw stroke count, domain-validated to [50, 150].
    pub gross_score: i32,
    /// Net score frozen at submission time (singles only).
    pub net_score: Option<i32>,
    /// Handicap strokes applied at submission time (singles only).
    pub handicap_used: Option<u32>,
    /// Link to an uploaded scorecard capture, when one was attached.
    pub scorecard_image_url: Option<String>,
    /// User who entered the score.
    pub submitted_by: Uuid,
    /// Submission timestamp (refreshed on resubmission).
    pub submitted_at: SystemTime,
}

/// Frozen outcome of one participant's round, written exactly once at round
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundResultEntity {
    /// Round the result belongs to.
    pub round_id: Uuid,
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Match-play points earned (0, 0.5, or 1).
    pub points: f64,
    /// 1-based finishing position.
    pub position: u32,
    /// Raw stroke count.
    pub gross_score: i32,
    /// Net score (singles only).
    pub net_score: Option<i32>,
}

/// Season-long running aggregate per participant. Seeded at zero when the
/// season starts and mutated only through atomic increments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonStandingEntity {
    /// Owning season.
    pub season_id: Uuid,
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Accumulated points.
    pub total_points: f64,
    /// Rounds won outright.
    pub wins: u32,
    /// Rounds tied for the lead.
    pub ties: u32,
    /// Rounds with a recorded result.
    pub rounds_played: u32,
}

impl SeasonStandingEntity {
    /// Fresh standing row for a participant at season start.
    pub fn zeroed(season_id: Uuid, entity_id: Uuid) -> Self {
        Self {
            season_id,
            entity_id,
            total_points: 0.0,
            wins: 0,
            ties: 0,
            rounds_played: 0,
        }
    }
}
