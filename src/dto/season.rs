//! Season and standings DTOs.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{SeasonEntity, SeasonStandingEntity},
    dto::{format_system_time, round::RoundSummary},
    state::lifecycle::SeasonStatus,
};

/// Public projection of a season.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeasonSummary {
    /// Season id.
    pub id: Uuid,
    /// 1-based sequence number within the league.
    pub season_number: u32,
    /// Number of rounds generated for the season.
    pub rounds_total: u32,
    /// Lifecycle state.
    pub status: SeasonStatus,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Response returned when a season is started: the season plus its generated
/// round schedule (round 1 already active).
#[derive(Debug, Serialize, ToSchema)]
pub struct SeasonStartResponse {
    /// The new season.
    pub season: SeasonSummary,
    /// Generated rounds ordered by round number.
    pub rounds: Vec<RoundSummary>,
}

/// One row of the season standings table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingRow {
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Name shown on the table.
    pub display_name: String,
    /// Accumulated points.
    pub total_points: f64,
    /// Rounds won outright.
    pub wins: u32,
    /// Rounds tied for the lead.
    pub ties: u32,
    /// Rounds with a recorded result.
    pub rounds_played: u32,
}

/// Season standings sorted best-first.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingsTable {
    /// The season the table belongs to.
    pub season: SeasonSummary,
    /// Rows sorted by points, then wins, then name.
    pub rows: Vec<StandingRow>,
}

impl From<SeasonEntity> for SeasonSummary {
    fn from(season: SeasonEntity) -> Self {
        Self {
            id: season.id,
            season_number: season.season_number,
            rounds_total: season.rounds_total,
            status: season.status,
            created_at: format_system_time(season.created_at),
        }
    }
}

impl StandingRow {
    /// Pair a standing with its participant's display name.
    pub fn new(standing: SeasonStandingEntity, display_name: String) -> Self {
        Self {
            entity_id: standing.entity_id,
            display_name,
            total_points: standing.total_points,
            wins: standing.wins,
            ties: standing.ties,
            rounds_played: standing.rounds_played,
        }
    }
}
