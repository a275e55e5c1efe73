//! Round, score submission, and leaderboard DTOs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{RoundEntity, ScoreEntity},
    dto::format_system_time,
    state::lifecycle::RoundStatus,
};

/// Lowest gross score the domain accepts.
pub const MIN_GROSS_SCORE: i32 = 50;
/// Highest gross score the domain accepts.
pub const MAX_GROSS_SCORE: i32 = 150;

/// Payload used to submit (or resubmit) a score for the active round.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitScoreRequest {
    /// Raw stroke count for the week.
    #[validate(range(min = 50, max = 150))]
    pub gross_score: i32,
    /// Link to an already-uploaded scorecard capture, when one was taken.
    #[validate(url)]
    pub scorecard_image_url: Option<String>,
}

/// Public projection of a round.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundSummary {
    /// Round id.
    pub id: Uuid,
    /// 1-based ordering within the season.
    pub round_number: u32,
    /// Course name.
    pub course_name: String,
    /// Course location.
    pub course_location: String,
    /// Course par.
    pub course_par: u32,
    /// Lifecycle state.
    pub status: RoundStatus,
}

/// Public projection of a submitted score.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreSummary {
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Raw stroke count.
    pub gross_score: i32,
    /// Net score frozen at submission time (singles only).
    pub net_score: Option<i32>,
    /// Handicap strokes applied at submission time (singles only).
    pub handicap_used: Option<u32>,
    /// Link to the scorecard capture, when one was attached.
    pub scorecard_image_url: Option<String>,
    /// Submission timestamp (RFC 3339).
    pub submitted_at: String,
}

/// Response returned by a score submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// The stored score.
    pub score: ScoreSummary,
    /// True when this submission was the last one in and completed the round.
    pub round_completed: bool,
}

/// One participant's line on the round leaderboard.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardEntry {
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Name shown on the board.
    pub display_name: String,
    /// Whether a score has been submitted yet.
    pub submitted: bool,
    /// Raw stroke count, once submitted.
    pub gross_score: Option<i32>,
    /// Net score used for display (frozen for singles, derived from the team
    /// handicap for scramble), once submitted.
    pub net_score: Option<i32>,
    /// Points earned (provisional while the round is live).
    pub points: Option<f64>,
    /// 1-based position (provisional while the round is live).
    pub position: Option<u32>,
    /// Link to the scorecard capture, when one was attached.
    pub scorecard_image_url: Option<String>,
}

/// Live (or final) leaderboard for a round.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundBoard {
    /// The round itself.
    pub round: RoundSummary,
    /// One entry per expected participant.
    pub entries: Vec<BoardEntry>,
}

/// Frozen result line returned after a round completes.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultSummary {
    /// Participant (user for singles, team for scramble).
    pub entity_id: Uuid,
    /// Name shown on the board.
    pub display_name: String,
    /// Match-play points earned.
    pub points: f64,
    /// 1-based finishing position.
    pub position: u32,
    /// Raw stroke count.
    pub gross_score: i32,
    /// Net score (singles only).
    pub net_score: Option<i32>,
}

/// Response returned by the round-completion endpoint.
#[skip_serializing_none]
#[derive(Debug, Serialize, ToSchema)]
pub struct CompleteRoundResponse {
    /// True when the round had already been completed before this call.
    pub already_completed: bool,
    /// Frozen results sorted by position.
    pub results: Vec<ResultSummary>,
    /// The round that was activated next, when one was.
    pub next_round: Option<RoundSummary>,
}

impl From<&RoundEntity> for RoundSummary {
    fn from(round: &RoundEntity) -> Self {
        Self {
            id: round.id,
            round_number: round.round_number,
            course_name: round.course_name.clone(),
            course_location: round.course_location.clone(),
            course_par: round.course_par,
            status: round.status,
        }
    }
}

impl From<ScoreEntity> for ScoreSummary {
    fn from(score: ScoreEntity) -> Self {
        Self {
            entity_id: score.entity_id,
            gross_score: score.gross_score,
            net_score: score.net_score,
            handicap_used: score.handicap_used,
            scorecard_image_url: score.scorecard_image_url,
            submitted_at: format_system_time(score.submitted_at),
        }
    }
}
