//! Lifecycle states for rounds and seasons.
//!
//! Both machines are strictly monotonic: a round moves pending → active →
//! completed and never regresses, a season moves active → completed. The
//! storage backend enforces each step as a conditional update, so these types
//! describe which transitions are legal and give the stores a stable string
//! form to filter on.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a round sits in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Created but not yet open for score submissions.
    Pending,
    /// Open: participants may submit and resubmit scores.
    Active,
    /// Terminal: results are frozen.
    Completed,
}

/// Where a season sits in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeasonStatus {
    /// The league's current season.
    Active,
    /// Closed by an operator.
    Completed,
}

impl RoundStatus {
    /// Stable string form used in persistence filters and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RoundStatus::Pending => "pending",
            RoundStatus::Active => "active",
            RoundStatus::Completed => "completed",
        }
    }

    /// Whether stepping from `self` to `next` is a legal forward move.
    pub fn can_advance_to(self, next: RoundStatus) -> bool {
        matches!(
            (self, next),
            (RoundStatus::Pending, RoundStatus::Active)
                | (RoundStatus::Active, RoundStatus::Completed)
        )
    }
}

impl SeasonStatus {
    /// Stable string form used in persistence filters and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonStatus::Active => "active",
            SeasonStatus::Completed => "completed",
        }
    }

    /// Whether stepping from `self` to `next` is a legal forward move.
    pub fn can_advance_to(self, next: SeasonStatus) -> bool {
        matches!((self, next), (SeasonStatus::Active, SeasonStatus::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_lifecycle_is_strictly_monotonic() {
        assert!(RoundStatus::Pending.can_advance_to(RoundStatus::Active));
        assert!(RoundStatus::Active.can_advance_to(RoundStatus::Completed));

        // No skips, no regressions, no self-loops.
        assert!(!RoundStatus::Pending.can_advance_to(RoundStatus::Completed));
        assert!(!RoundStatus::Active.can_advance_to(RoundStatus::Pending));
        assert!(!RoundStatus::Completed.can_advance_to(RoundStatus::Active));
        assert!(!RoundStatus::Completed.can_advance_to(RoundStatus::Pending));
        for status in [
            RoundStatus::Pending,
            RoundStatus::Active,
            RoundStatus::Completed,
        ] {
            assert!(!status.can_advance_to(status));
        }
    }

    #[test]
    fn season_lifecycle_only_closes() {
        assert!(SeasonStatus::Active.can_advance_to(SeasonStatus::Completed));
        assert!(!SeasonStatus::Completed.can_advance_to(SeasonStatus::Active));
        assert!(!SeasonStatus::Active.can_advance_to(SeasonStatus::Active));
    }

    #[test]
    fn status_strings_match_the_wire_form() {
        assert_eq!(RoundStatus::Pending.as_str(), "pending");
        assert_eq!(RoundStatus::Active.as_str(), "active");
        assert_eq!(RoundStatus::Completed.as_str(), "completed");
        assert_eq!(SeasonStatus::Active.as_str(), "active");
        assert_eq!(SeasonStatus::Completed.as_str(), "completed");
    }
}
