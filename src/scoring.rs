//! Match-play style weekly scoring.
//!
//! Each round behaves like a single hole of match play: the lowest comparison
//! score wins the week for a full point, ties for the lead share credit, and
//! everyone else walks away empty handed. Singles leagues compare net strokes
//! (gross minus handicap); scramble leagues compare the team's gross total,
//! or a net total when a team handicap has been assigned.

use uuid::Uuid;

/// Points awarded to a sole leader.
pub const POINTS_WIN: f64 = 1.0;
/// Points awarded to each member of a shared lead under [`LeadTieRule::FlatHalf`].
pub const POINTS_SHARED_LEAD: f64 = 0.5;

/// A submitted score entering the weekly ranking.
///
/// The variant encodes the league format, which makes the comparison-score
/// rule explicit: singles always carry a net score, scramble carries one only
/// when a team handicap is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEntry {
    /// An individual player's round in a singles league.
    Singles {
        /// Player identifier.
        id: Uuid,
        /// Raw stroke count.
        gross: i32,
        /// Gross minus the handicap frozen at submission time.
        net: i32,
    },
    /// A team's round in a scramble league.
    Scramble {
        /// Team identifier.
        id: Uuid,
        /// The team's combined stroke total.
        gross: i32,
        /// Net total, present only when the team has a handicap assigned.
        net: Option<i32>,
    },
}

impl ScoreEntry {
    /// Participant identifier (player or team).
    pub fn id(&self) -> Uuid {
        match *self {
            ScoreEntry::Singles { id, .. } | ScoreEntry::Scramble { id, .. } => id,
        }
    }

    /// Raw stroke count.
    pub fn gross(&self) -> i32 {
        match *self {
            ScoreEntry::Singles { gross, .. } | ScoreEntry::Scramble { gross, .. } => gross,
        }
    }

    /// The score this entry is ranked by: net when available, gross otherwise.
    pub fn compare_score(&self) -> i32 {
        match *self {
            ScoreEntry::Singles { net, .. } => net,
            ScoreEntry::Scramble { gross, net, .. } => net.unwrap_or(gross),
        }
    }

    /// Net score carried into the result row. Scramble entries never report
    /// one, even when a team handicap was used for the comparison.
    fn reported_net(&self) -> Option<i32> {
        match *self {
            ScoreEntry::Singles { net, .. } => Some(net),
            ScoreEntry::Scramble { .. } => None,
        }
    }
}

/// How points are split when several entries tie for the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadTieRule {
    /// Every tied leader receives a flat half point, regardless of how many
    /// share the lead. A three-way tie therefore hands out 1.5 points total.
    #[default]
    FlatHalf,
    /// Tied leaders split a single point evenly (1/N each).
    SplitEvenly,
}

impl LeadTieRule {
    fn shared_points(self, lead_group_size: usize) -> f64 {
        match self {
            LeadTieRule::FlatHalf => POINTS_SHARED_LEAD,
            LeadTieRule::SplitEvenly => POINTS_WIN / lead_group_size as f64,
        }
    }
}

/// Outcome of one participant's week.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundPoints {
    /// Participant identifier (player or team).
    pub id: Uuid,
    /// Points earned this round.
    pub points: f64,
    /// 1-based finishing position; tied entries share the position of the
    /// first entry at their score.
    pub position: u32,
    /// Raw stroke count.
    pub gross_score: i32,
    /// Net score, singles only.
    pub net_score: Option<i32>,
}

/// Rank a round's entries and hand out match-play points.
///
/// Entries are ordered by comparison score ascending (stroke play, lower is
/// better). The lead group earns points according to `tie_rule`; everyone
/// else earns zero. Positions follow the "ties share, next rank skips" rule,
/// so scores of 70/72/72/75 finish 1st, 2nd, 2nd, and 4th.
///
/// The function is pure: one result per entry, no validation, deterministic
/// for a given input (the sort is stable, and tie detection is by value).
pub fn calculate_round_points(entries: &[ScoreEntry], tie_rule: LeadTieRule) -> Vec<RoundPoints> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&ScoreEntry> = entries.iter().collect();
    ranked.sort_by_key(|entry| entry.compare_score());

    let lowest = ranked[0].compare_score();
    let lead_group_size = ranked
        .iter()
        .take_while(|entry| entry.compare_score() == lowest)
        .count();
    let lead_points = if lead_group_size == 1 {
        POINTS_WIN
    } else {
        tie_rule.shared_points(lead_group_size)
    };

    let mut results = Vec::with_capacity(ranked.len());
    let mut position = 1u32;
    for (index, entry) in ranked.iter().enumerate() {
        let points = if entry.compare_score() == lowest {
            lead_points
        } else {
            0.0
        };

        results.push(RoundPoints {
            id: entry.id(),
            points,
            position,
            gross_score: entry.gross(),
            net_score: entry.reported_net(),
        });

        // Only advance the counter once the score actually changes, so tied
        // entries all report the position of the first of their group.
        if let Some(next) = ranked.get(index + 1) {
            if next.compare_score() != entry.compare_score() {
                position = index as u32 + 2;
            }
        }
    }

    results
}

/// Compact rendering of a point value ("1", "½", "0").
pub fn format_points(points: f64) -> String {
    if points == POINTS_WIN {
        "1".into()
    } else if points == POINTS_SHARED_LEAD {
        "½".into()
    } else {
        "0".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singles(id: Uuid, gross: i32, net: i32) -> ScoreEntry {
        ScoreEntry::Singles { id, gross, net }
    }

    fn scramble(id: Uuid, gross: i32) -> ScoreEntry {
        ScoreEntry::Scramble {
            id,
            gross,
            net: None,
        }
    }

    fn by_id(results: &[RoundPoints], id: Uuid) -> &RoundPoints {
        results
            .iter()
            .find(|r| r.id == id)
            .expect("missing result for entry")
    }

    #[test]
    fn empty_field_yields_no_results() {
        assert!(calculate_round_points(&[], LeadTieRule::FlatHalf).is_empty());
    }

    #[test]
    fn sole_entrant_takes_the_week() {
        let id = Uuid::new_v4();
        let results = calculate_round_points(&[singles(id, 82, 76)], LeadTieRule::FlatHalf);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].points, POINTS_WIN);
        assert_eq!(results[0].position, 1);
        assert_eq!(results[0].net_score, Some(76));
    }

    #[test]
    fn singles_without_ties_rank_by_net() {
        let (p1, p2, p3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let entries = [
            singles(p1, 80, 70),
            singles(p2, 75, 75),
            singles(p3, 80, 80),
        ];
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        assert_eq!(
            (by_id(&results, p1).points, by_id(&results, p1).position),
            (1.0, 1)
        );
        assert_eq!(
            (by_id(&results, p2).points, by_id(&results, p2).position),
            (0.0, 2)
        );
        assert_eq!(
            (by_id(&results, p3).points, by_id(&results, p3).position),
            (0.0, 3)
        );
    }

    #[test]
    fn two_way_tie_for_the_lead_shares_half_points() {
        let (p1, p2, p3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let entries = [
            singles(p1, 78, 70),
            singles(p2, 74, 70),
            singles(p3, 75, 75),
        ];
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        assert_eq!(by_id(&results, p1).points, 0.5);
        assert_eq!(by_id(&results, p2).points, 0.5);
        assert_eq!(by_id(&results, p1).position, 1);
        assert_eq!(by_id(&results, p2).position, 1);
        assert_eq!(
            (by_id(&results, p3).points, by_id(&results, p3).position),
            (0.0, 3)
        );

        let total: f64 = results.iter().map(|r| r.points).sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn flat_half_does_not_conserve_points_on_bigger_ties() {
        // Documented behavior: three tied leaders each keep a flat half point,
        // so 1.5 points leave the round.
        let entries: Vec<ScoreEntry> = (0..3).map(|_| singles(Uuid::new_v4(), 72, 70)).collect();
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        assert!(results.iter().all(|r| r.points == 0.5 && r.position == 1));
        let total: f64 = results.iter().map(|r| r.points).sum();
        assert_eq!(total, 1.5);
    }

    #[test]
    fn split_evenly_conserves_the_single_point() {
        let entries: Vec<ScoreEntry> = (0..4).map(|_| singles(Uuid::new_v4(), 72, 70)).collect();
        let results = calculate_round_points(&entries, LeadTieRule::SplitEvenly);

        assert!(results.iter().all(|r| r.points == 0.25 && r.position == 1));
        let total: f64 = results.iter().map(|r| r.points).sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn scramble_compares_gross_and_reports_no_net() {
        let (team_a, team_b) = (Uuid::new_v4(), Uuid::new_v4());
        let entries = [scramble(team_a, 68), scramble(team_b, 71)];
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        let a = by_id(&results, team_a);
        let b = by_id(&results, team_b);
        assert_eq!((a.points, a.position, a.net_score), (1.0, 1, None));
        assert_eq!((b.points, b.position, b.net_score), (0.0, 2, None));
    }

    #[test]
    fn scramble_team_handicap_feeds_the_comparison_only() {
        let (team_a, team_b) = (Uuid::new_v4(), Uuid::new_v4());
        // Team B shoots more strokes but a handicap of 6 drops it below A.
        let entries = [
            scramble(team_a, 68),
            ScoreEntry::Scramble {
                id: team_b,
                gross: 71,
                net: Some(65),
            },
        ];
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        let b = by_id(&results, team_b);
        assert_eq!((b.points, b.position), (1.0, 1));
        assert_eq!(b.net_score, None);
        assert_eq!(by_id(&results, team_a).points, 0.0);
    }

    #[test]
    fn mid_field_ties_share_position_and_skip_the_next_rank() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let entries = [
            singles(ids[0], 70, 70),
            singles(ids[1], 72, 72),
            singles(ids[2], 72, 72),
            singles(ids[3], 75, 75),
        ];
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);

        assert_eq!(by_id(&results, ids[0]).position, 1);
        assert_eq!(by_id(&results, ids[1]).position, 2);
        assert_eq!(by_id(&results, ids[2]).position, 2);
        assert_eq!(by_id(&results, ids[3]).position, 4);
        assert_eq!(by_id(&results, ids[0]).points, 1.0);
        assert_eq!(by_id(&results, ids[2]).points, 0.0);
    }

    #[test]
    fn every_entry_produces_exactly_one_result() {
        let entries: Vec<ScoreEntry> = (0..7)
            .map(|i| singles(Uuid::new_v4(), 70 + i, 70 + i))
            .collect();
        let results = calculate_round_points(&entries, LeadTieRule::FlatHalf);
        assert_eq!(results.len(), entries.len());
        for entry in &entries {
            assert!(results.iter().any(|r| r.id == entry.id()));
        }
    }

    #[test]
    fn ranking_is_a_pure_function_of_its_input() {
        let entries: Vec<ScoreEntry> = vec![
            singles(Uuid::new_v4(), 80, 71),
            singles(Uuid::new_v4(), 79, 71),
            singles(Uuid::new_v4(), 85, 73),
        ];
        let first = calculate_round_points(&entries, LeadTieRule::FlatHalf);
        let second = calculate_round_points(&entries, LeadTieRule::FlatHalf);
        assert_eq!(first, second);
    }

    #[test]
    fn point_formatting_matches_the_scoreboard() {
        assert_eq!(format_points(1.0), "1");
        assert_eq!(format_points(0.5), "½");
        assert_eq!(format_points(0.0), "0");
    }
}
