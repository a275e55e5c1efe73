//! Outbound league announcements.
//!
//! The round and season controllers emit fire-and-forget events through the
//! [`NotificationSink`] trait; delivery failures are logged by the caller and
//! never block or fail the operation that triggered them. The shipped backend
//! posts Discord webhook embeds ([`discord::DiscordSink`]).

pub mod discord;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::models::LeagueFormat;

/// One row of a completed round, already sorted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Player or team display name.
    pub name: String,
    /// Raw stroke count.
    pub gross_score: i32,
    /// Net score (singles only).
    pub net_score: Option<i32>,
    /// Match-play points earned.
    pub points: f64,
    /// 1-based finishing position.
    pub position: u32,
}

/// League event pushed to the announcement channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Announcement {
    /// A round just opened for score submissions.
    RoundOpen {
        /// League display name.
        league: String,
        /// Season sequence number.
        season_number: u32,
        /// Round sequence number.
        round_number: u32,
        /// Course being played.
        course_name: String,
        /// Course par.
        course_par: u32,
        /// Names of everyone expected to play.
        participants: Vec<String>,
    },
    /// A round finished and results are frozen.
    RoundComplete {
        /// League display name.
        league: String,
        /// Season sequence number.
        season_number: u32,
        /// Round sequence number.
        round_number: u32,
        /// Course that was played.
        course_name: String,
        /// Course par.
        course_par: u32,
        /// League format, controls how score lines are rendered.
        format: LeagueFormat,
        /// Result rows sorted by finishing position.
        rows: Vec<ResultRow>,
    },
    /// A season was closed and has a champion.
    SeasonComplete {
        /// League display name.
        league: String,
        /// Season sequence number.
        season_number: u32,
        /// Display name of the standings leader.
        champion: String,
        /// The champion's point total.
        total_points: f64,
    },
}

/// Error raised while delivering an announcement.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The HTTP request could not be sent.
    #[error("webhook request failed")]
    Request(#[source] reqwest::Error),
    /// The webhook endpoint rejected the payload.
    #[error("webhook endpoint returned status {status}")]
    Rejected {
        /// HTTP status code from the endpoint.
        status: reqwest::StatusCode,
    },
}

/// Fire-and-forget sink for league announcements.
pub trait NotificationSink: Send + Sync {
    /// Deliver one announcement to the league's configured webhook endpoint.
    fn announce(
        &self,
        webhook_url: &str,
        announcement: Announcement,
    ) -> BoxFuture<'static, Result<(), NotifyError>>;
}
