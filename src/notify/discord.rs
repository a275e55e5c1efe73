//! Discord webhook backend for league announcements, posting the same embed
//! shapes the desktop client's channel integration uses.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::{Announcement, NotificationSink, NotifyError, ResultRow};
use crate::dao::models::LeagueFormat;
use crate::scoring::{POINTS_SHARED_LEAD, POINTS_WIN};

/// Accent color used on every league embed.
const LEAGUE_COLOR: u32 = 0xF5C300;
/// Webhook display name.
const WEBHOOK_USERNAME: &str = "The Clubhouse";

#[derive(Debug, Serialize)]
struct WebhookEmbed {
    title: String,
    description: String,
    color: u32,
    footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: &'static str,
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    username: &'static str,
    embeds: Vec<WebhookEmbed>,
}

/// [`NotificationSink`] that posts embeds to a Discord webhook.
#[derive(Clone, Default)]
pub struct DiscordSink {
    client: Client,
}

impl DiscordSink {
    /// Build a sink with its own HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for DiscordSink {
    fn announce(
        &self,
        webhook_url: &str,
        announcement: Announcement,
    ) -> BoxFuture<'static, Result<(), NotifyError>> {
        let client = self.client.clone();
        let url = webhook_url.to_owned();
        let payload = WebhookPayload {
            username: WEBHOOK_USERNAME,
            embeds: vec![build_embed(announcement)],
        };

        Box::pin(async move {
            let response = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(NotifyError::Request)?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(NotifyError::Rejected {
                    status: response.status(),
                })
            }
        })
    }
}

fn build_embed(announcement: Announcement) -> WebhookEmbed {
    let (title, description) = match announcement {
        Announcement::RoundOpen {
            league,
            season_number,
            round_number,
            course_name,
            course_par,
            participants,
        } => (
            format!("🏌️ Round {round_number} Is Live — {league}"),
            format!(
                "**Course:** {course_name} (Par {course_par})\n**Season:** {season_number}\n\nGet your scores in!\n\n{}",
                participants
                    .iter()
                    .map(|name| format!("• {name}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        ),
        Announcement::RoundComplete {
            league,
            season_number,
            round_number,
            course_name,
            course_par,
            format,
            rows,
        } => (
            format!("⛳ Round {round_number} Complete — {league}"),
            format!(
                "**{course_name}** (Par {course_par})\nSeason {season_number}\n\n{}",
                result_lines(format, &rows),
            ),
        ),
        Announcement::SeasonComplete {
            league,
            season_number,
            champion,
            total_points,
        } => (
            format!("🏆 Season {season_number} Champion — {league}"),
            format!(
                "**{champion}** wins Season {season_number} with **{total_points} points**!\n\nCongratulations! 🎉"
            ),
        ),
    };

    WebhookEmbed {
        title,
        description,
        color: LEAGUE_COLOR,
        footer: EmbedFooter {
            text: WEBHOOK_USERNAME,
        },
        timestamp: OffsetDateTime::now_utc().format(&Rfc3339).ok(),
    }
}

fn result_lines(format: LeagueFormat, rows: &[ResultRow]) -> String {
    rows.iter()
        .map(|row| {
            let score_label = match (format, row.net_score) {
                (LeagueFormat::Singles, Some(net)) => {
                    format!("{} gross / {} net", row.gross_score, net)
                }
                _ => row.gross_score.to_string(),
            };
            format!(
                "{} **{}** — {} — {}",
                position_emoji(row.position),
                row.name,
                score_label,
                points_label(row.points),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn position_emoji(position: u32) -> String {
    match position {
        1 => "🥇".into(),
        2 => "🥈".into(),
        3 => "🥉".into(),
        other => format!("{other}."),
    }
}

fn points_label(points: f64) -> String {
    if points == POINTS_WIN {
        "**1 pt**".into()
    } else if points == POINTS_SHARED_LEAD {
        "**½ pt**".into()
    } else {
        "0 pts".into()
    }
}
