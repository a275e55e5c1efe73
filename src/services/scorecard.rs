//! Client for the remote scorecard OCR worker.
//!
//! The worker is an opaque collaborator: it receives a captured scorecard
//! image and answers with an optional gross score. Every failure mode (no
//! worker configured, network error, rejection, unreadable card) degrades to
//! a `success = false` response so the player falls back to manual entry;
//! nothing on this path ever blocks a score submission.

use serde::Serialize;
use tracing::warn;

use crate::dto::scorecard::ParseScorecardResponse;

#[derive(Debug, Serialize)]
struct WorkerRequest<'a> {
    image_base64: &'a str,
    player_name: &'a str,
}

/// HTTP client for the scorecard worker.
#[derive(Clone)]
pub struct ScorecardClient {
    client: reqwest::Client,
    worker_url: Option<String>,
}

impl ScorecardClient {
    /// Build a client; `worker_url` comes from the application config.
    pub fn new(worker_url: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            worker_url: worker_url.map(str::to_owned),
        }
    }

    /// Ask the worker to read a gross score off a captured scorecard.
    pub async fn extract_score(
        &self,
        image_base64: &str,
        player_name: &str,
    ) -> ParseScorecardResponse {
        let Some(url) = self.worker_url.as_deref() else {
            return ParseScorecardResponse::failed("scorecard worker URL not configured");
        };

        let request = WorkerRequest {
            image_base64,
            player_name,
        };

        let response = match self.client.post(url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "scorecard worker request failed");
                return ParseScorecardResponse::failed(format!("network error: {err}"));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "scorecard worker rejected the capture");
            return ParseScorecardResponse::failed(format!("worker error: {status}"));
        }

        match response.json::<ParseScorecardResponse>().await {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "scorecard worker answered with an unreadable payload");
                ParseScorecardResponse::failed(format!("malformed worker response: {err}"))
            }
        }
    }
}
