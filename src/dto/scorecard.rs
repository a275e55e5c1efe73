//! Scorecard OCR DTOs.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use validator::Validate;

/// Payload asking the remote worker to read a captured scorecard.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ParseScorecardRequest {
    /// PNG capture of the scorecard, base64 encoded.
    #[validate(length(min = 1))]
    pub image_base64: String,
    /// Player name, used by the worker to pick the right scorecard row.
    #[validate(length(min = 1, max = 64))]
    pub player_name: String,
}

/// Outcome of a scorecard read. A failed read is a normal response, never an
/// HTTP error: the client degrades to manual entry.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParseScorecardResponse {
    /// Whether a score was extracted.
    pub success: bool,
    /// The extracted gross score, when successful.
    pub score: Option<i32>,
    /// Why extraction failed, when it did.
    pub error: Option<String>,
}

impl ParseScorecardResponse {
    /// A successful read.
    pub fn found(score: i32) -> Self {
        Self {
            success: true,
            score: Some(score),
            error: None,
        }
    }

    /// A failed read that the client should recover from manually.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            score: None,
            error: Some(error.into()),
        }
    }
}
