/// Best-effort league announcements.
pub mod announcements;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// League administration: creation, membership, handicaps, teams.
pub mod league_service;
/// Round lifecycle: submission, completion, results, standings.
pub mod round_service;
/// Scorecard OCR worker client.
pub mod scorecard;
/// Season lifecycle and standings.
pub mod season_service;
/// Storage connectivity supervisor.
pub mod storage_supervisor;
