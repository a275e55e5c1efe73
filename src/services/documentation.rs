use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Clubhouse backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::leagues::create_league,
        crate::routes::leagues::join_league,
        crate::routes::leagues::league_overview,
        crate::routes::leagues::set_handicap,
        crate::routes::leagues::create_team,
        crate::routes::leagues::delete_team,
        crate::routes::leagues::set_team_handicap,
        crate::routes::seasons::start_season,
        crate::routes::seasons::end_season,
        crate::routes::seasons::standings,
        crate::routes::rounds::round_board,
        crate::routes::rounds::submit_score,
        crate::routes::rounds::complete_round,
        crate::routes::rounds::parse_scorecard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::league::CreateLeagueRequest,
            crate::dto::league::JoinLeagueRequest,
            crate::dto::league::HandicapRequest,
            crate::dto::league::CreateTeamRequest,
            crate::dto::league::TeamHandicapRequest,
            crate::dto::league::LeagueSummary,
            crate::dto::league::LeagueOverview,
            crate::dto::round::SubmitScoreRequest,
            crate::dto::round::SubmitScoreResponse,
            crate::dto::round::RoundBoard,
            crate::dto::round::CompleteRoundResponse,
            crate::dto::season::SeasonStartResponse,
            crate::dto::season::StandingsTable,
            crate::dto::scorecard::ParseScorecardRequest,
            crate::dto::scorecard::ParseScorecardResponse,
            crate::dao::models::LeagueFormat,
            crate::dao::models::MemberRole,
            crate::state::lifecycle::RoundStatus,
            crate::state::lifecycle::SeasonStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "leagues", description = "League, membership, handicap, and team management"),
        (name = "seasons", description = "Season lifecycle and standings"),
        (name = "rounds", description = "Score submission and round completion"),
        (name = "scorecards", description = "Scorecard OCR"),
    )
)]
pub struct ApiDoc;
