//! End-to-end lifecycle tests over the in-memory store: seasons open with a
//! randomized schedule, scores flow in, rounds complete and hand out points,
//! standings accumulate exactly once, and the next round opens on its own.

mod support;

use clubhouse_back::{
    dao::models::LeagueFormat,
    dto::{
        league::{CreateLeagueRequest, CreateTeamRequest, JoinLeagueRequest},
        round::SubmitScoreRequest,
    },
    error::ServiceError,
    notify::Announcement,
    services::{league_service, round_service, season_service},
    state::{SharedState, lifecycle::RoundStatus},
};
use support::test_state;
use uuid::Uuid;

const WEBHOOK: &str = "https://hooks.example.test/league";

fn submit(gross: i32) -> SubmitScoreRequest {
    SubmitScoreRequest {
        gross_score: gross,
        scorecard_image_url: None,
    }
}

async fn singles_league(
    state: &SharedState,
    owner: Uuid,
    others: &[(Uuid, &str)],
    rounds_per_season: u32,
) -> clubhouse_back::dto::league::LeagueSummary {
    let league = league_service::create_league(
        state,
        owner,
        CreateLeagueRequest {
            name: "Sunday Swingers".into(),
            format: LeagueFormat::Singles,
            team_size: None,
            rounds_per_season,
            webhook_url: Some(WEBHOOK.into()),
            display_name: "Ace".into(),
        },
    )
    .await
    .expect("create league");

    for (user, name) in others {
        league_service::join_league(
            state,
            *user,
            JoinLeagueRequest {
                invite_code: league.invite_code.clone(),
                display_name: (*name).into(),
            },
        )
        .await
        .expect("join league");
    }

    league
}

#[tokio::test]
async fn singles_season_runs_through_auto_completion() {
    let (state, sink) = test_state().await;
    let (owner, p2, p3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie"), (p3, "Chip")], 4).await;
    league_service::set_handicap(&state, league.id, owner, owner, 10)
        .await
        .expect("set handicap");

    let start = season_service::start_season(&state, league.id, owner)
        .await
        .expect("start season");
    assert_eq!(start.season.season_number, 1);
    assert_eq!(start.rounds.len(), 4);
    assert_eq!(start.rounds[0].status, RoundStatus::Active);
    assert!(
        start.rounds[1..]
            .iter()
            .all(|round| round.status == RoundStatus::Pending)
    );

    let round1 = start.rounds[0].id;

    let response = round_service::submit_score(&state, round1, owner, submit(80))
        .await
        .expect("owner submits");
    assert!(!response.round_completed);
    assert_eq!(response.score.net_score, Some(70));
    assert_eq!(response.score.handicap_used, Some(10));

    let response = round_service::submit_score(&state, round1, p2, submit(75))
        .await
        .expect("p2 submits");
    assert!(!response.round_completed);

    // Last score in: the round completes as a side effect.
    let response = round_service::submit_score(&state, round1, p3, submit(80))
        .await
        .expect("p3 submits");
    assert!(response.round_completed);

    let store = state.require_league_store().await.unwrap();
    let round = store.find_round(round1).await.unwrap().unwrap();
    assert_eq!(round.status, RoundStatus::Completed);

    // Net 70 beats 75 and 80; only the winner scores.
    let results = store.list_round_results(round1).await.unwrap();
    assert_eq!(results.len(), 3);
    let winner = results.iter().find(|r| r.entity_id == owner).unwrap();
    assert_eq!(winner.points, 1.0);
    assert_eq!(winner.position, 1);
    assert_eq!(winner.net_score, Some(70));
    let runner_up = results.iter().find(|r| r.entity_id == p2).unwrap();
    assert_eq!((runner_up.points, runner_up.position), (0.0, 2));

    // Round 2 opened automatically; 3 and 4 are untouched.
    let rounds = store.list_rounds(start.season.id).await.unwrap();
    assert_eq!(rounds[1].status, RoundStatus::Active);
    assert_eq!(rounds[2].status, RoundStatus::Pending);
    assert_eq!(rounds[3].status, RoundStatus::Pending);

    // Standings accumulated exactly once per participant.
    let standings = store.list_standings(start.season.id).await.unwrap();
    assert_eq!(standings.len(), 3);
    let owner_row = standings.iter().find(|s| s.entity_id == owner).unwrap();
    assert_eq!(owner_row.total_points, 1.0);
    assert_eq!((owner_row.wins, owner_row.ties, owner_row.rounds_played), (1, 0, 1));
    let p2_row = standings.iter().find(|s| s.entity_id == p2).unwrap();
    assert_eq!(p2_row.total_points, 0.0);
    assert_eq!(p2_row.rounds_played, 1);

    // Announcements: round 1 open, round 1 complete, round 2 open.
    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|(url, _)| url == WEBHOOK));
    assert!(matches!(
        events[0].1,
        Announcement::RoundOpen { round_number: 1, .. }
    ));
    assert!(matches!(
        events[1].1,
        Announcement::RoundComplete { round_number: 1, .. }
    ));
    assert!(matches!(
        events[2].1,
        Announcement::RoundOpen { round_number: 2, .. }
    ));

    if let Announcement::RoundComplete { rows, .. } = &events[1].1 {
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Ace");
        assert_eq!(rows[0].points, 1.0);
    }
}

#[tokio::test]
async fn completing_a_completed_round_changes_nothing() {
    let (state, sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 2).await;
    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    round_service::submit_score(&state, round1, owner, submit(72))
        .await
        .unwrap();
    round_service::submit_score(&state, round1, p2, submit(75))
        .await
        .unwrap();

    let store = state.require_league_store().await.unwrap();
    let standings_before = store.list_standings(start.season.id).await.unwrap();
    let results_before = store.list_round_results(round1).await.unwrap();
    let events_before = sink.events().len();

    let rerun = round_service::complete_round(&state, round1)
        .await
        .expect("rerun is safe");
    assert!(rerun.already_completed);
    assert_eq!(rerun.results.len(), 2);
    assert!(rerun.next_round.is_none());

    assert_eq!(
        store.list_standings(start.season.id).await.unwrap(),
        standings_before
    );
    assert_eq!(store.list_round_results(round1).await.unwrap(), results_before);
    assert_eq!(sink.events().len(), events_before);
}

#[tokio::test]
async fn handicap_edits_never_rewrite_a_submitted_net() {
    let (state, _sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 1).await;
    league_service::set_handicap(&state, league.id, owner, owner, 10)
        .await
        .unwrap();

    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    let response = round_service::submit_score(&state, round1, owner, submit(80))
        .await
        .unwrap();
    assert_eq!(response.score.net_score, Some(70));

    // The edit lands between submission and completion.
    league_service::set_handicap(&state, league.id, owner, owner, 5)
        .await
        .unwrap();

    round_service::submit_score(&state, round1, p2, submit(75))
        .await
        .unwrap();

    let store = state.require_league_store().await.unwrap();
    let results = store.list_round_results(round1).await.unwrap();
    let frozen = results.iter().find(|r| r.entity_id == owner).unwrap();
    assert_eq!(frozen.net_score, Some(70));
    assert_eq!(frozen.points, 1.0);
}

#[tokio::test]
async fn resubmission_overwrites_in_place_until_completion() {
    let (state, _sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 1).await;
    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    round_service::submit_score(&state, round1, owner, submit(80))
        .await
        .unwrap();
    round_service::submit_score(&state, round1, owner, submit(78))
        .await
        .unwrap();

    let store = state.require_league_store().await.unwrap();
    let scores = store.list_scores(round1).await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].gross_score, 78);

    round_service::submit_score(&state, round1, p2, submit(79))
        .await
        .unwrap();

    // The round froze on the resubmitted value, and late edits are rejected.
    let results = store.list_round_results(round1).await.unwrap();
    let winner = results.iter().find(|r| r.entity_id == owner).unwrap();
    assert_eq!(winner.gross_score, 78);

    let err = round_service::submit_score(&state, round1, owner, submit(70))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));
}

#[tokio::test]
async fn scramble_rounds_rank_teams_and_respect_team_handicaps() {
    let (state, _sink) = test_state().await;
    let (owner, p2, p3, p4, loner) = (
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
    );

    let league = league_service::create_league(
        &state,
        owner,
        CreateLeagueRequest {
            name: "Scramble Sundays".into(),
            format: LeagueFormat::Scramble,
            team_size: Some(2),
            rounds_per_season: 2,
            webhook_url: None,
            display_name: "Ace".into(),
        },
    )
    .await
    .unwrap();

    for (user, name) in [(p2, "Birdie"), (p3, "Chip"), (p4, "Duff"), (loner, "Ed")] {
        league_service::join_league(
            &state,
            user,
            JoinLeagueRequest {
                invite_code: league.invite_code.clone(),
                display_name: name.into(),
            },
        )
        .await
        .unwrap();
    }

    let team_a = league_service::create_team(
        &state,
        league.id,
        owner,
        CreateTeamRequest {
            name: "The Mulligans".into(),
            emoji: None,
            members: vec![owner, p2],
        },
    )
    .await
    .unwrap();
    let team_b = league_service::create_team(
        &state,
        league.id,
        owner,
        CreateTeamRequest {
            name: "Shankopotamus".into(),
            emoji: Some("🦛".into()),
            members: vec![p3, p4],
        },
    )
    .await
    .unwrap();

    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    // A member without a team cannot put a score in.
    let err = round_service::submit_score(&state, round1, loner, submit(70))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotOnTeam(_)));

    round_service::submit_score(&state, round1, owner, submit(68))
        .await
        .unwrap();
    let response = round_service::submit_score(&state, round1, p3, submit(71))
        .await
        .unwrap();
    assert!(response.round_completed);

    let store = state.require_league_store().await.unwrap();
    let results = store.list_round_results(round1).await.unwrap();
    assert_eq!(results.len(), 2);
    let a_result = results.iter().find(|r| r.entity_id == team_a.id).unwrap();
    assert_eq!((a_result.points, a_result.position), (1.0, 1));
    assert_eq!(a_result.net_score, None);
    let b_result = results.iter().find(|r| r.entity_id == team_b.id).unwrap();
    assert_eq!((b_result.points, b_result.position), (0.0, 2));

    // Round 2: a team handicap flips the comparison without ever appearing in
    // the frozen results.
    league_service::set_team_handicap(&state, team_b.id, owner, 6)
        .await
        .unwrap();

    let rounds = store.list_rounds(start.season.id).await.unwrap();
    let round2 = rounds[1].id;
    assert_eq!(rounds[1].status, RoundStatus::Active);

    round_service::submit_score(&state, round2, p2, submit(68))
        .await
        .unwrap();
    round_service::submit_score(&state, round2, p4, submit(71))
        .await
        .unwrap();

    let results = store.list_round_results(round2).await.unwrap();
    let b_result = results.iter().find(|r| r.entity_id == team_b.id).unwrap();
    assert_eq!((b_result.points, b_result.position), (1.0, 1));
    assert_eq!(b_result.net_score, None);

    let standings = store.list_standings(start.season.id).await.unwrap();
    assert_eq!(standings.len(), 2);
    assert!(standings.iter().all(|s| s.wins == 1 && s.rounds_played == 2));
}

#[tokio::test]
async fn submission_guards_reject_bad_input_before_any_write() {
    let (state, _sink) = test_state().await;
    let (owner, p2, outsider) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 2).await;
    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;
    let round2 = start.rounds[1].id;

    let err = round_service::submit_score(&state, round1, owner, submit(151))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    let err = round_service::submit_score(&state, round1, owner, submit(49))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = round_service::submit_score(&state, round2, owner, submit(72))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    let err = round_service::submit_score(&state, round1, outsider, submit(72))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    // Nothing was stored by any of the rejected calls.
    let store = state.require_league_store().await.unwrap();
    assert!(store.list_scores(round1).await.unwrap().is_empty());
    assert!(store.list_scores(round2).await.unwrap().is_empty());
}

#[tokio::test]
async fn a_league_runs_one_season_at_a_time() {
    let (state, _sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 1).await;
    season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();

    let err = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    let err = season_service::start_season(&state, league.id, p2)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[tokio::test]
async fn ending_a_season_crowns_the_champion_once() {
    let (state, sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 1).await;
    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    round_service::submit_score(&state, round1, owner, submit(70))
        .await
        .unwrap();
    round_service::submit_score(&state, round1, p2, submit(75))
        .await
        .unwrap();

    // The schedule is exhausted, but the season stays open for the operator.
    let store = state.require_league_store().await.unwrap();
    assert!(store.next_pending_round(start.season.id).await.unwrap().is_none());

    let table = season_service::standings(&state, start.season.id, p2)
        .await
        .unwrap();
    assert_eq!(table.rows[0].display_name, "Ace");
    assert_eq!(table.rows[0].total_points, 1.0);

    season_service::end_season(&state, start.season.id, owner)
        .await
        .unwrap();

    let events = sink.events();
    let champion_event = events
        .iter()
        .find_map(|(_, event)| match event {
            Announcement::SeasonComplete {
                champion,
                total_points,
                ..
            } => Some((champion.clone(), *total_points)),
            _ => None,
        })
        .expect("season completion announced");
    assert_eq!(champion_event, ("Ace".into(), 1.0));

    let err = season_service::end_season(&state, start.season.id, owner)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));
}

#[tokio::test]
async fn the_round_board_tracks_submissions_live() {
    let (state, _sink) = test_state().await;
    let (owner, p2) = (Uuid::new_v4(), Uuid::new_v4());

    let league = singles_league(&state, owner, &[(p2, "Birdie")], 1).await;
    let start = season_service::start_season(&state, league.id, owner)
        .await
        .unwrap();
    let round1 = start.rounds[0].id;

    round_service::submit_score(&state, round1, owner, submit(72))
        .await
        .unwrap();

    let board = round_service::round_board(&state, round1, p2).await.unwrap();
    assert_eq!(board.entries.len(), 2);

    let submitted = board.entries.iter().find(|e| e.entity_id == owner).unwrap();
    assert!(submitted.submitted);
    assert_eq!(submitted.gross_score, Some(72));
    assert_eq!(submitted.points, Some(1.0));

    let waiting = board.entries.iter().find(|e| e.entity_id == p2).unwrap();
    assert!(!waiting.submitted);
    assert_eq!(waiting.gross_score, None);
    assert_eq!(waiting.points, None);
}
