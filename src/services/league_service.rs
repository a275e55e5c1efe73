//! League administration: creation, membership, handicaps, and teams.

use std::time::SystemTime;

use rand::Rng;
use uuid::Uuid;

use crate::{
    dao::{
        league_store::LeagueStore,
        models::{
            HandicapChangeEntity, HandicapEntity, LeagueEntity, LeagueFormat, MemberEntity,
            MemberRole, TeamEntity,
        },
    },
    dto::{
        league::{
            CreateLeagueRequest, CreateTeamRequest, JoinLeagueRequest, LeagueOverview,
            LeagueSummary, MemberSummary, TeamSummary,
        },
        validation::INVITE_CODE_LENGTH,
    },
    error::ServiceError,
    state::SharedState,
};

/// Emoji used for teams that do not pick one.
const DEFAULT_TEAM_EMOJI: &str = "⛳";

/// Alphabet for invite codes; ambiguous characters are left out.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Create a league with the caller as its owner and first member.
pub async fn create_league(
    state: &SharedState,
    owner: Uuid,
    request: CreateLeagueRequest,
) -> Result<LeagueSummary, ServiceError> {
    let store = state.require_league_store().await?;

    if request.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "league name must not be empty".into(),
        ));
    }

    if matches!(request.format, LeagueFormat::Scramble) && request.team_size.is_none() {
        return Err(ServiceError::InvalidInput(
            "scramble leagues must declare a team size".into(),
        ));
    }

    let now = SystemTime::now();
    let league = LeagueEntity {
        id: Uuid::new_v4(),
        name: request.name.trim().to_owned(),
        owner_id: owner,
        format: request.format,
        team_size: match request.format {
            LeagueFormat::Scramble => request.team_size,
            LeagueFormat::Singles => None,
        },
        rounds_per_season: request.rounds_per_season,
        invite_code: generate_invite_code(),
        webhook_url: request.webhook_url,
        created_at: now,
    };

    store.save_league(league.clone()).await?;
    store
        .save_member(MemberEntity {
            league_id: league.id,
            user_id: owner,
            role: MemberRole::Owner,
            display_name: request.display_name,
            joined_at: now,
        })
        .await?;

    Ok(league.into())
}

/// Join a league by invite code. Re-joining is a no-op that keeps the
/// existing membership (and role) untouched.
pub async fn join_league(
    state: &SharedState,
    user: Uuid,
    request: JoinLeagueRequest,
) -> Result<LeagueSummary, ServiceError> {
    let store = state.require_league_store().await?;

    let league = store
        .find_league_by_invite(request.invite_code.clone())
        .await?
        .ok_or_else(|| ServiceError::NotFound("no league with that invite code".into()))?;

    if store.find_member(league.id, user).await?.is_none() {
        store
            .save_member(MemberEntity {
                league_id: league.id,
                user_id: user,
                role: MemberRole::Member,
                display_name: request.display_name,
                joined_at: SystemTime::now(),
            })
            .await?;
    }

    Ok(league.into())
}

/// Full league view for the hub screen. Members only.
pub async fn league_overview(
    state: &SharedState,
    league_id: Uuid,
    user: Uuid,
) -> Result<LeagueOverview, ServiceError> {
    let store = state.require_league_store().await?;
    let league = require_league(&store, league_id).await?;
    require_member(&store, league_id, user).await?;

    let mut members = Vec::new();
    for member in store.list_members(league_id).await? {
        let handicap = store.find_handicap(league_id, member.user_id).await?;
        members.push(MemberSummary::from((member, handicap)));
    }

    let teams: Vec<TeamSummary> = match league.format {
        LeagueFormat::Scramble => store
            .list_teams(league_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
        LeagueFormat::Singles => Vec::new(),
    };

    let active_season = store
        .find_active_season(league_id)
        .await?
        .map(Into::into);

    Ok(LeagueOverview {
        league: league.into(),
        members,
        teams,
        active_season,
    })
}

/// Set a member's handicap, recording the edit in the audit trail. Owner only.
///
/// Already-submitted scores keep the net that was frozen at submission time;
/// the new value only applies to future submissions.
pub async fn set_handicap(
    state: &SharedState,
    league_id: Uuid,
    target_user: Uuid,
    by: Uuid,
    strokes: u32,
) -> Result<MemberSummary, ServiceError> {
    let store = state.require_league_store().await?;
    require_league(&store, league_id).await?;
    ensure_owner(&store, league_id, by).await?;

    if strokes > 54 {
        return Err(ServiceError::InvalidInput(
            "handicap must be between 0 and 54 strokes".into(),
        ));
    }

    let member = store
        .find_member(league_id, target_user)
        .await?
        .ok_or_else(|| ServiceError::NotFound("no such member in this league".into()))?;

    let now = SystemTime::now();
    let old_strokes = store
        .find_handicap(league_id, target_user)
        .await?
        .map(|h| h.strokes)
        .unwrap_or(0);

    let handicap = HandicapEntity {
        league_id,
        user_id: target_user,
        strokes,
        updated_by: by,
        updated_at: now,
    };
    store.upsert_handicap(handicap.clone()).await?;
    store
        .append_handicap_change(HandicapChangeEntity {
            league_id,
            user_id: target_user,
            old_strokes,
            new_strokes: strokes,
            updated_by: by,
            updated_at: now,
        })
        .await?;

    Ok(MemberSummary::from((member, Some(handicap))))
}

/// Create a scramble team. Owner only; the roster must be league members and
/// fit the league's team size.
pub async fn create_team(
    state: &SharedState,
    league_id: Uuid,
    by: Uuid,
    request: CreateTeamRequest,
) -> Result<TeamSummary, ServiceError> {
    let store = state.require_league_store().await?;
    let league = require_league(&store, league_id).await?;
    ensure_owner(&store, league_id, by).await?;

    if !matches!(league.format, LeagueFormat::Scramble) {
        return Err(ServiceError::InvalidState(
            "teams only exist in scramble leagues".into(),
        ));
    }

    if request.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "team name must not be empty".into(),
        ));
    }

    if let Some(size) = league.team_size {
        if request.members.len() > size as usize {
            return Err(ServiceError::InvalidInput(format!(
                "this league plays teams of at most {size}"
            )));
        }
    }

    for member in &request.members {
        if store.find_member(league_id, *member).await?.is_none() {
            return Err(ServiceError::InvalidInput(format!(
                "user `{member}` is not a member of this league"
            )));
        }
        if let Some(existing) = store.find_team_for_user(league_id, *member).await? {
            return Err(ServiceError::InvalidInput(format!(
                "user `{member}` already plays on team `{}`",
                existing.name
            )));
        }
    }

    let team = TeamEntity {
        id: Uuid::new_v4(),
        league_id,
        season_id: store.find_active_season(league_id).await?.map(|s| s.id),
        name: request.name.trim().to_owned(),
        emoji: request
            .emoji
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEAM_EMOJI.into()),
        handicap: 0,
        members: request.members,
        created_at: SystemTime::now(),
    };

    store.save_team(team.clone()).await?;
    Ok(team.into())
}

/// Delete a team. Owner only.
pub async fn delete_team(
    state: &SharedState,
    team_id: Uuid,
    by: Uuid,
) -> Result<(), ServiceError> {
    let store = state.require_league_store().await?;

    let team = store
        .find_team(team_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{team_id}` not found")))?;
    ensure_owner(&store, team.league_id, by).await?;

    if store.delete_team(team_id).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("team `{team_id}` not found")))
    }
}

/// Set a team's handicap. Owner only.
pub async fn set_team_handicap(
    state: &SharedState,
    team_id: Uuid,
    by: Uuid,
    strokes: u32,
) -> Result<TeamSummary, ServiceError> {
    let store = state.require_league_store().await?;

    let mut team = store
        .find_team(team_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{team_id}` not found")))?;
    ensure_owner(&store, team.league_id, by).await?;

    if strokes > 54 {
        return Err(ServiceError::InvalidInput(
            "team handicap must be between 0 and 54 strokes".into(),
        ));
    }

    team.handicap = strokes;
    store.save_team(team.clone()).await?;
    Ok(team.into())
}

/// Fetch a league or fail with not-found.
pub(crate) async fn require_league(
    store: &std::sync::Arc<dyn LeagueStore>,
    league_id: Uuid,
) -> Result<LeagueEntity, ServiceError> {
    store
        .find_league(league_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("league `{league_id}` not found")))
}

/// Fail unless the user belongs to the league.
pub(crate) async fn require_member(
    store: &std::sync::Arc<dyn LeagueStore>,
    league_id: Uuid,
    user: Uuid,
) -> Result<MemberEntity, ServiceError> {
    store
        .find_member(league_id, user)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("not a member of this league".into()))
}

/// Fail unless the user owns the league.
pub(crate) async fn ensure_owner(
    store: &std::sync::Arc<dyn LeagueStore>,
    league_id: Uuid,
    user: Uuid,
) -> Result<(), ServiceError> {
    let member = require_member(store, league_id, user).await?;
    if matches!(member.role, MemberRole::Owner) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized(
            "only the league owner may do this".into(),
        ))
    }
}

fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let index = rng.random_range(0..INVITE_ALPHABET.len());
            INVITE_ALPHABET[index] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validation::validate_invite_code;

    #[test]
    fn generated_invite_codes_pass_their_own_validation() {
        for _ in 0..32 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_LENGTH);
            assert!(validate_invite_code(&code).is_ok(), "bad code: {code}");
        }
    }
}
