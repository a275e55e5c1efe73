use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc, serialize_to_document},
    options::IndexOptions,
};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};
use crate::dao::{
    league_store::{LeagueStore, StandingDelta},
    models::{
        HandicapChangeEntity, HandicapEntity, LeagueEntity, MemberEntity, RoundEntity,
        RoundResultEntity, ScoreEntity, SeasonEntity, SeasonStandingEntity, TeamEntity,
    },
    storage::StorageResult,
};
use crate::state::lifecycle::{RoundStatus, SeasonStatus};

const LEAGUES: &str = "leagues";
const MEMBERS: &str = "members";
const HANDICAPS: &str = "handicaps";
const HANDICAP_CHANGES: &str = "handicap_changes";
const TEAMS: &str = "teams";
const SEASONS: &str = "seasons";
const ROUNDS: &str = "rounds";
const SCORES: &str = "scores";
const ROUND_RESULTS: &str = "round_results";
const SEASON_STANDINGS: &str = "season_standings";

/// MongoDB-backed [`LeagueStore`].
#[derive(Clone)]
pub struct MongoLeagueStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

fn build_connection(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);
    Ok((client, database))
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::Ping { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) = build_connection(&self.config)?;
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::Ping { source })?;

        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoLeagueStore {
    /// Connect to MongoDB, verify connectivity, and ensure the unique indexes
    /// that back the (round, participant) and (season, participant) keys.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = build_connection(&config)?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.inner.ping().await?;
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let unique_indexes: [(&'static str, &'static str, Document); 8] = [
            (LEAGUES, "invite_code", doc! { "invite_code": 1 }),
            (MEMBERS, "league_id,user_id", doc! { "league_id": 1, "user_id": 1 }),
            (HANDICAPS, "league_id,user_id", doc! { "league_id": 1, "user_id": 1 }),
            (SEASONS, "league_id,season_number", doc! { "league_id": 1, "season_number": 1 }),
            (ROUNDS, "season_id,round_number", doc! { "season_id": 1, "round_number": 1 }),
            (SCORES, "round_id,entity_id", doc! { "round_id": 1, "entity_id": 1 }),
            (ROUND_RESULTS, "round_id,entity_id", doc! { "round_id": 1, "entity_id": 1 }),
            (SEASON_STANDINGS, "season_id,entity_id", doc! { "season_id": 1, "entity_id": 1 }),
        ];

        for (collection, index, keys) in unique_indexes {
            let model = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .name(Some(format!("{collection}_key_idx")))
                        .unique(Some(true))
                        .build(),
                )
                .build();

            database
                .collection::<Document>(collection)
                .create_index(model)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection,
                    index,
                    source,
                })?;
        }

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.database().await.collection::<T>(name)
    }

    async fn replace_upsert<T>(
        &self,
        collection: &'static str,
        filter: Document,
        entity: &T,
        op: &'static str,
    ) -> MongoResult<()>
    where
        T: Serialize + Send + Sync,
    {
        self.collection::<T>(collection)
            .await
            .replace_one(filter, entity)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Query { op, source })?;
        Ok(())
    }

    async fn find_one_by<T>(
        &self,
        collection: &'static str,
        filter: Document,
        op: &'static str,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        self.collection::<T>(collection)
            .await
            .find_one(filter)
            .await
            .map_err(|source| MongoDaoError::Query { op, source })
    }

    async fn find_all<T>(
        &self,
        collection: &'static str,
        filter: Document,
        sort: Option<Document>,
        op: &'static str,
    ) -> MongoResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let collection = self.collection::<T>(collection).await;
        let mut find = collection.find(filter);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }

        find.await
            .map_err(|source| MongoDaoError::Query { op, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::Query { op, source })
    }

    async fn save_league(&self, league: LeagueEntity) -> MongoResult<()> {
        let filter = doc! { "id": league.id.to_string() };
        self.replace_upsert(LEAGUES, filter, &league, "save_league")
            .await
    }

    async fn find_league(&self, id: Uuid) -> MongoResult<Option<LeagueEntity>> {
        self.find_one_by(LEAGUES, doc! { "id": id.to_string() }, "find_league")
            .await
    }

    async fn find_league_by_invite(&self, invite_code: &str) -> MongoResult<Option<LeagueEntity>> {
        self.find_one_by(
            LEAGUES,
            doc! { "invite_code": invite_code },
            "find_league_by_invite",
        )
        .await
    }

    async fn save_member(&self, member: MemberEntity) -> MongoResult<()> {
        let filter = doc! {
            "league_id": member.league_id.to_string(),
            "user_id": member.user_id.to_string(),
        };
        self.replace_upsert(MEMBERS, filter, &member, "save_member")
            .await
    }

    async fn list_members(&self, league_id: Uuid) -> MongoResult<Vec<MemberEntity>> {
        self.find_all(
            MEMBERS,
            doc! { "league_id": league_id.to_string() },
            Some(doc! { "joined_at": 1 }),
            "list_members",
        )
        .await
    }

    async fn find_member(&self, league_id: Uuid, user_id: Uuid) -> MongoResult<Option<MemberEntity>> {
        self.find_one_by(
            MEMBERS,
            doc! { "league_id": league_id.to_string(), "user_id": user_id.to_string() },
            "find_member",
        )
        .await
    }

    async fn upsert_handicap(&self, handicap: HandicapEntity) -> MongoResult<()> {
        let filter = doc! {
            "league_id": handicap.league_id.to_string(),
            "user_id": handicap.user_id.to_string(),
        };
        self.replace_upsert(HANDICAPS, filter, &handicap, "upsert_handicap")
            .await
    }

    async fn find_handicap(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> MongoResult<Option<HandicapEntity>> {
        self.find_one_by(
            HANDICAPS,
            doc! { "league_id": league_id.to_string(), "user_id": user_id.to_string() },
            "find_handicap",
        )
        .await
    }

    async fn append_handicap_change(&self, change: HandicapChangeEntity) -> MongoResult<()> {
        self.collection::<HandicapChangeEntity>(HANDICAP_CHANGES)
            .await
            .insert_one(&change)
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "append_handicap_change",
                source,
            })?;
        Ok(())
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let filter = doc! { "id": team.id.to_string() };
        self.replace_upsert(TEAMS, filter, &team, "save_team").await
    }

    async fn delete_team(&self, team_id: Uuid) -> MongoResult<bool> {
        let result = self
            .collection::<TeamEntity>(TEAMS)
            .await
            .delete_one(doc! { "id": team_id.to_string() })
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "delete_team",
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn find_team(&self, team_id: Uuid) -> MongoResult<Option<TeamEntity>> {
        self.find_one_by(TEAMS, doc! { "id": team_id.to_string() }, "find_team")
            .await
    }

    async fn list_teams(&self, league_id: Uuid) -> MongoResult<Vec<TeamEntity>> {
        self.find_all(
            TEAMS,
            doc! { "league_id": league_id.to_string() },
            Some(doc! { "created_at": 1 }),
            "list_teams",
        )
        .await
    }

    async fn find_team_for_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> MongoResult<Option<TeamEntity>> {
        self.find_one_by(
            TEAMS,
            doc! { "league_id": league_id.to_string(), "members": user_id.to_string() },
            "find_team_for_user",
        )
        .await
    }

    async fn attach_teams_to_season(&self, league_id: Uuid, season_id: Uuid) -> MongoResult<()> {
        self.collection::<TeamEntity>(TEAMS)
            .await
            .update_many(
                doc! { "league_id": league_id.to_string() },
                doc! { "$set": { "season_id": season_id.to_string() } },
            )
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "attach_teams_to_season",
                source,
            })?;
        Ok(())
    }

    async fn save_season(&self, season: SeasonEntity) -> MongoResult<()> {
        let filter = doc! { "id": season.id.to_string() };
        self.replace_upsert(SEASONS, filter, &season, "save_season")
            .await
    }

    async fn find_season(&self, id: Uuid) -> MongoResult<Option<SeasonEntity>> {
        self.find_one_by(SEASONS, doc! { "id": id.to_string() }, "find_season")
            .await
    }

    async fn find_active_season(&self, league_id: Uuid) -> MongoResult<Option<SeasonEntity>> {
        self.find_one_by(
            SEASONS,
            doc! {
                "league_id": league_id.to_string(),
                "status": SeasonStatus::Active.as_str(),
            },
            "find_active_season",
        )
        .await
    }

    async fn latest_season_number(&self, league_id: Uuid) -> MongoResult<Option<u32>> {
        let latest: Option<SeasonEntity> = self
            .collection::<SeasonEntity>(SEASONS)
            .await
            .find_one(doc! { "league_id": league_id.to_string() })
            .sort(doc! { "season_number": -1 })
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "latest_season_number",
                source,
            })?;
        Ok(latest.map(|season| season.season_number))
    }

    async fn transition_season(
        &self,
        id: Uuid,
        from: SeasonStatus,
        to: SeasonStatus,
    ) -> MongoResult<bool> {
        if !from.can_advance_to(to) {
            return Ok(false);
        }

        let result = self
            .collection::<SeasonEntity>(SEASONS)
            .await
            .update_one(
                doc! { "id": id.to_string(), "status": from.as_str() },
                doc! { "$set": { "status": to.as_str() } },
            )
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "transition_season",
                source,
            })?;
        Ok(result.modified_count > 0)
    }

    async fn save_round(&self, round: RoundEntity) -> MongoResult<()> {
        let filter = doc! { "id": round.id.to_string() };
        self.replace_upsert(ROUNDS, filter, &round, "save_round").await
    }

    async fn find_round(&self, id: Uuid) -> MongoResult<Option<RoundEntity>> {
        self.find_one_by(ROUNDS, doc! { "id": id.to_string() }, "find_round")
            .await
    }

    async fn list_rounds(&self, season_id: Uuid) -> MongoResult<Vec<RoundEntity>> {
        self.find_all(
            ROUNDS,
            doc! { "season_id": season_id.to_string() },
            Some(doc! { "round_number": 1 }),
            "list_rounds",
        )
        .await
    }

    async fn next_pending_round(&self, season_id: Uuid) -> MongoResult<Option<RoundEntity>> {
        self.collection::<RoundEntity>(ROUNDS)
            .await
            .find_one(doc! {
                "season_id": season_id.to_string(),
                "status": RoundStatus::Pending.as_str(),
            })
            .sort(doc! { "round_number": 1 })
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "next_pending_round",
                source,
            })
    }

    async fn transition_round(
        &self,
        id: Uuid,
        from: RoundStatus,
        to: RoundStatus,
    ) -> MongoResult<bool> {
        if !from.can_advance_to(to) {
            return Ok(false);
        }

        let result = self
            .collection::<RoundEntity>(ROUNDS)
            .await
            .update_one(
                doc! { "id": id.to_string(), "status": from.as_str() },
                doc! { "$set": { "status": to.as_str() } },
            )
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "transition_round",
                source,
            })?;
        Ok(result.modified_count > 0)
    }

    async fn upsert_score(&self, score: ScoreEntity) -> MongoResult<()> {
        let filter = doc! {
            "round_id": score.round_id.to_string(),
            "entity_id": score.entity_id.to_string(),
        };
        self.replace_upsert(SCORES, filter, &score, "upsert_score")
            .await
    }

    async fn list_scores(&self, round_id: Uuid) -> MongoResult<Vec<ScoreEntity>> {
        self.find_all(
            SCORES,
            doc! { "round_id": round_id.to_string() },
            None,
            "list_scores",
        )
        .await
    }

    async fn insert_round_result(&self, result: RoundResultEntity) -> MongoResult<bool> {
        let filter = doc! {
            "round_id": result.round_id.to_string(),
            "entity_id": result.entity_id.to_string(),
        };

        // $setOnInsert leaves an existing result untouched, so a retried or
        // concurrent completion can never rewrite frozen rows. The filter
        // equality fields are copied onto the inserted document by the server.
        let mut fields = serialize_to_document(&result).map_err(|source| MongoDaoError::Encode {
            op: "insert_round_result",
            source,
        })?;
        fields.remove("round_id");
        fields.remove("entity_id");

        let outcome = self
            .collection::<RoundResultEntity>(ROUND_RESULTS)
            .await
            .update_one(filter, doc! { "$setOnInsert": fields })
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "insert_round_result",
                source,
            })?;
        Ok(outcome.upserted_id.is_some())
    }

    async fn list_round_results(&self, round_id: Uuid) -> MongoResult<Vec<RoundResultEntity>> {
        self.find_all(
            ROUND_RESULTS,
            doc! { "round_id": round_id.to_string() },
            Some(doc! { "position": 1 }),
            "list_round_results",
        )
        .await
    }

    async fn seed_standing(&self, standing: SeasonStandingEntity) -> MongoResult<()> {
        let filter = doc! {
            "season_id": standing.season_id.to_string(),
            "entity_id": standing.entity_id.to_string(),
        };
        self.replace_upsert(SEASON_STANDINGS, filter, &standing, "seed_standing")
            .await
    }

    async fn apply_standing_delta(
        &self,
        season_id: Uuid,
        entity_id: Uuid,
        delta: StandingDelta,
    ) -> MongoResult<()> {
        let filter = doc! {
            "season_id": season_id.to_string(),
            "entity_id": entity_id.to_string(),
        };

        // Server-side $inc so concurrent completions can never lose updates;
        // upsert covers participants who joined after the season was seeded.
        self.collection::<SeasonStandingEntity>(SEASON_STANDINGS)
            .await
            .update_one(
                filter,
                doc! { "$inc": {
                    "total_points": delta.points,
                    "wins": i64::from(delta.win),
                    "ties": i64::from(delta.tie),
                    "rounds_played": 1_i64,
                } },
            )
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::Query {
                op: "apply_standing_delta",
                source,
            })?;
        Ok(())
    }

    async fn list_standings(&self, season_id: Uuid) -> MongoResult<Vec<SeasonStandingEntity>> {
        self.find_all(
            SEASON_STANDINGS,
            doc! { "season_id": season_id.to_string() },
            None,
            "list_standings",
        )
        .await
    }
}

impl LeagueStore for MongoLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_league(league).await.map_err(Into::into) })
    }

    fn find_league(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_league(id).await.map_err(Into::into) })
    }

    fn find_league_by_invite(
        &self,
        invite_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_league_by_invite(&invite_code)
                .await
                .map_err(Into::into)
        })
    }

    fn save_member(&self, member: MemberEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_member(member).await.map_err(Into::into) })
    }

    fn list_members(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_members(league_id).await.map_err(Into::into) })
    }

    fn find_member(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MemberEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_member(league_id, user_id)
                .await
                .map_err(Into::into)
        })
    }

    fn upsert_handicap(&self, handicap: HandicapEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_handicap(handicap).await.map_err(Into::into) })
    }

    fn find_handicap(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<HandicapEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_handicap(league_id, user_id)
                .await
                .map_err(Into::into)
        })
    }

    fn append_handicap_change(
        &self,
        change: HandicapChangeEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .append_handicap_change(change)
                .await
                .map_err(Into::into)
        })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn delete_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(team_id).await.map_err(Into::into) })
    }

    fn find_team(&self, team_id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(team_id).await.map_err(Into::into) })
    }

    fn list_teams(&self, league_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams(league_id).await.map_err(Into::into) })
    }

    fn find_team_for_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_team_for_user(league_id, user_id)
                .await
                .map_err(Into::into)
        })
    }

    fn attach_teams_to_season(
        &self,
        league_id: Uuid,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .attach_teams_to_season(league_id, season_id)
                .await
                .map_err(Into::into)
        })
    }

    fn save_season(&self, season: SeasonEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_season(season).await.map_err(Into::into) })
    }

    fn find_season(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_season(id).await.map_err(Into::into) })
    }

    fn find_active_season(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<SeasonEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_active_season(league_id).await.map_err(Into::into) })
    }

    fn latest_season_number(
        &self,
        league_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .latest_season_number(league_id)
                .await
                .map_err(Into::into)
        })
    }

    fn transition_season(
        &self,
        id: Uuid,
        from: SeasonStatus,
        to: SeasonStatus,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .transition_season(id, from, to)
                .await
                .map_err(Into::into)
        })
    }

    fn save_round(&self, round: RoundEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_round(round).await.map_err(Into::into) })
    }

    fn find_round(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_round(id).await.map_err(Into::into) })
    }

    fn list_rounds(&self, season_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<RoundEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_rounds(season_id).await.map_err(Into::into) })
    }

    fn next_pending_round(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<RoundEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.next_pending_round(season_id).await.map_err(Into::into) })
    }

    fn transition_round(
        &self,
        id: Uuid,
        from: RoundStatus,
        to: RoundStatus,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .transition_round(id, from, to)
                .await
                .map_err(Into::into)
        })
    }

    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_score(score).await.map_err(Into::into) })
    }

    fn list_scores(&self, round_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_scores(round_id).await.map_err(Into::into) })
    }

    fn insert_round_result(
        &self,
        result: RoundResultEntity,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.insert_round_result(result).await.map_err(Into::into) })
    }

    fn list_round_results(
        &self,
        round_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RoundResultEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_round_results(round_id).await.map_err(Into::into) })
    }

    fn seed_standing(
        &self,
        standing: SeasonStandingEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.seed_standing(standing).await.map_err(Into::into) })
    }

    fn apply_standing_delta(
        &self,
        season_id: Uuid,
        entity_id: Uuid,
        delta: StandingDelta,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .apply_standing_delta(season_id, entity_id, delta)
                .await
                .map_err(Into::into)
        })
    }

    fn list_standings(
        &self,
        season_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<SeasonStandingEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_standings(season_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
