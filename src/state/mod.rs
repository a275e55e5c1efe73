//! Shared application state wiring the storage slot, collaborators, and the
//! in-process round-completion gate together.

pub mod lifecycle;

use std::{sync::Arc, time::Instant};

use dashmap::DashMap;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::league_store::LeagueStore,
    error::ServiceError,
    notify::NotificationSink,
    services::scorecard::ScorecardClient,
};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state shared by every route and background task.
///
/// The storage slot starts empty: the application runs in degraded mode until
/// the storage supervisor installs a backend, and returns there whenever the
/// backend is lost.
pub struct AppState {
    league_store: RwLock<Option<Arc<dyn LeagueStore>>>,
    notifier: Arc<dyn NotificationSink>,
    scorecards: ScorecardClient,
    config: Arc<AppConfig>,
    degraded: watch::Sender<bool>,
    completing_rounds: DashMap<Uuid, Instant>,
}

impl AppState {
    /// Construct the shared state. The application starts degraded until a
    /// storage backend is installed.
    pub fn new(config: AppConfig, notifier: Arc<dyn NotificationSink>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let scorecards = ScorecardClient::new(config.scorecard_worker_url());

        Arc::new(Self {
            league_store: RwLock::new(None),
            notifier,
            scorecards,
            config: Arc::new(config),
            degraded: degraded_tx,
            completing_rounds: DashMap::new(),
        })
    }

    /// Obtain a handle to the current storage backend, if one is installed.
    pub async fn league_store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.league_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the storage backend or fail with the degraded-mode error.
    pub async fn require_league_store(&self) -> Result<Arc<dyn LeagueStore>, ServiceError> {
        self.league_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    pub async fn install_league_store(&self, store: Arc<dyn LeagueStore>) {
        {
            let mut guard = self.league_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Drop the storage backend and enter degraded mode.
    pub async fn clear_league_store(&self) {
        {
            let mut guard = self.league_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Whether the application currently lacks a storage backend.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.league_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode changes.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Publish the degraded flag to watchers.
    pub fn update_degraded(&self, value: bool) {
        let _ = self.degraded.send(value);
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Sink used for league announcements.
    pub fn notifier(&self) -> &Arc<dyn NotificationSink> {
        &self.notifier
    }

    /// Client for the remote scorecard OCR worker.
    pub fn scorecards(&self) -> &ScorecardClient {
        &self.scorecards
    }

    /// Claim the in-process completion slot for a round. Returns `None` when
    /// this process is already mid-completion for it; the guard releases the
    /// slot on drop. Cross-process races are handled by the storage layer's
    /// conditional transition, not by this gate.
    pub fn begin_round_completion(&self, round_id: Uuid) -> Option<CompletionGuard<'_>> {
        use dashmap::mapref::entry::Entry;

        match self.completing_rounds.entry(round_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                Some(CompletionGuard {
                    rounds: &self.completing_rounds,
                    round_id,
                })
            }
        }
    }
}

/// RAII guard for the in-process completion gate.
pub struct CompletionGuard<'a> {
    rounds: &'a DashMap<Uuid, Instant>,
    round_id: Uuid,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.rounds.remove(&self.round_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::discord::DiscordSink;

    #[tokio::test]
    async fn completion_gate_is_exclusive_until_released() {
        let state = AppState::new(AppConfig::default(), Arc::new(DiscordSink::new()));
        let round_id = Uuid::new_v4();

        let guard = state.begin_round_completion(round_id);
        assert!(guard.is_some());
        assert!(state.begin_round_completion(round_id).is_none());

        drop(guard);
        assert!(state.begin_round_completion(round_id).is_some());
    }

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default(), Arc::new(DiscordSink::new()));
        assert!(state.is_degraded().await);
        assert!(matches!(
            state.require_league_store().await,
            Err(ServiceError::Degraded)
        ));
    }
}
