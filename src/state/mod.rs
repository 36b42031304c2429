/// Cells, marks and win/draw evaluation.
pub mod board;
/// One match and the move rules.
pub mod game;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};

use crate::{dao::game_store::GameStore, error::ServiceError};

/// Handle cloned into every handler and background task.
pub type SharedState = Arc<AppState>;

/// Central application state holding the storage handle and the degraded flag.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    degraded: watch::Sender<bool>,
    move_gate: Mutex<()>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new() -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            degraded: degraded_tx,
            move_gate: Mutex::new(()),
        })
    }

    /// Construct a state with `store` already installed, outside degraded mode.
    pub fn with_store(store: Arc<dyn GameStore>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(false);
        Arc::new(Self {
            game_store: RwLock::new(Some(store)),
            degraded: degraded_tx,
            move_gate: Mutex::new(()),
        })
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Return the installed store, or [`ServiceError::Degraded`] while storage is unhealthy.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        if self.is_degraded().await {
            return Err(ServiceError::Degraded);
        }
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Serializes the read-validate-write cycle of moves.
    pub fn move_gate(&self) -> &Mutex<()> {
        &self.move_gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::game_store::memory::MemoryGameStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new();
        let mut watcher = state.degraded_watcher();
        assert!(state.is_degraded().await);
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));

        state.set_game_store(Arc::new(MemoryGameStore::new())).await;
        assert!(!state.is_degraded().await);
        assert!(watcher.has_changed().unwrap());
        assert!(!*watcher.borrow_and_update());
        assert!(state.require_game_store().await.is_ok());
    }

    #[tokio::test]
    async fn degraded_flag_toggles_without_dropping_the_store() {
        let state = AppState::with_store(Arc::new(MemoryGameStore::new()));
        state.update_degraded(true).await;
        assert!(state.is_degraded().await);
        assert!(state.game_store().await.is_some());
        assert!(matches!(
            state.require_game_store().await,
            Err(ServiceError::Degraded)
        ));

        state.update_degraded(false).await;
        assert!(state.require_game_store().await.is_ok());
    }
}
