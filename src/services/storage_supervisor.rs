use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{game_store::GameStore, storage::StorageError},
    state::SharedState,
};

/// Timing knobs for the supervisor loop.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorTiming {
    /// First wait after a failed attempt. Doubles up to `max_delay`.
    pub initial_delay: Duration,
    /// Backoff ceiling.
    pub max_delay: Duration,
    /// Pause between health checks of a connected store.
    pub health_poll_interval: Duration,
    /// Reconnects tried on an installed store before starting over from `connect`.
    pub max_reconnect_attempts: u32,
}

impl Default for SupervisorTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(10),
            health_poll_interval: Duration::from_secs(5),
            max_reconnect_attempts: 3,
        }
    }
}

struct Backoff {
    current: Duration,
    initial: Duration,
    max: Duration,
}

impl Backoff {
    fn new(timing: &SupervisorTiming) -> Self {
        Self {
            current: timing.initial_delay,
            initial: timing.initial_delay,
            max: timing.max_delay,
        }
    }

    fn reset(&mut self) {
        self.current = self.initial;
    }

    async fn wait(&mut self) {
        sleep(self.current).await;
        self.current = (self.current * 2).min(self.max);
    }
}

/// Connect to the storage backend and keep the shared state in degraded mode while it is unavailable.
pub async fn run<F, Fut>(state: SharedState, timing: SupervisorTiming, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn GameStore>, StorageError>> + Send,
{
    let mut backoff = Backoff::new(&timing);

    loop {
        match connect().await {
            Ok(store) => {
                state.set_game_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                backoff.reset();
                watch_store(&state, store.as_ref(), &timing).await;
                warn!("exhausted storage reconnect attempts; staying in degraded mode");
            }
            Err(err) => warn!(error = %err, "storage connection attempt failed"),
        }
        backoff.wait().await;
    }
}

/// Poll the installed store until it fails and cannot be recovered.
async fn watch_store(state: &SharedState, store: &dyn GameStore, timing: &SupervisorTiming) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded().await {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false).await;
                }
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                if !reconnect(state, store, timing).await {
                    return;
                }
                state.update_degraded(false).await;
            }
        }
        sleep(timing.health_poll_interval).await;
    }
}

/// Try to reconnect a failing store, entering degraded mode after the first failed attempt.
async fn reconnect(state: &SharedState, store: &dyn GameStore, timing: &SupervisorTiming) -> bool {
    let mut backoff = Backoff::new(timing);

    for attempt in 0..timing.max_reconnect_attempts {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) => {
                if attempt == 0 {
                    warn!(attempt, error = %err, "storage reconnect first attempt failed; entering degraded mode");
                    state.update_degraded(true).await;
                } else {
                    warn!(attempt, error = %err, "storage reconnect attempt failed");
                }
                backoff.wait().await;
            }
        }
    }

    false
}
