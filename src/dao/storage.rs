//! Backend-neutral storage failures.

use std::error::Error;
use thiserror::Error;

/// What every [`GameStore`](crate::dao::game_store::GameStore) call resolves to.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a game store, whichever backend produced it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the call. The service answers 503 and the
    /// supervisor may switch to degraded mode.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What the store was doing when it failed.
        message: String,
        /// Driver-level cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A save targeted a game id with no row behind it.
    #[error("game `{id}` does not exist in storage")]
    MissingGame {
        /// Requested game id.
        id: i32,
    },
}

impl StorageError {
    /// Wrap a backend failure with a short description of the failed call.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
