mod config;
mod connection;
mod entity;
mod error;
/// [`GameStore`](crate::dao::game_store::GameStore) implementation over a SeaORM pool.
pub mod store;

pub use config::SqliteConfig;
pub use error::SqliteDaoError;
pub use store::SqliteGameStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        match err {
            SqliteDaoError::MissingGame { id } => StorageError::MissingGame { id },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
