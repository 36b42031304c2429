//! Error types shared by the SQLite storage implementation.

use sea_orm::DbErr;
use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with the SQLite database.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// Opening the connection pool failed.
    #[error("failed to connect to database `{url}`")]
    Connect {
        /// Connection string that was tried.
        url: String,
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// The database did not answer the liveness probe.
    #[error("database ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// Creating the `games` table failed.
    #[error("failed to ensure table `{table}`")]
    EnsureTable {
        /// Table being created.
        table: &'static str,
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// Inserting a new row failed.
    #[error("failed to create game")]
    CreateGame {
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// Updating a row failed.
    #[error("failed to save game `{id}`")]
    SaveGame {
        /// Game being saved.
        id: i32,
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// Selecting a row failed.
    #[error("failed to load game `{id}`")]
    LoadGame {
        /// Game being loaded.
        id: i32,
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// Selecting every row failed.
    #[error("failed to list games")]
    ListGames {
        /// Driver error.
        #[source]
        source: DbErr,
    },
    /// An update matched no row.
    #[error("game `{id}` does not exist")]
    MissingGame {
        /// Game that was targeted.
        id: i32,
    },
}
