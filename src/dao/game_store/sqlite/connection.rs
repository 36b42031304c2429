use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tokio::time::sleep;
use tracing::debug;

use super::{
    config::SqliteConfig,
    entity,
    error::{SqliteDaoError, SqliteResult},
};

struct RetryPolicy;

impl RetryPolicy {
    const MAX_ATTEMPTS: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 250;

    fn initial_delay() -> Duration {
        Duration::from_millis(Self::INITIAL_DELAY_MS)
    }

    fn next_delay(current: Duration) -> Duration {
        (current * 2).min(Duration::from_secs(5))
    }
}

/// Open the connection pool, retrying with backoff before giving up.
pub async fn establish_connection(config: &SqliteConfig) -> SqliteResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let mut attempts = 0;
    let mut delay = RetryPolicy::initial_delay();

    loop {
        match Database::connect(options.clone()).await {
            Ok(connection) => return Ok(connection),
            Err(source) => {
                attempts += 1;
                if attempts >= RetryPolicy::MAX_ATTEMPTS {
                    return Err(SqliteDaoError::Connect {
                        url: config.url.clone(),
                        source,
                    });
                }
                debug!(attempts, error = %source, "database connection attempt failed; retrying");
                sleep(delay).await;
                delay = RetryPolicy::next_delay(delay);
            }
        }
    }
}

/// Create the `games` table when it is missing.
pub async fn ensure_schema(connection: &DatabaseConnection) -> SqliteResult<()> {
    let backend = connection.get_database_backend();
    let schema = Schema::new(backend);
    let mut table = schema.create_table_from_entity(entity::Entity);
    table.if_not_exists();

    connection
        .execute(backend.build(&table))
        .await
        .map_err(|source| SqliteDaoError::EnsureTable {
            table: entity::TABLE_NAME,
            source,
        })?;

    Ok(())
}
