/// Runtime configuration describing how to reach the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// SeaORM connection string, e.g. `sqlite://tictactoe.db?mode=rwc`.
    pub url: String,
    /// Upper bound of the connection pool.
    pub max_connections: u32,
}

impl SqliteConfig {
    /// Construct a configuration for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        // Every pooled connection to `sqlite::memory:` opens its own empty database.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        Self {
            url,
            max_connections,
        }
    }
}
