/// In-process store backed by a concurrent map.
pub mod memory;
#[cfg(feature = "sqlite-store")]
/// Relational store on SQLite through SeaORM.
pub mod sqlite;

use std::collections::BTreeMap;

use crate::dao::models::GameEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for game rows.
pub trait GameStore: Send + Sync {
    /// Insert a new row with the given board map and return its id.
    fn create_game(&self, info: BTreeMap<String, String>) -> BoxFuture<'static, StorageResult<i32>>;
    fn find_game(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Overwrite the turn flag and board of an existing row.
    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Every stored game ordered by id.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
