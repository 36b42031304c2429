use std::{collections::BTreeMap, sync::Arc};

use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use tokio::sync::RwLock;
use tracing::info;

use super::{
    config::SqliteConfig,
    connection::{ensure_schema, establish_connection},
    entity::{self, BoardInfo},
    error::{SqliteDaoError, SqliteResult},
};
use crate::dao::{game_store::GameStore, models::GameEntity, storage::StorageResult};

/// Relational game store backed by SQLite through SeaORM.
#[derive(Clone)]
pub struct SqliteGameStore {
    inner: Arc<SqliteInner>,
}

struct SqliteInner {
    connection: RwLock<DatabaseConnection>,
    config: SqliteConfig,
}

impl SqliteInner {
    async fn ping(&self) -> SqliteResult<()> {
        let connection = self.connection.read().await.clone();
        connection
            .ping()
            .await
            .map_err(|source| SqliteDaoError::HealthPing { source })
    }

    async fn reconnect(&self) -> SqliteResult<()> {
        let connection = establish_connection(&self.config).await?;
        ensure_schema(&connection).await?;
        let mut guard = self.connection.write().await;
        *guard = connection;
        Ok(())
    }
}

impl SqliteGameStore {
    /// Open the database and make sure the `games` table exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let connection = establish_connection(&config).await?;
        ensure_schema(&connection).await?;
        info!(url = %config.url, "sqlite game store ready");

        Ok(Self {
            inner: Arc::new(SqliteInner {
                connection: RwLock::new(connection),
                config,
            }),
        })
    }

    async fn connection(&self) -> DatabaseConnection {
        self.inner.connection.read().await.clone()
    }

    async fn create_game(&self, info: BTreeMap<String, String>) -> SqliteResult<i32> {
        let connection = self.connection().await;
        let model = entity::ActiveModel {
            id: NotSet,
            last_move_was_x: Set(false),
            info: Set(BoardInfo(info)),
        }
        .insert(&connection)
        .await
        .map_err(|source| SqliteDaoError::CreateGame { source })?;

        Ok(model.id)
    }

    async fn find_game(&self, id: i32) -> SqliteResult<Option<GameEntity>> {
        let connection = self.connection().await;
        let model = entity::Entity::find_by_id(id)
            .one(&connection)
            .await
            .map_err(|source| SqliteDaoError::LoadGame { id, source })?;

        Ok(model.map(Into::into))
    }

    async fn save_game(&self, game: GameEntity) -> SqliteResult<()> {
        let id = game.id;
        let connection = self.connection().await;
        let result = entity::ActiveModel {
            id: Set(id),
            last_move_was_x: Set(game.last_move_was_x),
            info: Set(BoardInfo(game.info)),
        }
        .update(&connection)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(SqliteDaoError::MissingGame { id }),
            Err(source) => Err(SqliteDaoError::SaveGame { id, source }),
        }
    }

    async fn list_games(&self) -> SqliteResult<Vec<GameEntity>> {
        let connection = self.connection().await;
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&connection)
            .await
            .map_err(|source| SqliteDaoError::ListGames { source })?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

impl GameStore for SqliteGameStore {
    fn create_game(&self, info: BTreeMap<String, String>) -> BoxFuture<'static, StorageResult<i32>> {
        let store = self.clone();
        Box::pin(async move { store.create_game(info).await.map_err(Into::into) })
    }

    fn find_game(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_game(game).await.map_err(Into::into) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_games().await.map_err(Into::into) })
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
