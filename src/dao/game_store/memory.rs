//! Process-local game store backed by a concurrent map.

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
};

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{
    game_store::GameStore,
    models::GameEntity,
    storage::{StorageError, StorageResult},
};

/// Game store keeping every row in memory; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    games: DashMap<i32, GameEntity>,
    last_id: AtomicI32,
}

impl MemoryGameStore {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn create_game(&self, info: BTreeMap<String, String>) -> i32 {
        let id = self.inner.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.games.insert(
            id,
            GameEntity {
                id,
                last_move_was_x: false,
                info,
            },
        );
        id
    }

    fn save_game(&self, game: GameEntity) -> StorageResult<()> {
        let Some(mut slot) = self.inner.games.get_mut(&game.id) else {
            return Err(StorageError::MissingGame { id: game.id });
        };
        *slot = game;
        Ok(())
    }

    fn list_games(&self) -> Vec<GameEntity> {
        let mut games = self
            .inner
            .games
            .iter()
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        games.sort_by_key(|game| game.id);
        games
    }
}

impl GameStore for MemoryGameStore {
    fn create_game(&self, info: BTreeMap<String, String>) -> BoxFuture<'static, StorageResult<i32>> {
        let id = MemoryGameStore::create_game(self, info);
        Box::pin(async move { Ok(id) })
    }

    fn find_game(&self, id: i32) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let game = self.inner.games.get(&id).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(game) })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let result = MemoryGameStore::save_game(self, game);
        Box::pin(async move { result })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let games = MemoryGameStore::list_games(self);
        Box::pin(async move { Ok(games) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::board::Board;

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = MemoryGameStore::new();
        let first = GameStore::create_game(&store, Board::empty().to_info())
            .await
            .unwrap();
        let second = GameStore::create_game(&store, Board::empty().to_info())
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn save_replaces_existing_row() {
        let store = MemoryGameStore::new();
        let id = GameStore::create_game(&store, Board::empty().to_info())
            .await
            .unwrap();

        let mut game = store.find_game(id).await.unwrap().unwrap();
        game.last_move_was_x = true;
        game.info.insert("4".into(), "x".into());
        GameStore::save_game(&store, game.clone()).await.unwrap();

        assert_eq!(store.find_game(id).await.unwrap(), Some(game));
    }

    #[tokio::test]
    async fn save_of_unknown_row_fails() {
        let store = MemoryGameStore::new();
        let err = GameStore::save_game(
            &store,
            GameEntity {
                id: 42,
                last_move_was_x: false,
                info: Board::empty().to_info(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StorageError::MissingGame { id: 42 }));
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryGameStore::new();
        for _ in 0..3 {
            GameStore::create_game(&store, Board::empty().to_info())
                .await
                .unwrap();
        }
        let ids = GameStore::list_games(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|game| game.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
