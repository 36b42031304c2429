//! tictactoe-back binary entrypoint wiring the REST API and the storage supervisor.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use futures::future::BoxFuture;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tictactoe_back::{
    config::{AppConfig, StorageBackend},
    dao::{
        game_store::{GameStore, memory::MemoryGameStore},
        storage::StorageResult,
    },
    routes,
    services::storage_supervisor::{self, SupervisorTiming},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new();

    tokio::spawn(storage_supervisor::run(
        app_state.clone(),
        SupervisorTiming::default(),
        store_connector(&config),
    ));
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, storage = ?config.storage, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the closure the supervisor calls whenever it needs a fresh store.
fn store_connector(
    config: &AppConfig,
) -> impl FnMut() -> BoxFuture<'static, StorageResult<Arc<dyn GameStore>>> + Send + 'static {
    let backend = config.storage;
    let database_url = config.database_url.clone();
    // Reconnects must hand back the same map, not an empty one.
    let memory = MemoryGameStore::new();

    move || -> BoxFuture<'static, StorageResult<Arc<dyn GameStore>>> {
        let database_url = database_url.clone();
        let memory = memory.clone();
        Box::pin(async move {
            match backend {
                StorageBackend::Memory => Ok(Arc::new(memory) as Arc<dyn GameStore>),
                StorageBackend::Sqlite => connect_sqlite(database_url).await,
            }
        })
    }
}

#[cfg(feature = "sqlite-store")]
async fn connect_sqlite(url: String) -> StorageResult<Arc<dyn GameStore>> {
    use tictactoe_back::dao::game_store::sqlite::{SqliteConfig, SqliteGameStore};

    let store = SqliteGameStore::connect(SqliteConfig::new(url)).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite-store"))]
async fn connect_sqlite(url: String) -> StorageResult<Arc<dyn GameStore>> {
    Err(tictactoe_back::dao::storage::StorageError::unavailable(
        format!("cannot open `{url}`: built without the `sqlite-store` feature"),
        std::io::Error::from(std::io::ErrorKind::Unsupported),
    ))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
