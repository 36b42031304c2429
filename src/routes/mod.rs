use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// `/start`, `/move`, `/check` and `/history`.
pub mod game;
/// `/healthcheck`.
pub mod health;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game::router())
        .merge(docs::router())
        .with_state(state)
}
