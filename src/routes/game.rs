use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::game::{CheckResponse, GameOutput, MoveRequest, MoveResponse, StartResponse},
    error::{AppError, ErrorBody, ErrorCode},
    services::game_service,
    state::SharedState,
};

/// Routes driving a game: creation, moves, evaluation and history.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/start", get(start))
        .route("/move/{game_id}", post(make_move))
        .route("/check/{game_id}", get(check))
        .route("/history", get(history))
}

/// Create a game with an empty board.
#[utoipa::path(
    get,
    path = "/start",
    tag = "game",
    responses(
        (status = 200, description = "Game created", body = StartResponse),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn start(State(state): State<SharedState>) -> Result<Json<StartResponse>, AppError> {
    Ok(Json(game_service::start_game(&state).await?))
}

/// Play one move for `x` or `0`.
#[utoipa::path(
    post,
    path = "/move/{game_id}",
    tag = "game",
    params(("game_id" = i32, Path, description = "Identifier returned by /start")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Move recorded", body = MoveResponse),
        (status = 400, description = "Unknown game, invalid payload or move refused by the rules", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn make_move(
    State(state): State<SharedState>,
    game_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, AppError> {
    let Path(game_id) = game_id.map_err(bad_path)?;
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest {
        code: ErrorCode::ValidationFailed,
        message: rejection.body_text(),
    })?;
    payload.validate()?;

    Ok(Json(game_service::make_move(&state, game_id, payload).await?))
}

/// Evaluate the board: in progress, or finished with a winner (null on a draw).
#[utoipa::path(
    get,
    path = "/check/{game_id}",
    tag = "game",
    params(("game_id" = i32, Path, description = "Identifier returned by /start")),
    responses(
        (status = 200, description = "Current outcome", body = CheckResponse),
        (status = 400, description = "Unknown or invalid game id", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn check(
    State(state): State<SharedState>,
    game_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let Path(game_id) = game_id.map_err(bad_path)?;
    Ok(Json(game_service::check_game(&state, game_id).await?))
}

/// List every game with its board.
#[utoipa::path(
    get,
    path = "/history",
    tag = "game",
    responses(
        (status = 200, description = "All games", body = [GameOutput]),
        (status = 503, description = "Storage unavailable", body = ErrorBody)
    )
)]
pub async fn history(State(state): State<SharedState>) -> Result<Json<Vec<GameOutput>>, AppError> {
    Ok(Json(game_service::history(&state).await?))
}

fn bad_path(rejection: PathRejection) -> AppError {
    AppError::BadRequest {
        code: ErrorCode::ValidationFailed,
        message: rejection.body_text(),
    }
}
