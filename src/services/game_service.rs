use tracing::{debug, info};

use crate::{
    dao::game_store::GameStore,
    dto::game::{CheckResponse, GameOutput, MoveRequest, MoveResponse, StartResponse},
    error::ServiceError,
    state::{
        SharedState,
        board::{Board, Mark},
        game::Game,
    },
};

/// Create a game with an empty board; `x` moves first.
pub async fn start_game(state: &SharedState) -> Result<StartResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let game_id = store.create_game(Board::empty().to_info()).await?;
    info!(game_id, "game started");
    Ok(StartResponse { game_id })
}

/// Validate a move against the stored game and persist it.
pub async fn make_move(
    state: &SharedState,
    game_id: i32,
    request: MoveRequest,
) -> Result<MoveResponse, ServiceError> {
    ensure_game_id(game_id)?;
    let mark = request
        .mark
        .parse::<Mark>()
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))?;
    let position = usize::try_from(request.position)
        .map_err(|_| ServiceError::InvalidInput(format!("invalid position {}", request.position)))?;

    let store = state.require_game_store().await?;
    let _gate = state.move_gate().lock().await;

    let mut game = load_game(store.as_ref(), game_id).await?;
    if let Err(err) = game.apply_move(mark, position) {
        debug!(game_id, %mark, position, error = %err, "move rejected");
        return Err(err.into());
    }

    store.save_game(game.into()).await?;
    info!(game_id, %mark, position, "move recorded");
    Ok(MoveResponse::success())
}

/// Evaluate the board of a stored game.
pub async fn check_game(state: &SharedState, game_id: i32) -> Result<CheckResponse, ServiceError> {
    ensure_game_id(game_id)?;
    let store = state.require_game_store().await?;
    let game = load_game(store.as_ref(), game_id).await?;
    Ok(game.outcome().into())
}

/// Every stored game, oldest first.
pub async fn history(state: &SharedState) -> Result<Vec<GameOutput>, ServiceError> {
    let store = state.require_game_store().await?;
    let games = store.list_games().await?;
    Ok(games.into_iter().map(GameOutput::from).collect())
}

async fn load_game(store: &dyn GameStore, game_id: i32) -> Result<Game, ServiceError> {
    let Some(entity) = store.find_game(game_id).await? else {
        return Err(ServiceError::GameNotFound(game_id));
    };

    Game::try_from(entity).map_err(|source| ServiceError::CorruptedGame {
        id: game_id,
        source,
    })
}

fn ensure_game_id(game_id: i32) -> Result<(), ServiceError> {
    if game_id <= 0 {
        return Err(ServiceError::InvalidInput(format!(
            "game id must be greater than 0 (got {game_id})"
        )));
    }
    Ok(())
}
