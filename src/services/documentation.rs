use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the tic-tac-toe backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::start,
        crate::routes::game::make_move,
        crate::routes::game::check,
        crate::routes::game::history,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::game::StartResponse,
            crate::dto::game::MoveRequest,
            crate::dto::game::MoveResponse,
            crate::dto::game::CheckResponse,
            crate::dto::game::GameOutput,
            crate::state::board::Mark,
            crate::error::ErrorBody,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game lifecycle: start, move, check and history"),
    )
)]
pub struct ApiDoc;
