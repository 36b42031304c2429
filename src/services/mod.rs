/// OpenAPI documentation generation.
pub mod documentation;
/// Game creation, moves, evaluation and history.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Storage connection supervisor with degraded-mode handling.
pub mod storage_supervisor;
