//! Library crate for tictactoe-back, exposing modules for binaries and integration tests.

/// Runtime configuration loaded from disk and the environment.
pub mod config;
/// Storage backends and the rows they persist.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP route handlers.
pub mod routes;
/// Business operations behind the routes.
pub mod services;
/// Shared application state and the game domain.
pub mod state;
