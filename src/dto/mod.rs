/// Payloads of the game routes.
pub mod game;
/// Payload of the health route.
pub mod health;
/// Custom validators used by the payload derives.
pub mod validation;
