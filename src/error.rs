use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::{
    dao::storage::StorageError,
    state::{board::BoardDecodeError, game::MoveError},
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested game was not found.
    #[error("game - {0} not found")]
    GameNotFound(i32),
    /// The move breaks a game rule.
    #[error(transparent)]
    Move(#[from] MoveError),
    /// A stored board could not be decoded.
    #[error("game `{id}` holds a corrupted board")]
    CorruptedGame {
        /// Game whose row failed to decode.
        id: i32,
        /// Decoding failure.
        #[source]
        source: BoardDecodeError,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::MissingGame { id } => ServiceError::GameNotFound(id),
            other => ServiceError::Unavailable(other),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest {
            code: ErrorCode::ValidationFailed,
            message: format!("validation failed: {}", err),
        }
    }
}

/// Machine-readable reason attached to every rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No game with that id.
    GameNotFound,
    /// The same side tried to move twice in a row.
    NotYourTurn,
    /// The target cell is taken or off the board.
    InvalidPosition,
    /// `0` tried to open the game.
    ZeroCannotStart,
    /// The payload or path did not parse or validate.
    ValidationFailed,
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected by validation or by the game rules.
    #[error("{message}")]
    BadRequest {
        /// Reason reported as `error_code`.
        code: ErrorCode,
        /// Human-readable reason reported as `message`.
        message: String,
    },
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::Degraded => AppError::ServiceUnavailable("degraded mode".into()),
            ServiceError::InvalidInput(_) => AppError::BadRequest {
                code: ErrorCode::ValidationFailed,
                message,
            },
            ServiceError::GameNotFound(_) => AppError::BadRequest {
                code: ErrorCode::GameNotFound,
                message,
            },
            ServiceError::Move(reason) => AppError::BadRequest {
                code: reason.into(),
                message,
            },
            ServiceError::CorruptedGame { .. } => AppError::Internal(message),
        }
    }
}

impl From<MoveError> for ErrorCode {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::ZeroCannotStart => ErrorCode::ZeroCannotStart,
            MoveError::NotYourTurn => ErrorCode::NotYourTurn,
            MoveError::Occupied(_) | MoveError::OutOfBounds(_) => ErrorCode::InvalidPosition,
        }
    }
}

/// JSON payload returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable reason.
    pub message: String,
    /// Present on rejected requests (HTTP 400).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self {
            AppError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, Some(*code)),
            AppError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, None),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
            error_code,
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn rule_violations_are_bad_requests() {
        assert_eq!(
            status_of(ServiceError::Move(MoveError::NotYourTurn)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::GameNotFound(3)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::InvalidInput("game id must be positive".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_outages_are_unavailable() {
        assert_eq!(
            status_of(ServiceError::Degraded),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn missing_row_on_save_reads_as_not_found() {
        let err: ServiceError = StorageError::MissingGame { id: 9 }.into();
        assert!(matches!(err, ServiceError::GameNotFound(9)));
    }

    #[test]
    fn move_errors_keep_their_message_and_code() {
        let app: AppError = ServiceError::Move(MoveError::Occupied(4)).into();
        match app {
            AppError::BadRequest { code, message } => {
                assert_eq!(code, ErrorCode::InvalidPosition);
                assert_eq!(message, "position 4 is already taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let app: AppError = ServiceError::GameNotFound(12).into();
        assert_eq!(app.to_string(), "game - 12 not found");
    }
}
