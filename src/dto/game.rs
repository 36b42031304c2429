use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::models::GameEntity,
    dto::validation::validate_mark,
    state::board::{Mark, Outcome},
};

/// Returned once a new game row exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartResponse {
    /// Identifier to pass to `/move` and `/check`.
    pub game_id: i32,
}

/// Move submitted by one side.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MoveRequest {
    /// `x` or `0`, case-insensitive.
    #[serde(rename = "type")]
    #[schema(example = "x")]
    #[validate(custom(function = "validate_mark"))]
    pub mark: String,
    /// Cell index, row by row from 0 to 8.
    #[validate(range(min = 0, max = 8))]
    pub position: i64,
}

/// Acknowledges an accepted move.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MoveResponse {
    /// Always `success`.
    pub result: String,
}

impl MoveResponse {
    /// The only body an accepted move gets.
    pub fn success() -> Self {
        Self {
            result: "success".into(),
        }
    }
}

/// Board evaluation exposed by `/check/{game_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum CheckResponse {
    /// Moves are still possible.
    InProgress,
    /// Game over; `winner` is null on a draw.
    Finished {
        /// Side holding a full line.
        winner: Option<Mark>,
    },
}

impl From<Outcome> for CheckResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::InProgress => CheckResponse::InProgress,
            Outcome::Finished { winner } => CheckResponse::Finished { winner },
        }
    }
}

/// One row of `/history`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameOutput {
    /// Game identifier.
    pub id: i32,
    /// Cells keyed `"0"` to `"8"`, each `""`, `"x"` or `"0"`.
    pub info: BTreeMap<String, String>,
}

impl From<GameEntity> for GameOutput {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            info: entity.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn check_response_wire_format() {
        assert_eq!(
            serde_json::to_value(CheckResponse::InProgress).unwrap(),
            json!({"game": "in_progress"})
        );
        assert_eq!(
            serde_json::to_value(CheckResponse::Finished {
                winner: Some(Mark::Zero)
            })
            .unwrap(),
            json!({"game": "finished", "winner": "0"})
        );
        assert_eq!(
            serde_json::to_value(CheckResponse::Finished { winner: None }).unwrap(),
            json!({"game": "finished", "winner": null})
        );
    }

    #[test]
    fn move_request_reads_type_field() {
        let request: MoveRequest =
            serde_json::from_value(json!({"type": "X", "position": 3})).unwrap();
        assert_eq!(request.mark, "X");
        assert_eq!(request.position, 3);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn move_request_validation() {
        let request: MoveRequest =
            serde_json::from_value(json!({"type": "x", "position": 9})).unwrap();
        assert!(request.validate().is_err());

        let request: MoveRequest =
            serde_json::from_value(json!({"type": "x", "position": -1})).unwrap();
        assert!(request.validate().is_err());

        let request: MoveRequest =
            serde_json::from_value(json!({"type": "o", "position": 0})).unwrap();
        assert!(request.validate().is_err());
    }
}
