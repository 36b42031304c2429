use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Persisted game row shared by every storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key of the game.
    pub id: i32,
    /// Whether `x` made the latest move.
    pub last_move_was_x: bool,
    /// Board cells keyed `"0"` to `"8"`, each `""`, `"x"` or `"0"`.
    pub info: BTreeMap<String, String>,
}
