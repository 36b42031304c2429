//! SeaORM entity for the `games` table.

use std::collections::BTreeMap;

use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::dao::models::GameEntity;

pub const TABLE_NAME: &str = "games";

/// Board map stored as JSON text in the `info` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct BoardInfo(pub BTreeMap<String, String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub last_move_was_x: bool,
    #[sea_orm(column_type = "Text")]
    pub info: BoardInfo,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GameEntity {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            last_move_was_x: model.last_move_was_x,
            info: model.info.0,
        }
    }
}
