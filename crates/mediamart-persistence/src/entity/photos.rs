//! `SeaORM` Entity for the photos table
//!
//! Photos are exclusively owned by a construction and are deleted with it.
//! `sort_index` controls display order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub construction_id: Uuid,
    pub url: String,
    #[sea_orm(default_value = 0)]
    pub sort_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::constructions::Entity",
        from = "Column::ConstructionId",
        to = "super::constructions::Column::Id",
        on_delete = "Cascade"
    )]
    Constructions,
}

impl Related<super::constructions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Constructions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
