//! `SeaORM` Entity for the status_history table
//!
//! Append-only audit trail of construction status changes. Rows are never
//! updated after insertion. `old_status` is null for the first transition
//! recorded against a construction. The user reference is weak: deleting a
//! user leaves its history rows in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::constructions::ConstructionStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "status_history")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub construction_id: Uuid,
    pub user_id: Option<Uuid>,
    pub old_status: Option<ConstructionStatus>,
    pub new_status: ConstructionStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub changed_at: DateTime,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::constructions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Constructions.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
