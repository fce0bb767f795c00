//! `SeaORM` Entity for the constructions table
//!
//! A construction is a single advertising structure (a mediaboard or a
//! cityboard). `external_id` is the natural key used to deduplicate
//! spreadsheet imports; it is looked up by the import logic and is not
//! unique at the database level.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use mediamart_common::MediamartError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "constructions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub external_id: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub format: Option<ConstructionFormat>,
    pub price: Option<f64>,
    pub status: ConstructionStatus,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub size: Option<String>,
    pub classification: Option<String>,
    pub lighting: Option<String>,
    pub category: Option<String>,
    pub mrp: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub print_requirement: Option<String>,
    pub warehouse: Option<String>,
    pub side: Option<String>,
    pub orientation: Option<String>,
    pub dynamic: Option<String>,
    pub provider: Option<String>,
    pub number: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Lifecycle status of a construction. Every change is recorded in
/// `status_history`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ConstructionStatus {
    #[sea_orm(string_value = "Active")]
    #[serde(rename = "Active")]
    Active,
    #[sea_orm(string_value = "InProgress")]
    #[serde(rename = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Decommissioned")]
    #[serde(rename = "Decommissioned")]
    Decommissioned,
}

/// Physical format of a construction. The stored values are the localized
/// names used in the source spreadsheets and by API clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ConstructionFormat {
    #[sea_orm(string_value = "Медиаборд")]
    #[serde(rename = "Медиаборд")]
    Mediaboard,
    #[sea_orm(string_value = "Ситиборд")]
    #[serde(rename = "Ситиборд")]
    Cityboard,
}

impl FromStr for ConstructionStatus {
    type Err = MediamartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "InProgress" => Ok(Self::InProgress),
            "Decommissioned" => Ok(Self::Decommissioned),
            other => Err(MediamartError::IllegalArgument(format!(
                "unknown construction status '{}'",
                other
            ))),
        }
    }
}

impl FromStr for ConstructionFormat {
    type Err = MediamartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Медиаборд" => Ok(Self::Mediaboard),
            "Ситиборд" => Ok(Self::Cityboard),
            other => Err(MediamartError::IllegalArgument(format!(
                "unknown construction format '{}'",
                other
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::photos::Entity")]
    Photos,
    #[sea_orm(has_many = "super::status_history::Entity")]
    StatusHistory,
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "Active".parse::<ConstructionStatus>().unwrap(),
            ConstructionStatus::Active
        );
        assert_eq!(
            "InProgress".parse::<ConstructionStatus>().unwrap(),
            ConstructionStatus::InProgress
        );
        assert!("active".parse::<ConstructionStatus>().is_err());
    }

    #[test]
    fn test_format_from_str_localized() {
        assert_eq!(
            "Медиаборд".parse::<ConstructionFormat>().unwrap(),
            ConstructionFormat::Mediaboard
        );
        assert_eq!(
            "Ситиборд".parse::<ConstructionFormat>().unwrap(),
            ConstructionFormat::Cityboard
        );
        assert!("billboard".parse::<ConstructionFormat>().is_err());
    }

    #[test]
    fn test_format_serializes_to_localized_value() {
        let json = serde_json::to_string(&ConstructionFormat::Cityboard).unwrap();
        assert_eq!(json, "\"Ситиборд\"");
    }
}
