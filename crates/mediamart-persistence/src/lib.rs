//! MediaMart Persistence - Database entities and schema bootstrap
//!
//! This crate provides:
//! - SeaORM entity definitions for the advertising inventory tables
//! - A backend-agnostic schema bootstrap built from the entities

pub mod entity;
pub mod schema;

// Re-export sea-orm for convenience
pub use sea_orm;

pub use entity::constructions::{ConstructionFormat, ConstructionStatus};
pub use entity::users::UserRole;
