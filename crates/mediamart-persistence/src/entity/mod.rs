//! SeaORM entities for the MediaMart inventory database.

pub mod constructions;
pub mod photos;
pub mod status_history;
pub mod users;
