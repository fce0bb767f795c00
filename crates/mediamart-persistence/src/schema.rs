//! Schema bootstrap built from the entity definitions.
//!
//! Statements are generated per backend, so the same bootstrap works for
//! PostgreSQL in production and in-memory SQLite in tests. Tables are
//! created in dependency order (users and constructions before the rows
//! that reference them).

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::entity::{constructions, photos, status_history, users};

pub async fn create_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut users_table = schema.create_table_from_entity(users::Entity);
    users_table.if_not_exists();
    db.execute(backend.build(&users_table)).await?;

    let mut constructions_table = schema.create_table_from_entity(constructions::Entity);
    constructions_table.if_not_exists();
    db.execute(backend.build(&constructions_table)).await?;

    let mut photos_table = schema.create_table_from_entity(photos::Entity);
    photos_table.if_not_exists();
    db.execute(backend.build(&photos_table)).await?;

    let mut history_table = schema.create_table_from_entity(status_history::Entity);
    history_table.if_not_exists();
    db.execute(backend.build(&history_table)).await?;

    Ok(())
}
