//! User service

use sea_orm::*;
use uuid::Uuid;

use mediamart_common::error::MediamartError;
use mediamart_persistence::UserRole;
use mediamart_persistence::entity::users;

use crate::model::User;

const BCRYPT_COST: u32 = 10;

/// Create a user with a freshly hashed password.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<User> {
    if users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
        .is_some()
    {
        return Err(MediamartError::UserAlreadyExist(email.to_string()).into());
    }

    let hashed_password = bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let entity = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hashed_password),
        role: Set(role),
        created_at: Set(chrono::Utc::now().naive_utc()),
    };

    let model = entity.insert(db).await?;

    Ok(User::from(model))
}

/// Verify credentials; returns the user view on success.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    let entity = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(|| MediamartError::UserNotExist(email.to_string()))?;

    let matches = bcrypt::verify(password, &entity.password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to verify password: {}", e))?;

    if !matches {
        return Err(MediamartError::AuthError("invalid credentials".to_string()).into());
    }

    Ok(User::from(entity))
}

/// Seed the configured admin account when the users table is empty.
pub async fn ensure_default_admin(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<bool> {
    let existing = users::Entity::find().one(db).await?;
    if existing.is_some() {
        return Ok(false);
    }

    create(db, name, email, password, UserRole::Admin).await?;
    tracing::info!(email = %email, "seeded default admin account");

    Ok(true)
}
