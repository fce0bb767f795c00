//! Auth model types.

use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mediamart_persistence::UserRole;
use mediamart_persistence::entity::users;

/// Outward-facing user view. The credential hash stays on the entity and is
/// never part of this struct, so it cannot leak into a response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: chrono::NaiveDateTime,
}

impl From<users::Model> for User {
    fn from(value: users::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

impl From<&users::Model> for User {
    fn from(value: &users::Model) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            role: value.role,
            created_at: value.created_at,
        }
    }
}

/// JWT claims: the user id as subject, the role for request-time
/// authorization, and the expiry timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JwtPayload {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: i64,
}

/// Per-request authentication context, inserted by the auth middleware.
#[derive(Debug, Default)]
pub struct AuthContext {
    pub user_id: Option<Uuid>,
    pub role: Option<UserRole>,
    pub jwt_error: Option<jsonwebtoken::errors::Error>,
    pub token_provided: bool,
}

impl AuthContext {
    pub fn jwt_error_string(&self) -> String {
        if let Some(e) = &self.jwt_error {
            match e.kind() {
                ErrorKind::ExpiredSignature => "token expired!".to_string(),
                _ => e.to_string(),
            }
        } else {
            String::default()
        }
    }

    /// True when the request carries a valid token with one of the given
    /// roles.
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.role.map(|r| roles.contains(&r)).unwrap_or(false)
    }
}
