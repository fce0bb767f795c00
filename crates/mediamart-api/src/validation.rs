//! Input validation utilities for the MediaMart API
//!
//! Validation happens in explicit functions invoked at the API boundary,
//! not through serializer annotations.

use std::sync::LazyLock;

use validator::ValidationError;

use crate::model::{ConstructionPayload, ConstructionQuery, ConstructionQueryParams};

/// Maximum length for the address field
pub const MAX_ADDRESS_LENGTH: usize = 512;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Default page number when none is supplied
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when none is supplied
pub const DEFAULT_LIMIT: u64 = 20;

/// Largest accepted page number
pub const MAX_PAGE: u64 = 1_000_000;

/// Largest accepted page size
pub const MAX_LIMIT: u64 = 1_000;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex pattern")
});

/// Validate a creation payload.
///
/// The address is the only required field; everything else is optional.
pub fn validate_create(payload: &ConstructionPayload) -> Result<(), ValidationError> {
    match payload.address.as_deref() {
        None => Err(ValidationError::new("address_missing")),
        Some(address) if address.trim().is_empty() => Err(ValidationError::new("address_empty")),
        Some(address) if address.len() > MAX_ADDRESS_LENGTH => {
            Err(ValidationError::new("address_too_long"))
        }
        Some(_) => Ok(()),
    }
}

/// Validate and normalize list query parameters.
///
/// Out-of-enumeration `format`/`status` values are rejected; `page` and
/// `limit` fall back to their defaults and are clamped to `1..=MAX_PAGE`
/// and `1..=MAX_LIMIT` so absurd values never reach the database.
pub fn parse_query(params: &ConstructionQueryParams) -> Result<ConstructionQuery, ValidationError> {
    let format = params
        .format
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(|_| ValidationError::new("format_unknown"))?;

    let status = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(|_| ValidationError::new("status_unknown"))?;

    Ok(ConstructionQuery {
        format,
        status,
        city: params.city.clone().filter(|s| !s.is_empty()),
        q: params.q.clone().filter(|s| !s.is_empty()),
        page: params.page.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE),
        limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
    })
}

/// Validate an email address shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email_invalid"));
    }
    Ok(())
}

/// Validate a plaintext password before hashing.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}
