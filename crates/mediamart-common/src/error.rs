//! Application error types for MediaMart.
//!
//! Services return `anyhow::Result`; handlers downcast to `MediamartError`
//! to pick the HTTP status.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum MediamartError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("construction '{0}' not found")]
    ConstructionNotFound(String),

    #[error("user '{0}' not exist!")]
    UserNotExist(String),

    #[error("user '{0}' already exist")]
    UserAlreadyExist(String),

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_not_found_message() {
        let err = MediamartError::ConstructionNotFound("abc".to_string());
        assert_eq!(err.to_string(), "construction 'abc' not found");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err = anyhow::Error::from(MediamartError::UserNotExist("a@b.kz".to_string()));
        assert!(matches!(
            err.downcast_ref::<MediamartError>(),
            Some(MediamartError::UserNotExist(_))
        ));
    }
}
