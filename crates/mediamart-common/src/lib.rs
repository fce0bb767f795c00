//! Common types shared across MediaMart crates.

pub mod error;

pub use error::MediamartError;

/// Service name used in logs and default configuration paths.
pub const SERVICE_NAME: &str = "mediamart";
