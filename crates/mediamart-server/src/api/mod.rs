//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod constructions;
pub mod files;
