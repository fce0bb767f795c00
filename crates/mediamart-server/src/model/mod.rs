//! Server-side models
//!
//! - `config` - Application configuration loaded from file, env and CLI
//! - `app_state` - Application state shared across handlers
//! - `response` - Error response structures

pub mod app_state;
pub mod config;
pub mod response;

pub use app_state::AppState;
pub use config::Configuration;
pub use response::ErrorResult;
