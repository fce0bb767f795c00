//! Startup assembly: logging and the HTTP server.

pub mod http;
pub mod logging;

pub use http::http_server;
pub use logging::{init_logging, LoggingConfig, LoggingGuard};
