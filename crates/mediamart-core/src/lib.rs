//! MediaMart Core - domain services for the advertising inventory.
//!
//! Services are free async functions over a `DatabaseConnection`, assembled
//! explicitly by the server at startup.

pub mod service;

pub use service::{construction, import};
