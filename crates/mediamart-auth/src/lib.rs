//! MediaMart Auth - JWT tokens, password hashing and the role model.

pub mod model;
pub mod service;

pub use model::{AuthContext, JwtPayload, User};
