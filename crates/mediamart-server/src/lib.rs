//! MediaMart server: HTTP surface, middleware and startup assembly for the
//! outdoor advertising inventory backend.

pub mod api;
pub mod middleware;
pub mod model;
pub mod secured;
pub mod startup;
