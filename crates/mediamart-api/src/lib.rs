//! MediaMart API - request/response model types and boundary validation.

pub mod model;
pub mod validation;

pub use model::{
    ConstructionDetail, ConstructionListItem, ConstructionPayload, ConstructionQuery,
    ConstructionStats, ImportOutcome, Page, UpdateStatusPayload,
};
