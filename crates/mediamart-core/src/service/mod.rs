pub mod construction;
pub mod import;
