//! CLI command implementations

pub mod calendar;
pub mod categories;
pub mod json_output;
pub mod render;
pub mod validate;
