//! Postcraft CLI library.
//!
//! This crate provides the command implementations behind the `postcraft`
//! binary: rendering graphics, validating requests, listing categories and
//! exporting the weekly content calendar.

pub mod commands;
pub mod logging;
