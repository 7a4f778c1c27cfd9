//! Postcraft Graphic Request Library
//!
//! This crate provides the data model for Postcraft render requests: the
//! business categories, the template styles, the background modes, and the
//! [`GraphicRequest`] handed to the composition engine.
//!
//! # Example
//!
//! ```
//! use postcraft_spec::{GraphicRequest, TemplateStyle};
//! use postcraft_spec::validation::validate_request;
//!
//! let request = GraphicRequest::new(
//!     "Plumbing",
//!     TemplateStyle::Modern,
//!     "Emergency Plumbing",
//!     "Fast & reliable service",
//!     "(555) 123-4567",
//! )
//! .with_hashtags(["plumber", "247service"]);
//!
//! let result = validate_request(&request);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`request`]: Request, category, and style types
//! - [`validation`]: Request validation functions

pub mod error;
pub mod request;
pub mod validation;

pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use request::{
    BackgroundMode, Category, GraphicRequest, TemplateStyle, MAX_DESCRIPTION_CHARS,
    MAX_HASHTAGS, MAX_HEADLINE_CHARS,
};
pub use validation::validate_request;
