//! Postcraft Graphic Composition Backend
//!
//! This crate renders square social-media graphics for local-service
//! businesses: a category-colored background (flat gradient, stock photo or
//! generated image) with a headline, category badge, description and phone
//! call-to-action laid out by one of three templates.
//!
//! # Features
//!
//! - **Palette Resolver**: one static table of category colors and backgrounds
//! - **Background Provider**: gradient, cover-fit photos, mandatory gradient fallback
//! - **Text Layout**: character-count wrapping, 9-point anchors, stroke and contrast plates
//! - **Templates**: Modern (800x800), Minimal and Bold (1080x1080)
//! - **Deterministic PNG**: fixed encoder settings and BLAKE3 output hashes
//!
//! # Example
//!
//! ```no_run
//! use postcraft_backend_graphic::{ComposerConfig, GraphicComposer, PngConfig, SourceSelector};
//! use postcraft_spec::{GraphicRequest, TemplateStyle};
//! use std::path::Path;
//!
//! let composer = GraphicComposer::new(ComposerConfig::deterministic(
//!     "assets",
//!     SourceSelector::Seeded(42),
//! ));
//! let request = GraphicRequest::new(
//!     "Plumbing",
//!     TemplateStyle::Modern,
//!     "Emergency Plumbing",
//!     "Fast & reliable service",
//!     "(555) 123-4567",
//! );
//!
//! let graphic = composer.create_graphic(&request).unwrap();
//! assert_eq!((graphic.width(), graphic.height()), (800, 800));
//! graphic.save_png(Path::new("output/Plumbing_post.png"), &PngConfig::default()).unwrap();
//! ```
//!
//! # Determinism
//!
//! With a `Fixed` or `Seeded` background selector and the same fonts, the
//! same request always renders to pixel-identical output and the same PNG
//! hash.
//!
//! # Cargo features
//!
//! - `remote`: fetch http(s) background sources and enable
//!   `HttpImageProvider` for hosted image generation.

pub mod background;
pub mod canvas;
pub mod color;
pub mod compose;
pub mod config;
pub mod font;
pub mod palette;
pub mod png;
pub mod provider;
pub mod rng;
pub mod template;
pub mod text;

// Re-export main types for convenience
pub use background::{BackgroundError, BackgroundProvider, BackgroundSource, ResolvedBackground};
pub use canvas::{Canvas, CanvasError, Rect};
pub use color::Color;
pub use compose::{create_graphic, default_composer, Graphic, GraphicComposer, RenderError, RenderNote};
pub use config::{ComposerConfig, ConfigError};
pub use font::{Face, FontError, FontLibrary, FontRole, LineExtent};
pub use palette::{resolve as resolve_palette, CategoryProfile, ColorPalette};
pub use crate::png::{PngConfig, PngError};
pub use provider::{
    ContentProvider, GeneratedText, ProviderError, StaticProvider, TextPrompt,
};
#[cfg(feature = "remote")]
pub use provider::{HttpImageProvider, DEFAULT_IMAGE_ENDPOINT};
pub use rng::{DeterministicRng, SourceSelector};
pub use template::{template_for, Template};
pub use text::{draw_text, fit_text, measure_text, wrap_text, Anchor, Plate, PlateTone, TextStyle};
