//! Graphic composer, the public entry point.
//!
//! A render resolves the palette, picks the template, obtains a background
//! (asking the image collaborator first when the request wants a generated
//! one), then runs the template. Lower-layer problems are absorbed by their
//! own fallbacks; only a failure to produce any image reaches the caller.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use image::RgbImage;
use postcraft_spec::{BackendError, GraphicRequest, TemplateStyle};
use thiserror::Error;

use crate::background::{BackgroundProvider, ResolvedBackground};
use crate::canvas::{Canvas, CanvasError};
use crate::config::ComposerConfig;
use crate::font::FontLibrary;
use crate::palette::{self, ColorPalette};
use crate::png::{self, PngConfig, PngError};
use crate::provider::{self, ContentProvider, GeneratedText, ProviderError, TextPrompt};
use crate::template::{template_for, Scene};

/// Errors that prevent a render from producing an image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Not even the gradient fallback could be allocated.
    #[error("Background could not be produced: {0}")]
    Background(#[from] CanvasError),

    /// A drawing step panicked.
    #[error("Drawing failed: {0}")]
    Drawing(String),

    /// The template returned an image of the wrong size.
    #[error("Template {style} produced a {actual_width}x{actual_height} image, expected {width}x{height}")]
    SizeMismatch {
        style: &'static str,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::Background(_) => "RENDER_001",
            RenderError::Drawing(_) => "RENDER_002",
            RenderError::SizeMismatch { .. } => "RENDER_003",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}

/// Informational signal attached to a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNote {
    /// The image collaborator was missing, failed or timed out.
    GeneratedBackgroundUnavailable(String),
    /// The collaborator answered but its image could not be used.
    BackgroundFallback(String),
}

impl fmt::Display for RenderNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderNote::GeneratedBackgroundUnavailable(reason) => {
                write!(f, "generated background unavailable, used gradient: {}", reason)
            }
            RenderNote::BackgroundFallback(reason) => {
                write!(f, "generated background unusable, used gradient: {}", reason)
            }
        }
    }
}

/// A finished graphic. The caller owns it.
#[derive(Debug, Clone)]
pub struct Graphic {
    pub canvas: Canvas,
    pub style: TemplateStyle,
    pub palette: ColorPalette,
    pub notes: Vec<RenderNote>,
}

impl Graphic {
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Convert to an `image` RGB buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        self.canvas.to_rgb_image()
    }

    /// Encode as PNG, returning the bytes and their BLAKE3 hash.
    pub fn to_png(&self, config: &PngConfig) -> Result<(Vec<u8>, String), PngError> {
        png::write_rgb_to_vec_with_hash(&self.canvas, config)
    }

    /// Write a PNG file (creating parent directories) and return its hash.
    pub fn save_png(&self, path: &Path, config: &PngConfig) -> Result<String, PngError> {
        let (data, hash) = self.to_png(config)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(hash)
    }
}

/// Renders [`GraphicRequest`]s.
///
/// Holds only read-only state, so one composer can serve concurrent renders.
pub struct GraphicComposer {
    config: ComposerConfig,
    backgrounds: BackgroundProvider,
    fonts: FontLibrary,
    provider: Option<Arc<dyn ContentProvider>>,
}

impl fmt::Debug for GraphicComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphicComposer")
            .field("config", &self.config)
            .field("fonts", &self.fonts)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

impl Default for GraphicComposer {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}

impl GraphicComposer {
    /// Build a composer, resolving fonts once up front.
    pub fn new(config: ComposerConfig) -> Self {
        let backgrounds = BackgroundProvider::new(config.asset_root.clone(), config.selector)
            .with_fetch_timeout(config.provider_timeout());
        let fonts = FontLibrary::load(&config.font_dirs);
        Self {
            config,
            backgrounds,
            fonts,
            provider: None,
        }
    }

    /// Attach a content collaborator.
    pub fn with_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the resolved fonts.
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn backgrounds(&self) -> &BackgroundProvider {
        &self.backgrounds
    }

    /// Ask the collaborator for headline, description and hashtags.
    ///
    /// The engine never invents copy itself; callers supply their own
    /// fallback text when this fails.
    pub fn suggest_text(&self, prompt: &TextPrompt) -> Result<GeneratedText, ProviderError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| ProviderError::Unavailable("no content provider configured".to_string()))?;
        provider::generate_text_with_timeout(provider, prompt, self.config.provider_timeout())
    }

    /// Render one request.
    pub fn create_graphic(&self, request: &GraphicRequest) -> Result<Graphic, RenderError> {
        let palette = palette::resolve(&request.category);
        let template = template_for(request.template_style);
        let size = template.canvas_size();
        let mut notes = Vec::new();

        let background = self.resolve_background(request, size, &mut notes)?;
        let hashtags = request.hashtag_line();
        let scene = Scene {
            category: &request.category,
            palette,
            headline: &request.headline,
            description: &request.description,
            phone_number: &request.phone_number,
            hashtags,
            photo_background: background.photo,
            fonts: &self.fonts,
        };

        let canvas = panic::catch_unwind(AssertUnwindSafe(|| {
            template.render(background.canvas, &scene)
        }))
        .map_err(|payload| RenderError::Drawing(panic_message(payload.as_ref())))?;

        if (canvas.width, canvas.height) != size {
            return Err(RenderError::SizeMismatch {
                style: template.style().as_str(),
                width: size.0,
                height: size.1,
                actual_width: canvas.width,
                actual_height: canvas.height,
            });
        }

        log::debug!(
            "rendered {} graphic for '{}' ({}x{}, {} notes)",
            template.style().as_str(),
            request.category,
            canvas.width,
            canvas.height,
            notes.len()
        );

        Ok(Graphic {
            canvas,
            style: template.style(),
            palette,
            notes,
        })
    }

    fn resolve_background(
        &self,
        request: &GraphicRequest,
        size: (u32, u32),
        notes: &mut Vec<RenderNote>,
    ) -> Result<ResolvedBackground, CanvasError> {
        let category = request.category.as_str();
        if !request.generate_background {
            return self.backgrounds.background(category, request.background, size);
        }

        let generated = match &self.provider {
            Some(provider) => provider::generate_image_with_timeout(
                provider,
                &request.image_prompt(),
                self.config.provider_timeout(),
            ),
            None => Err(ProviderError::Unavailable(
                "no image provider configured".to_string(),
            )),
        };

        match generated {
            Ok(bytes) => {
                let resolved = self.backgrounds.from_generated(category, bytes, size)?;
                if let Some(reason) = &resolved.fallback_reason {
                    notes.push(RenderNote::BackgroundFallback(reason.clone()));
                }
                Ok(resolved)
            }
            Err(e) => {
                log::warn!("image generation for '{}' failed: {}", category, e);
                notes.push(RenderNote::GeneratedBackgroundUnavailable(e.to_string()));
                Ok(ResolvedBackground {
                    canvas: self.backgrounds.fallback(category, size)?,
                    photo: false,
                    fallback_reason: Some(e.to_string()),
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

static DEFAULT_COMPOSER: OnceLock<GraphicComposer> = OnceLock::new();

/// Process-wide composer with the default configuration.
pub fn default_composer() -> &'static GraphicComposer {
    DEFAULT_COMPOSER.get_or_init(GraphicComposer::default)
}

/// Render a request with the process-wide default composer.
pub fn create_graphic(request: &GraphicRequest) -> Result<Graphic, RenderError> {
    default_composer().create_graphic(request)
}
