//! Background provider.
//!
//! Produces a canvas-sized, opaque background for a category. Photo sources
//! are decoded, scaled to cover the canvas and center-cropped. Any failure on
//! the way degrades to the category's flat gradient; only the gradient itself
//! can fail, and only for invalid canvas dimensions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::imageops::{self, FilterType};
use image::DynamicImage;
use postcraft_spec::BackgroundMode;
use thiserror::Error;

use crate::canvas::{Canvas, CanvasError};
use crate::color::Color;
use crate::palette::{self, GRADIENT_NEUTRAL};
use crate::rng::SourceSelector;

/// Default timeout for remote background fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from loading a background source.
///
/// These never leave [`BackgroundProvider::background`]; they are logged and
/// replaced by the gradient fallback.
#[derive(Debug, Error)]
pub enum BackgroundError {
    /// Local asset does not exist.
    #[error("Background asset not found: {0}")]
    NotFound(PathBuf),

    /// Local asset could not be read.
    #[error("Failed to read background asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes are not a decodable image.
    #[error("Failed to decode background image: {0}")]
    Decode(#[from] image::ImageError),

    /// Decoded image has no pixels.
    #[error("Background image is empty")]
    EmptyImage,

    /// An http(s) source was selected but remote fetching is compiled out.
    #[error("Remote background source requires the `remote` feature: {0}")]
    RemoteDisabled(String),

    /// Remote fetch failed.
    #[error("Failed to fetch background {url}: {message}")]
    Fetch { url: String, message: String },

    /// Target canvas could not be allocated.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Where a background comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSource {
    /// Vertical linear gradient from `top` to `bottom`.
    Gradient { top: Color, bottom: Color },
    /// Local path (relative to the asset root) or http(s) URL.
    CachedImage(String),
    /// Encoded image bytes handed over by the image collaborator.
    GeneratedImage(Vec<u8>),
}

impl BackgroundSource {
    /// The flat fallback for a category.
    pub fn gradient_for(category: &str) -> Self {
        BackgroundSource::Gradient {
            top: palette::resolve(category).primary(),
            bottom: Color::from_rgb8(GRADIENT_NEUTRAL),
        }
    }

    /// Whether this source is photographic.
    pub fn is_photo(&self) -> bool {
        !matches!(self, BackgroundSource::Gradient { .. })
    }
}

/// A rendered background plus how it was obtained.
#[derive(Debug, Clone)]
pub struct ResolvedBackground {
    /// Canvas-sized opaque background.
    pub canvas: Canvas,
    /// True when a photo or generated image made it onto the canvas.
    pub photo: bool,
    /// Why the requested source was replaced by the gradient, if it was.
    pub fallback_reason: Option<String>,
}

/// Render a vertical gradient.
///
/// Row `y` uses `t = y / (height - 1)`, so the first row is exactly `top`
/// and the last row exactly `bottom`.
pub fn vertical_gradient(
    width: u32,
    height: u32,
    top: Color,
    bottom: Color,
) -> Result<Canvas, CanvasError> {
    let mut canvas = Canvas::new(width, height, top)?;
    let denom = (height.max(2) - 1) as f64;
    for y in 0..height {
        let t = y as f64 / denom;
        let row = top.lerp(&bottom, t).with_alpha(1.0);
        for x in 0..width {
            canvas.set(x, y, row);
        }
    }
    Ok(canvas)
}

/// Scale `img` to cover `width`x`height` (aspect preserved) and center-crop.
pub fn cover_fit(img: &DynamicImage, width: u32, height: u32) -> Result<Canvas, BackgroundError> {
    let (src_w, src_h) = (img.width(), img.height());
    if src_w == 0 || src_h == 0 {
        return Err(BackgroundError::EmptyImage);
    }
    // Validate the target before doing any resampling work.
    Canvas::new(width, height, Color::black())?;

    let scale = (width as f64 / src_w as f64).max(height as f64 / src_h as f64);
    let scaled_w = ((src_w as f64 * scale).ceil() as u32).max(width);
    let scaled_h = ((src_h as f64 * scale).ceil() as u32).max(height);

    let rgb = img.to_rgb8();
    let resized = if (scaled_w, scaled_h) == (src_w, src_h) {
        rgb
    } else {
        imageops::resize(&rgb, scaled_w, scaled_h, FilterType::Lanczos3)
    };

    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    let cropped = imageops::crop_imm(&resized, x, y, width, height).to_image();
    Ok(Canvas::from_rgb_image(&cropped)?)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolves background sources for categories.
#[derive(Debug, Clone)]
pub struct BackgroundProvider {
    asset_root: PathBuf,
    selector: SourceSelector,
    fetch_timeout: Duration,
}

impl Default for BackgroundProvider {
    fn default() -> Self {
        Self::new(PathBuf::from("."), SourceSelector::Random)
    }
}

impl BackgroundProvider {
    /// Create a provider reading local assets under `asset_root`.
    pub fn new(asset_root: impl Into<PathBuf>, selector: SourceSelector) -> Self {
        Self {
            asset_root: asset_root.into(),
            selector,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the timeout for remote fetches.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Root directory for relative asset paths.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Timeout applied to remote fetches.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Selection strategy for photo sources.
    pub fn selector(&self) -> SourceSelector {
        self.selector
    }

    /// Pick the source for a category and mode.
    ///
    /// Photo mode falls back to the gradient when the category has no sources.
    pub fn select_source(&self, category: &str, mode: BackgroundMode) -> BackgroundSource {
        match mode {
            BackgroundMode::Flat => BackgroundSource::gradient_for(category),
            BackgroundMode::Photo => {
                let profile = palette::profile_for_name(category);
                match self.selector.pick(category, profile.backgrounds.len()) {
                    Some(index) => {
                        BackgroundSource::CachedImage(profile.backgrounds[index].to_string())
                    }
                    None => BackgroundSource::gradient_for(category),
                }
            }
        }
    }

    /// Produce a background for `category`. Never fails except for invalid sizes.
    pub fn background(
        &self,
        category: &str,
        mode: BackgroundMode,
        size: (u32, u32),
    ) -> Result<ResolvedBackground, CanvasError> {
        let source = self.select_source(category, mode);
        self.resolve(category, &source, size)
    }

    /// Use image bytes from the image collaborator as a one-element photo source.
    pub fn from_generated(
        &self,
        category: &str,
        bytes: Vec<u8>,
        size: (u32, u32),
    ) -> Result<ResolvedBackground, CanvasError> {
        self.resolve(category, &BackgroundSource::GeneratedImage(bytes), size)
    }

    /// Render `source`, degrading to the category gradient on any failure.
    pub fn resolve(
        &self,
        category: &str,
        source: &BackgroundSource,
        size: (u32, u32),
    ) -> Result<ResolvedBackground, CanvasError> {
        match self.render_source(source, size) {
            Ok(canvas) => Ok(ResolvedBackground {
                canvas,
                photo: source.is_photo(),
                fallback_reason: None,
            }),
            Err(BackgroundError::Canvas(e)) => Err(e),
            Err(e) => {
                log::warn!(
                    "background for '{}' unavailable, using gradient: {}",
                    category,
                    e
                );
                let canvas = self.fallback(category, size)?;
                Ok(ResolvedBackground {
                    canvas,
                    photo: false,
                    fallback_reason: Some(e.to_string()),
                })
            }
        }
    }

    /// The flat gradient for a category.
    pub fn fallback(&self, category: &str, size: (u32, u32)) -> Result<Canvas, CanvasError> {
        let palette = palette::resolve(category);
        vertical_gradient(
            size.0,
            size.1,
            palette.primary(),
            Color::from_rgb8(GRADIENT_NEUTRAL),
        )
    }

    /// Render a source without any fallback.
    pub fn render_source(
        &self,
        source: &BackgroundSource,
        size: (u32, u32),
    ) -> Result<Canvas, BackgroundError> {
        let (width, height) = size;
        match source {
            BackgroundSource::Gradient { top, bottom } => {
                Ok(vertical_gradient(width, height, *top, *bottom)?)
            }
            BackgroundSource::CachedImage(location) => {
                let bytes = self.load_bytes(location)?;
                let img = image::load_from_memory(&bytes)?;
                log::debug!(
                    "loaded background {} ({}x{})",
                    location,
                    img.width(),
                    img.height()
                );
                cover_fit(&img, width, height)
            }
            BackgroundSource::GeneratedImage(bytes) => {
                let img = image::load_from_memory(bytes)?;
                cover_fit(&img, width, height)
            }
        }
    }

    fn load_bytes(&self, location: &str) -> Result<Vec<u8>, BackgroundError> {
        if is_remote(location) {
            return self.fetch_remote(location);
        }
        let path = Path::new(location);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        };
        if !path.exists() {
            return Err(BackgroundError::NotFound(path));
        }
        std::fs::read(&path).map_err(|source| BackgroundError::Io { path, source })
    }

    #[cfg(feature = "remote")]
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, BackgroundError> {
        let fail = |message: String| BackgroundError::Fetch {
            url: url.to_string(),
            message,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(self.fetch_timeout)
            .build()
            .map_err(|e| fail(format!("failed to create HTTP client: {e}")))?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| fail(format!("request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP status {}", response.status())));
        }
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| fail(format!("failed to read response body: {e}")))
    }

    #[cfg(not(feature = "remote"))]
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, BackgroundError> {
        Err(BackgroundError::RemoteDisabled(url.to_string()))
    }
}
