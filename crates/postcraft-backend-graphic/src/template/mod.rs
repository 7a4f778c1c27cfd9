//! Template renderers.
//!
//! Each visual style is one [`Template`] implementation. A template receives
//! an already-resolved, canvas-sized background and draws its fixed sequence
//! of text blocks and shapes on top through the shared text layout engine.
//!
//! Canvas families:
//!
//! | Style   | Canvas      |
//! |---------|-------------|
//! | Modern  | 800 x 800   |
//! | Minimal | 1080 x 1080 |
//! | Bold    | 1080 x 1080 |

mod bold;
mod minimal;
mod modern;

pub use bold::BoldTemplate;
pub use minimal::MinimalTemplate;
pub use modern::ModernTemplate;

use postcraft_spec::TemplateStyle;

use crate::canvas::Canvas;
use crate::font::FontLibrary;
use crate::palette::ColorPalette;

/// Everything a template draws, borrowed from the request.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub category: &'a str,
    pub palette: ColorPalette,
    pub headline: &'a str,
    pub description: &'a str,
    pub phone_number: &'a str,
    /// Pre-joined `#tag #tag` line, if any.
    pub hashtags: Option<String>,
    /// Whether the background is photographic rather than a flat gradient.
    pub photo_background: bool,
    pub fonts: &'a FontLibrary,
}

impl Scene<'_> {
    /// Uppercased category badge text.
    pub fn badge_text(&self) -> String {
        format!("{} SERVICES", self.category.to_uppercase())
    }
}

/// One visual style.
///
/// `render` takes ownership of a background of exactly [`Template::canvas_size`]
/// and returns the finished image. Individual drawing steps never fail: text
/// that does not fit overflows and is clipped at the canvas edge.
pub trait Template: Send + Sync {
    /// Style this template implements.
    fn style(&self) -> TemplateStyle;

    /// Output size in pixels.
    fn canvas_size(&self) -> (u32, u32);

    /// Draw the scene over `canvas`.
    fn render(&self, canvas: Canvas, scene: &Scene<'_>) -> Canvas;
}

/// Smallest size a block is shrunk to when fitting it into its region.
const MIN_TEXT_SIZE: f32 = 8.0;

static MODERN: ModernTemplate = ModernTemplate;
static MINIMAL: MinimalTemplate = MinimalTemplate;
static BOLD: BoldTemplate = BoldTemplate;

/// Renderer for a style.
pub fn template_for(style: TemplateStyle) -> &'static dyn Template {
    match style {
        TemplateStyle::Modern => &MODERN,
        TemplateStyle::Minimal => &MINIMAL,
        TemplateStyle::Bold => &BOLD,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::vertical_gradient;
    use crate::color::Color;
    use crate::palette;

    fn scene<'a>(fonts: &'a FontLibrary, description: &'a str) -> Scene<'a> {
        Scene {
            category: "Plumbing",
            palette: palette::resolve("Plumbing"),
            headline: "Emergency Plumbing",
            description,
            phone_number: "(555) 123-4567",
            hashtags: Some("#plumber #local".to_string()),
            photo_background: false,
            fonts,
        }
    }

    #[test]
    fn test_template_for_matches_style() {
        for style in TemplateStyle::ALL {
            assert_eq!(template_for(style).style(), style);
        }
    }

    #[test]
    fn test_canvas_families() {
        assert_eq!(template_for(TemplateStyle::Modern).canvas_size(), (800, 800));
        assert_eq!(template_for(TemplateStyle::Minimal).canvas_size(), (1080, 1080));
        assert_eq!(template_for(TemplateStyle::Bold).canvas_size(), (1080, 1080));
    }

    #[test]
    fn test_every_template_keeps_size_and_draws() {
        let fonts = FontLibrary::builtin();
        for style in TemplateStyle::ALL {
            let template = template_for(style);
            let (w, h) = template.canvas_size();
            let background =
                vertical_gradient(w, h, Color::from_rgb8([0, 90, 180]), Color::gray(0.9)).unwrap();
            let out = template.render(background.clone(), &scene(&fonts, "Fast & reliable service"));
            assert_eq!((out.width, out.height), (w, h));
            assert_ne!(out, background, "{} drew nothing", style.as_str());
        }
    }

    #[test]
    fn test_badge_text() {
        let fonts = FontLibrary::builtin();
        let mut s = scene(&fonts, "");
        s.category = "HVAC";
        assert_eq!(s.badge_text(), "HVAC SERVICES");
        s.category = "Cleaning";
        assert_eq!(s.badge_text(), "CLEANING SERVICES");
    }
}
