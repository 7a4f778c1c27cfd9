//! Modern: full-bleed background, stacked centered text, phone band.

use postcraft_spec::TemplateStyle;

use crate::canvas::{Canvas, Rect};
use crate::color::Color;
use crate::font::FontRole;
use crate::text::{draw_text, fit_text, Plate, TextStyle};

use super::{Scene, Template, MIN_TEXT_SIZE};

const SIZE: u32 = 800;
const CENTER_X: i32 = (SIZE / 2) as i32;
const DESCRIPTION_FILL: [u8; 3] = [50, 50, 50];

const HEADLINE_AT: (i32, i32) = (CENTER_X, 100);
/// Rows 30..170, clear of the badge.
const HEADLINE_BOX: (u32, u32) = (760, 140);
const BADGE_AT: (i32, i32) = (CENTER_X, 200);
const DESCRIPTION_AT: (i32, i32) = (CENTER_X, 400);
/// Rows 280..520; the plate padding still ends above the hashtags.
const DESCRIPTION_BOX: (u32, u32) = (720, 240);
const HASHTAGS_AT: (i32, i32) = (CENTER_X, 560);
const HASHTAGS_BOX: (u32, u32) = (760, 60);

/// Headline near the top, badge below it, description on a contrast plate,
/// and a primary-colored call-to-action band near the bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernTemplate;

/// The headline is drawn in the primary color over a gradient that starts at
/// the primary color, so its fill is swapped whenever it would not read.
fn headline_style(scene: &Scene<'_>) -> TextStyle {
    let mut style = TextStyle::new(FontRole::Headline, 48.0, scene.palette.primary())
        .wrap(20)
        .legible();
    if scene.photo_background {
        style = style.stroke(2, Color::white());
    }
    fit_text(scene.fonts, scene.headline, &style, HEADLINE_BOX, MIN_TEXT_SIZE)
}

fn badge_style(scene: &Scene<'_>) -> TextStyle {
    let style = TextStyle::new(FontRole::Badge, 36.0, scene.palette.accent());
    if scene.photo_background {
        style.stroke(2, Color::gray(0.1))
    } else {
        style
    }
}

fn description_style(scene: &Scene<'_>) -> TextStyle {
    let style = TextStyle::new(FontRole::Body, 28.0, Color::from_rgb8(DESCRIPTION_FILL))
        .wrap(30)
        .plate(Plate::auto(20));
    fit_text(scene.fonts, scene.description, &style, DESCRIPTION_BOX, MIN_TEXT_SIZE)
}

fn hashtag_style(scene: &Scene<'_>, tags: &str) -> TextStyle {
    let style = TextStyle::new(FontRole::Body, 22.0, scene.palette.secondary()).plate(Plate::auto(8));
    fit_text(scene.fonts, tags, &style, HASHTAGS_BOX, MIN_TEXT_SIZE)
}

impl Template for ModernTemplate {
    fn style(&self) -> TemplateStyle {
        TemplateStyle::Modern
    }

    fn canvas_size(&self) -> (u32, u32) {
        (SIZE, SIZE)
    }

    fn render(&self, mut canvas: Canvas, scene: &Scene<'_>) -> Canvas {
        let fonts = scene.fonts;
        let palette = scene.palette;
        let height = canvas.height as i32;

        draw_text(&mut canvas, fonts, scene.headline, &headline_style(scene), HEADLINE_AT);
        draw_text(&mut canvas, fonts, &scene.badge_text(), &badge_style(scene), BADGE_AT);
        draw_text(
            &mut canvas,
            fonts,
            scene.description,
            &description_style(scene),
            DESCRIPTION_AT,
        );

        if let Some(tags) = &scene.hashtags {
            draw_text(&mut canvas, fonts, tags, &hashtag_style(scene, tags), HASHTAGS_AT);
        }

        canvas.fill_rect(Rect::new(0, height - 150, canvas.width, 100), palette.primary());
        let call = TextStyle::new(FontRole::Action, 32.0, palette.accent());
        draw_text(
            &mut canvas,
            fonts,
            &format!("CALL {}", scene.phone_number),
            &call,
            (CENTER_X, height - 100),
        );

        canvas
    }
}
