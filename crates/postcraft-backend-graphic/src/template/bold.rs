//! Bold: white card with a drop shadow and an accent action bar.

use postcraft_spec::TemplateStyle;

use crate::canvas::{Canvas, Rect};
use crate::color::Color;
use crate::font::FontRole;
use crate::text::{draw_text, fit_text, TextStyle};

use super::{Scene, Template, MIN_TEXT_SIZE};

const SIZE: u32 = 1080;
const CENTER_X: i32 = (SIZE / 2) as i32;

/// Card spans x 120..960, y 180..900.
const CARD: Rect = Rect::new(120, 180, 840, 720);
const SHADOW_OFFSET: i32 = 16;
const SHADOW_ALPHA: f64 = 0.35;
const ACTION_BAR_HEIGHT: u32 = 120;

const HEADLINE_AT: (i32, i32) = (CENTER_X, 330);
/// Rows 230..430 inside the card, above the rule.
const HEADLINE_BOX: (u32, u32) = (800, 200);
const RULE_Y: i32 = 440;
const DESCRIPTION_AT: (i32, i32) = (CENTER_X, 600);
/// Rows 460..740, above the action bar.
const DESCRIPTION_BOX: (u32, u32) = (800, 280);
const HASHTAGS_AT: (i32, i32) = (CENTER_X, 980);
const HASHTAGS_BOX: (u32, u32) = (1040, 60);

#[derive(Debug, Clone, Copy, Default)]
pub struct BoldTemplate;

fn headline_style(scene: &Scene<'_>) -> TextStyle {
    let style = TextStyle::new(FontRole::Headline, 56.0, scene.palette.primary()).wrap(16);
    fit_text(scene.fonts, scene.headline, &style, HEADLINE_BOX, MIN_TEXT_SIZE)
}

fn description_style(scene: &Scene<'_>) -> TextStyle {
    let style = TextStyle::new(FontRole::Body, 32.0, Color::from_rgb8([60, 60, 60])).wrap(32);
    fit_text(scene.fonts, scene.description, &style, DESCRIPTION_BOX, MIN_TEXT_SIZE)
}

fn hashtag_style(scene: &Scene<'_>, tags: &str) -> TextStyle {
    let style = TextStyle::new(FontRole::Body, 28.0, Color::white()).stroke(2, Color::gray(0.1));
    fit_text(scene.fonts, tags, &style, HASHTAGS_BOX, MIN_TEXT_SIZE)
}

fn action_bar() -> Rect {
    Rect::new(
        CARD.x,
        CARD.bottom() - ACTION_BAR_HEIGHT as i32,
        CARD.width,
        ACTION_BAR_HEIGHT,
    )
}

impl Template for BoldTemplate {
    fn style(&self) -> TemplateStyle {
        TemplateStyle::Bold
    }

    fn canvas_size(&self) -> (u32, u32) {
        (SIZE, SIZE)
    }

    fn render(&self, mut canvas: Canvas, scene: &Scene<'_>) -> Canvas {
        let fonts = scene.fonts;
        let palette = scene.palette;

        canvas.blend_rect(
            CARD.offset(SHADOW_OFFSET, SHADOW_OFFSET),
            Color::black().with_alpha(SHADOW_ALPHA),
        );
        canvas.fill_rect(CARD, Color::white());

        draw_text(&mut canvas, fonts, scene.headline, &headline_style(scene), HEADLINE_AT);

        canvas.hline(CENTER_X, RULE_Y, 400, 6, palette.accent());

        draw_text(
            &mut canvas,
            fonts,
            scene.description,
            &description_style(scene),
            DESCRIPTION_AT,
        );

        let bar = action_bar();
        canvas.fill_rect(bar, palette.accent());
        let call = TextStyle::new(FontRole::Action, 40.0, palette.accent().contrasting_text()).wrap(28);
        draw_text(
            &mut canvas,
            fonts,
            &format!("CALL NOW: {}", scene.phone_number),
            &call,
            (CENTER_X, bar.y + (ACTION_BAR_HEIGHT / 2) as i32),
        );

        if let Some(tags) = &scene.hashtags {
            draw_text(&mut canvas, fonts, tags, &hashtag_style(scene, tags), HASHTAGS_AT);
        }

        canvas
    }
}
