//! Minimal: darkened background, light text, circular phone badge.

use postcraft_spec::TemplateStyle;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::font::FontRole;
use crate::text::{draw_text, fit_text, TextStyle};

use super::{Scene, Template, MIN_TEXT_SIZE};

const SIZE: u32 = 1080;
const CENTER_X: i32 = (SIZE / 2) as i32;
const OVERLAY_ALPHA: f64 = 0.45;
const BADGE_CENTER_Y: i32 = 900;
const BADGE_RADIUS: u32 = 150;

const HEADLINE_AT: (i32, i32) = (CENTER_X, 300);
/// Rows 190..410, above the accent rule.
const HEADLINE_BOX: (u32, u32) = (1000, 220);
const RULE_Y: i32 = 420;
const DESCRIPTION_AT: (i32, i32) = (CENTER_X, 560);
/// Rows 440..680.
const DESCRIPTION_BOX: (u32, u32) = (1000, 240);
const HASHTAGS_AT: (i32, i32) = (CENTER_X, 720);
/// Ends above the phone badge.
const HASHTAGS_BOX: (u32, u32) = (1000, 50);

#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalTemplate;

fn headline_style(scene: &Scene<'_>) -> TextStyle {
    let style = TextStyle::new(FontRole::Headline, 72.0, Color::white()).wrap(18);
    fit_text(scene.fonts, scene.headline, &style, HEADLINE_BOX, MIN_TEXT_SIZE)
}

fn description_style(scene: &Scene<'_>) -> TextStyle {
    let style =
        TextStyle::new(FontRole::BodyLight, 36.0, Color::from_rgb8([230, 230, 230])).wrap(34);
    fit_text(scene.fonts, scene.description, &style, DESCRIPTION_BOX, MIN_TEXT_SIZE)
}

fn hashtag_style(scene: &Scene<'_>, tags: &str) -> TextStyle {
    let style = TextStyle::new(FontRole::Body, 28.0, scene.palette.accent());
    fit_text(scene.fonts, tags, &style, HASHTAGS_BOX, MIN_TEXT_SIZE)
}

impl Template for MinimalTemplate {
    fn style(&self) -> TemplateStyle {
        TemplateStyle::Minimal
    }

    fn canvas_size(&self) -> (u32, u32) {
        (SIZE, SIZE)
    }

    fn render(&self, mut canvas: Canvas, scene: &Scene<'_>) -> Canvas {
        let fonts = scene.fonts;
        let accent = scene.palette.accent();

        canvas.overlay(Color::black().with_alpha(OVERLAY_ALPHA));

        draw_text(&mut canvas, fonts, scene.headline, &headline_style(scene), HEADLINE_AT);

        canvas.hline(CENTER_X, RULE_Y, 200, 4, accent);

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

        canvas.fill_circle(CENTER_X, BADGE_CENTER_Y, BADGE_RADIUS, accent);
        let ink = accent.contrasting_text();
        let label = TextStyle::new(FontRole::Action, 28.0, ink);
        draw_text(&mut canvas, fonts, "CALL", &label, (CENTER_X, BADGE_CENTER_Y - 50));
        let phone = TextStyle::new(FontRole::Action, 30.0, ink).wrap(10);
        draw_text(
            &mut canvas,
            fonts,
            scene.phone_number,
            &phone,
            (CENTER_X, BADGE_CENTER_Y + 15),
        );

        canvas
    }
}
