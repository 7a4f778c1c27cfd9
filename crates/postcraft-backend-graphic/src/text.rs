//! Text layout engine.
//!
//! Text is wrapped by character count, not by measured width: a greedy
//! word wrap that keeps lines at or under `max_chars` characters and
//! hard-breaks words that are longer than a whole line. The wrapped block is
//! then measured with the role's face, positioned by its anchor, and drawn
//! with an optional stroke and contrast plate.

use std::str::FromStr;

use crate::canvas::{Canvas, Rect};
use crate::color::Color;
use crate::font::{pen_column, FontLibrary, FontRole};

/// Greedy word wrap by character count.
///
/// Whitespace runs (including newlines) collapse to single spaces. A word
/// longer than `max_chars` first fills what is left of the current line and
/// continues on following lines. `max_chars == 0` is treated as 1.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let width = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest: Vec<char> = word.chars().collect();
        while !rest.is_empty() {
            let needed = if current_len == 0 {
                rest.len()
            } else {
                current_len + 1 + rest.len()
            };
            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(rest.iter());
                current_len += rest.len();
                break;
            }

            if rest.len() > width {
                let room = if current_len == 0 {
                    width
                } else {
                    width.saturating_sub(current_len + 1)
                };
                if room > 0 {
                    if current_len > 0 {
                        current.push(' ');
                    }
                    current.extend(rest.drain(..room));
                }
            }
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Horizontal anchor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAnchor {
    Start,
    Middle,
    End,
}

/// Vertical anchor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

/// Which point of the text block is placed at the anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub horizontal: HAnchor,
    pub vertical: VAnchor,
}

impl Anchor {
    /// Center of the block.
    pub const MIDDLE_MIDDLE: Anchor = Anchor::new(HAnchor::Middle, VAnchor::Middle);
    /// Top-left corner of the block.
    pub const START_TOP: Anchor = Anchor::new(HAnchor::Start, VAnchor::Top);

    pub const fn new(horizontal: HAnchor, vertical: VAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner of a `width` x `height` block anchored at `(x, y)`.
    pub fn origin(&self, x: i32, y: i32, width: u32, height: u32) -> (i32, i32) {
        let ox = match self.horizontal {
            HAnchor::Start => x,
            HAnchor::Middle => x - (width / 2) as i32,
            HAnchor::End => x - width as i32,
        };
        let oy = match self.vertical {
            VAnchor::Top => y,
            VAnchor::Middle => y - (height / 2) as i32,
            VAnchor::Bottom => y - height as i32,
        };
        (ox, oy)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::MIDDLE_MIDDLE
    }
}

/// Error parsing a two-letter anchor code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid anchor code '{0}' (expected e.g. \"mm\", \"lt\", \"rb\")")]
pub struct AnchorParseError(pub String);

impl FromStr for Anchor {
    type Err = AnchorParseError;

    /// Two-letter code: `l`/`m`/`r` then `t`/`m`/`b`. Ascender (`a`) reads as
    /// top; baseline (`s`) and descender (`d`) read as bottom.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AnchorParseError(s.to_string());
        let mut chars = s.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let horizontal = match h {
            'l' => HAnchor::Start,
            'm' => HAnchor::Middle,
            'r' => HAnchor::End,
            _ => return Err(err()),
        };
        let vertical = match v {
            't' | 'a' => VAnchor::Top,
            'm' => VAnchor::Middle,
            'b' | 's' | 'd' => VAnchor::Bottom,
            _ => return Err(err()),
        };
        Ok(Anchor::new(horizontal, vertical))
    }
}

/// Alignment of each line inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Outline drawn around the glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: u32,
    pub color: Color,
}

/// How the contrast plate picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlateTone {
    /// White over dark backgrounds, black over light ones.
    #[default]
    Auto,
    /// Always this color.
    Fixed(Color),
}

/// Semi-opaque rectangle drawn behind a text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    pub padding: u32,
    pub opacity: f64,
    pub tone: PlateTone,
}

impl Plate {
    /// Auto-toned plate with the given padding.
    pub fn auto(padding: u32) -> Self {
        Self {
            padding,
            opacity: 0.7,
            tone: PlateTone::Auto,
        }
    }
}

/// Everything needed to lay out and draw one text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub role: FontRole,
    pub size: f32,
    pub color: Color,
    /// Wrap width in characters. `None` keeps the text on one line.
    pub max_chars: Option<usize>,
    pub anchor: Anchor,
    pub align: Align,
    /// Extra pixels between lines.
    pub line_spacing: u32,
    pub stroke: Option<Stroke>,
    pub plate: Option<Plate>,
    /// Swap the fill for a contrasting one when it would not read on the
    /// background under the block.
    pub ensure_contrast: bool,
}

impl TextStyle {
    /// Single-line, center-anchored text.
    pub fn new(role: FontRole, size: f32, color: Color) -> Self {
        Self {
            role,
            size,
            color,
            max_chars: None,
            anchor: Anchor::MIDDLE_MIDDLE,
            align: Align::Center,
            line_spacing: 4,
            stroke: None,
            plate: None,
            ensure_contrast: false,
        }
    }

    pub fn wrap(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_spacing(mut self, pixels: u32) -> Self {
        self.line_spacing = pixels;
        self
    }

    pub fn stroke(mut self, width: u32, color: Color) -> Self {
        self.stroke = (width > 0).then_some(Stroke { width, color });
        self
    }

    pub fn plate(mut self, plate: Plate) -> Self {
        self.plate = Some(plate);
        self
    }

    pub fn legible(mut self) -> Self {
        self.ensure_contrast = true;
        self
    }
}

/// A wrapped and measured text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub line_widths: Vec<u32>,
    /// Leftmost ink column of each line relative to its pen start.
    pub line_offsets: Vec<i32>,
    pub line_height: u32,
    /// Tight box of the block, positioned by the anchor.
    pub bounds: Rect,
}

/// Wrap and measure `text`, anchoring the block at `at`.
pub fn layout_text(fonts: &FontLibrary, text: &str, style: &TextStyle, at: (i32, i32)) -> TextLayout {
    let lines = match style.max_chars {
        Some(max_chars) => wrap_text(text, max_chars),
        None => {
            let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if joined.is_empty() {
                Vec::new()
            } else {
                vec![joined]
            }
        }
    };

    let face = fonts.face(style.role);
    let line_height = face.line_height(style.size);
    let (line_widths, line_offsets): (Vec<u32>, Vec<i32>) = lines
        .iter()
        .map(|line| {
            let extent = face.line_extent(line, style.size);
            (extent.width, extent.left)
        })
        .unzip();

    let width = line_widths.iter().copied().max().unwrap_or(0);
    let count = lines.len() as u32;
    let height = if count == 0 {
        0
    } else {
        count * line_height + (count - 1) * style.line_spacing
    };
    let (x, y) = style.anchor.origin(at.0, at.1, width, height);

    TextLayout {
        lines,
        line_widths,
        line_offsets,
        line_height,
        bounds: Rect::new(x, y, width, height),
    }
}

/// Shrink `style` until the block for `text` fits in `max`.
///
/// Each step scales the size by 0.85 and widens the wrap width by the same
/// ratio, so lines keep about the same pixel width while the block gets
/// shorter. Gives up at `min_size`, returning that style even if it still
/// overflows.
pub fn fit_text(
    fonts: &FontLibrary,
    text: &str,
    style: &TextStyle,
    max: (u32, u32),
    min_size: f32,
) -> TextStyle {
    let mut fitted = style.clone();
    loop {
        let bounds = measure_text(fonts, text, &fitted, (0, 0));
        if (bounds.width <= max.0 && bounds.height <= max.1) || fitted.size <= min_size {
            return fitted;
        }
        let size = (fitted.size * 0.85).max(min_size);
        let ratio = style.size / size;
        fitted.max_chars = style
            .max_chars
            .map(|chars| ((chars as f32 * ratio).floor() as usize).max(1));
        fitted.size = size;
    }
}

/// Box the wrapped block would occupy, without drawing.
pub fn measure_text(fonts: &FontLibrary, text: &str, style: &TextStyle, at: (i32, i32)) -> Rect {
    layout_text(fonts, text, style, at).bounds
}

/// Coverage mask for a laid-out block, in block-local coordinates.
///
/// The mask extends `pad` pixels past the block on every side so accents
/// and descenders outside the line box are kept.
struct Mask {
    width: u32,
    height: u32,
    pad: i32,
    data: Vec<u8>,
}

impl Mask {
    fn render(fonts: &FontLibrary, layout: &TextLayout, style: &TextStyle) -> Mask {
        let pad = (layout.line_height / 2) as i32;
        let block_width = layout.bounds.width;
        let width = block_width + 2 * pad as u32;
        let height = layout.bounds.height + 2 * pad as u32;
        let mut data = vec![0u8; (width as usize) * (height as usize)];
        let face = fonts.face(style.role);

        for (i, line) in layout.lines.iter().enumerate() {
            let slack = block_width - layout.line_widths[i];
            let align = match style.align {
                Align::Left => 0,
                Align::Center => (slack / 2) as i32,
                Align::Right => slack as i32,
            };
            let origin_x = pad + align - layout.line_offsets[i];
            let line_top =
                pad + (i as u32 * (layout.line_height + style.line_spacing)) as i32;

            let mut pen = 0.0f32;
            for ch in line.chars() {
                let glyph = face.glyph(ch, style.size);
                let left = origin_x + pen_column(pen) + glyph.left;
                for gy in 0..glyph.height {
                    let my = line_top + glyph.top + gy as i32;
                    if my < 0 || my >= height as i32 {
                        continue;
                    }
                    for gx in 0..glyph.width {
                        let mx = left + gx as i32;
                        if mx < 0 || mx >= width as i32 {
                            continue;
                        }
                        let c = glyph.coverage[(gy * glyph.width + gx) as usize];
                        let idx = my as usize * width as usize + mx as usize;
                        data[idx] = data[idx].max(c);
                    }
                }
                pen += glyph.advance;
            }
        }

        Mask {
            width,
            height,
            pad,
            data,
        }
    }

    /// Blend the mask onto `canvas` with the block's top-left at `(x, y)`.
    fn stamp(&self, canvas: &mut Canvas, x: i32, y: i32, color: Color) {
        let (ox, oy) = (x - self.pad, y - self.pad);
        for my in 0..self.height {
            for mx in 0..self.width {
                let c = self.data[(my * self.width + mx) as usize];
                if c > 0 {
                    canvas.blend_pixel(ox + mx as i32, oy + my as i32, color, c as f64 / 255.0);
                }
            }
        }
    }
}

/// Offsets for an outline of the given width: the 8 compass directions at
/// every radius from 1 to `width`.
fn stroke_offsets(width: u32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::with_capacity(width as usize * 8);
    for r in 1..=width as i32 {
        offsets.extend_from_slice(&[
            (-r, 0),
            (r, 0),
            (0, -r),
            (0, r),
            (-r, -r),
            (r, -r),
            (-r, r),
            (r, r),
        ]);
    }
    offsets
}

/// Fill color that reads on top of `background`.
///
/// Keeps `requested` when it differs enough in luminance, otherwise picks
/// near-black or white.
fn legible_on(requested: Color, background: Color) -> Color {
    if (requested.luminance() - background.luminance()).abs() >= 0.35 {
        requested
    } else {
        background.contrasting_text()
    }
}

/// Draw a text block onto `canvas` and return its tight box.
///
/// Pixels falling outside the canvas are clipped; overflowing text never
/// fails the call.
pub fn draw_text(
    canvas: &mut Canvas,
    fonts: &FontLibrary,
    text: &str,
    style: &TextStyle,
    at: (i32, i32),
) -> Rect {
    let layout = layout_text(fonts, text, style, at);
    if layout.lines.is_empty() {
        return layout.bounds;
    }

    let mut fill = style.color;
    if let Some(plate) = style.plate {
        let plate_rect = layout.bounds.expand(plate.padding);
        let under = canvas.mean_luminance(plate_rect);
        let tone = match plate.tone {
            PlateTone::Auto if under < 0.5 => Color::white(),
            PlateTone::Auto => Color::black(),
            PlateTone::Fixed(color) => color,
        };
        canvas.blend_rect(plate_rect, tone.with_alpha(plate.opacity));
        let effective = tone.with_alpha(plate.opacity).blend_over(&Color::gray(under), 1.0);
        fill = legible_on(fill, effective);
    } else if style.ensure_contrast {
        let under = canvas.mean_luminance(layout.bounds);
        fill = legible_on(fill, Color::gray(under));
    }

    let mask = Mask::render(fonts, &layout, style);
    let (x, y) = (layout.bounds.x, layout.bounds.y);
    if let Some(stroke) = style.stroke {
        for (dx, dy) in stroke_offsets(stroke.width) {
            mask.stamp(canvas, x + dx, y + dy, stroke.color);
        }
    }
    mask.stamp(canvas, x, y, fill);

    layout.bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_greedy() {
        assert_eq!(
            wrap_text("Fast & reliable service for your home", 15),
            vec!["Fast & reliable", "service for", "your home"]
        );
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        assert_eq!(wrap_text("  a \n\n b\tc  ", 80), vec!["a b c"]);
        assert!(wrap_text("   ", 10).is_empty());
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        // A long word fills the rest of the current line first.
        assert_eq!(wrap_text("ab cdefghij", 5), vec!["ab cd", "efghi", "j"]);
    }

    #[test]
    fn test_wrap_zero_width_acts_as_one() {
        assert_eq!(wrap_text("ab c", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Expert plumbing solutions for your home or business. Quality work guaranteed!";
        for width in 1..40 {
            for line in wrap_text(text, width) {
                assert!(line.chars().count() <= width, "{:?} > {}", line, width);
            }
        }
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!("mm".parse::<Anchor>().unwrap(), Anchor::MIDDLE_MIDDLE);
        assert_eq!("lt".parse::<Anchor>().unwrap(), Anchor::START_TOP);
        assert_eq!(
            "rs".parse::<Anchor>().unwrap(),
            Anchor::new(HAnchor::End, VAnchor::Bottom)
        );
        assert!("m".parse::<Anchor>().is_err());
        assert!("mmm".parse::<Anchor>().is_err());
        assert!("xm".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_anchor_origin() {
        assert_eq!(Anchor::MIDDLE_MIDDLE.origin(100, 50, 40, 20), (80, 40));
        assert_eq!(Anchor::START_TOP.origin(100, 50, 40, 20), (100, 50));
        assert_eq!(
            Anchor::new(HAnchor::End, VAnchor::Bottom).origin(100, 50, 40, 20),
            (60, 30)
        );
    }

    #[test]
    fn test_measure_builtin_block() {
        let fonts = FontLibrary::builtin();
        // size 8 -> scale 1: "AB" is 11 wide, lines are 8 tall with 2px spacing.
        let style = TextStyle::new(FontRole::Body, 8.0, Color::black())
            .wrap(2)
            .line_spacing(2)
            .anchor(Anchor::START_TOP);
        let rect = measure_text(&fonts, "AB CD E", &style, (10, 20));
        assert_eq!(rect, Rect::new(10, 20, 11, 8 * 3 + 2 * 2));
    }

    #[test]
    fn test_draw_text_marks_pixels_inside_box() {
        let fonts = FontLibrary::builtin();
        let mut canvas = Canvas::new(100, 40, Color::white()).unwrap();
        let style = TextStyle::new(FontRole::Headline, 16.0, Color::black());
        let rect = draw_text(&mut canvas, &fonts, "HI", &style, (50, 20));

        let mut inked = 0;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                if canvas.get(x, y) != Color::white() {
                    let inside = x as i32 >= rect.x
                        && (x as i32) < rect.right()
                        && y as i32 >= rect.y
                        && (y as i32) < rect.bottom();
                    assert!(inside, "ink outside box at {},{}", x, y);
                    inked += 1;
                }
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn test_stroke_extends_ink() {
        let fonts = FontLibrary::builtin();
        let mut canvas = Canvas::new(60, 30, Color::black()).unwrap();
        let style = TextStyle::new(FontRole::Headline, 16.0, Color::black())
            .stroke(2, Color::white());
        let rect = draw_text(&mut canvas, &fonts, "I", &style, (30, 15));
        // The stroke reaches two pixels above the block.
        let above = canvas.get((rect.x + rect.width as i32 / 2) as u32, (rect.y - 2) as u32);
        assert_eq!(above, Color::white());
    }

    #[test]
    fn test_auto_plate_contrasts_background() {
        let fonts = FontLibrary::builtin();
        let style = TextStyle::new(FontRole::Body, 8.0, Color::gray(0.2)).plate(Plate::auto(4));

        let mut dark = Canvas::new(80, 40, Color::black()).unwrap();
        let rect = draw_text(&mut dark, &fonts, "X", &style, (40, 20));
        let corner = dark.get((rect.x - 3) as u32, (rect.y - 3) as u32);
        assert!(corner.luminance() > 0.5, "white plate over dark background");

        let mut light = Canvas::new(80, 40, Color::white()).unwrap();
        let rect = draw_text(&mut light, &fonts, "X", &style, (40, 20));
        let corner = light.get((rect.x - 3) as u32, (rect.y - 3) as u32);
        assert!(corner.luminance() < 0.5, "black plate over light background");
    }

    #[test]
    fn test_overflowing_text_is_clipped() {
        let fonts = FontLibrary::builtin();
        let mut canvas = Canvas::new(20, 20, Color::white()).unwrap();
        let style = TextStyle::new(FontRole::Body, 32.0, Color::black()).wrap(3);
        let text = "overflow ".repeat(50);
        let rect = draw_text(&mut canvas, &fonts, &text, &style, (10, 10));
        assert!(rect.height > 20);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let fonts = FontLibrary::builtin();
        let mut canvas = Canvas::new(10, 10, Color::white()).unwrap();
        let style = TextStyle::new(FontRole::Body, 8.0, Color::black()).plate(Plate::auto(5));
        let rect = draw_text(&mut canvas, &fonts, "  ", &style, (5, 5));
        assert_eq!((rect.width, rect.height), (0, 0));
        assert!(canvas.data.iter().all(|c| *c == Color::white()));
    }

    #[test]
    fn test_legible_swaps_low_contrast_fill() {
        let fonts = FontLibrary::builtin();
        let blue = Color::from_rgb8([0, 90, 180]);
        let background = Color::from_rgb8([29, 108, 186]);

        let mut canvas = Canvas::new(60, 30, background).unwrap();
        let style = TextStyle::new(FontRole::Headline, 8.0, blue).legible();
        draw_text(&mut canvas, &fonts, "H", &style, (30, 15));
        assert!(canvas.data.iter().any(|c| *c == Color::white()));

        // Without the flag the requested fill is kept.
        let mut plain = Canvas::new(60, 30, background).unwrap();
        let style = TextStyle::new(FontRole::Headline, 8.0, blue);
        draw_text(&mut plain, &fonts, "H", &style, (30, 15));
        assert!(plain.data.iter().any(|c| c.to_rgb8() == [0, 90, 180]));
        assert!(!plain.data.iter().any(|c| *c == Color::white()));
    }

    #[test]
    fn test_fit_text_shrinks_into_box() {
        let fonts = FontLibrary::builtin();
        let style = TextStyle::new(FontRole::Headline, 48.0, Color::black()).wrap(20);
        let text = "Emergency Plumbing Repairs Available ".repeat(6);
        assert!(measure_text(&fonts, &text, &style, (0, 0)).height > 140);

        let fitted = fit_text(&fonts, &text, &style, (760, 140), 8.0);
        let rect = measure_text(&fonts, &text, &fitted, (0, 0));
        assert!(rect.width <= 760 && rect.height <= 140, "{:?}", rect);
        assert!(fitted.size < 48.0);
        assert!(fitted.max_chars.unwrap() > 20);

        // Text that already fits is left alone.
        assert_eq!(fit_text(&fonts, "Short", &style, (760, 140), 8.0), style);
    }

    #[test]
    fn test_vector_ink_stays_inside_box() {
        let library = FontLibrary::load(&crate::config::ComposerConfig::default().font_dirs);
        if library.face(FontRole::Body).is_builtin() {
            eprintln!("no system font found, skipping");
            return;
        }
        let style = TextStyle::new(FontRole::Body, 28.0, Color::black())
            .wrap(30)
            .align(Align::Left);
        for text in [
            "Expert Plumbing solutions for",
            "Quality work guaranteed! Cont",
            "jjjj Wf",
        ] {
            let mut canvas = Canvas::new(600, 120, Color::white()).unwrap();
            let rect = draw_text(&mut canvas, &library, text, &style, (300, 60));
            let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
            for y in 0..canvas.height {
                for x in 0..canvas.width {
                    if canvas.get(x, y) != Color::white() {
                        min_x = min_x.min(x as i32);
                        max_x = max_x.max(x as i32);
                    }
                }
            }
            assert!(min_x >= rect.x && max_x < rect.right(), "{:?}: ink {}..={} box {:?}", text, min_x, max_x, rect);
            // Ink reaches both ends of the box; nothing at the line ends was dropped.
            assert!(min_x <= rect.x + 1, "{:?}", text);
            assert!(max_x >= rect.right() - 2, "{:?}", text);
        }
    }
}
