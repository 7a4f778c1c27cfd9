//! The raster surface a render call draws onto.
//!
//! A [`Canvas`] is always opaque. Every drawing primitive clips to the canvas
//! bounds, so callers can pass coordinates that fall partly or wholly outside
//! it without checking.

use image::RgbImage;
use thiserror::Error;

use crate::color::Color;

/// Largest accepted canvas dimension, in pixels.
pub const MAX_CANVAS_DIM: u32 = 8192;

/// Errors from canvas construction.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height is zero or above [`MAX_CANVAS_DIM`].
    #[error("Invalid canvas dimensions {0}x{1} (each side must be between 1 and 8192)")]
    InvalidDimensions(u32, u32),
}

/// An axis-aligned rectangle in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expand(&self, amount: u32) -> Rect {
        Rect {
            x: self.x - amount as i32,
            y: self.y - amount as i32,
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }

    /// Move the rectangle by an offset.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A 2D opaque pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major).
    pub data: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 || width > MAX_CANVAS_DIM || height > MAX_CANVAS_DIM {
            return Err(CanvasError::InvalidDimensions(width, height));
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![fill.with_alpha(1.0); size],
        })
    }

    /// The full canvas area.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = color.with_alpha(1.0);
    }

    /// Composite `color` onto one pixel with the given coverage (0..=1).
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = color.blend_over(&self.data[idx], coverage);
    }

    /// Clip a rectangle to the canvas, returning pixel ranges.
    fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Fill a rectangle with an opaque color.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(&rect) else {
            return;
        };
        let color = color.with_alpha(1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    /// Composite a (possibly translucent) color over a rectangle.
    pub fn blend_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(&rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x as i32, y as i32, color, 1.0);
            }
        }
    }

    /// Composite a color over the whole canvas.
    pub fn overlay(&mut self, color: Color) {
        self.blend_rect(self.bounds(), color);
    }

    /// Horizontal line of the given thickness, centered on `(cx, cy)`.
    pub fn hline(&mut self, cx: i32, cy: i32, length: u32, thickness: u32, color: Color) {
        let rect = Rect::new(
            cx - (length / 2) as i32,
            cy - (thickness / 2) as i32,
            length,
            thickness.max(1),
        );
        self.blend_rect(rect, color);
    }

    /// Filled circle with a one pixel anti-aliased rim.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let r = radius as f64;
        let reach = radius as i32 + 1;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(cx + dx, cy + dy, color, coverage);
                }
            }
        }
    }

    /// Average luminance of the pixels under `rect` (clipped).
    ///
    /// Returns the luminance of the whole canvas when `rect` misses it.
    pub fn mean_luminance(&self, rect: Rect) -> f64 {
        let (x0, y0, x1, y1) = self
            .clip(&rect)
            .unwrap_or((0, 0, self.width, self.height));
        let mut sum = 0.0;
        for y in y0..y1 {
            for x in x0..x1 {
                sum += self.get(x, y).luminance();
            }
        }
        sum / ((x1 - x0) as f64 * (y1 - y0) as f64)
    }

    /// Convert to 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    /// Convert to an `image` RGB buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.get(x, y).to_rgb8())
        })
    }

    /// Create from an `image` RGB buffer.
    pub fn from_rgb_image(img: &RgbImage) -> Result<Self, CanvasError> {
        let mut canvas = Canvas::new(img.width(), img.height(), Color::black())?;
        for (x, y, px) in img.enumerate_pixels() {
            canvas.set(x, y, Color::from_rgb8(px.0));
        }
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Canvas::new(0, 10, Color::white()).is_err());
        assert!(Canvas::new(10, MAX_CANVAS_DIM + 1, Color::white()).is_err());
        assert!(Canvas::new(1, 1, Color::white()).is_ok());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(10, 10, Color::black()).unwrap();
        canvas.fill_rect(Rect::new(-5, -5, 8, 8), Color::white());
        assert_eq!(canvas.get(2, 2), Color::white());
        assert_eq!(canvas.get(3, 3), Color::black());

        // Entirely off-canvas is a no-op.
        canvas.fill_rect(Rect::new(50, 50, 4, 4), Color::white());
        canvas.fill_rect(Rect::new(-20, 0, 4, 4), Color::white());
    }

    #[test]
    fn test_blend_rect_half_alpha() {
        let mut canvas = Canvas::new(4, 4, Color::black()).unwrap();
        canvas.blend_rect(Rect::new(0, 0, 4, 4), Color::white().with_alpha(0.5));
        assert_eq!(canvas.get(1, 1).to_rgb8(), [128, 128, 128]);
    }

    #[test]
    fn test_canvas_stays_opaque() {
        let mut canvas = Canvas::new(2, 2, Color::rgba(1.0, 0.0, 0.0, 0.2)).unwrap();
        canvas.set(0, 0, Color::rgba(0.0, 1.0, 0.0, 0.0));
        assert!(canvas.data.iter().all(|c| c.a == 1.0));
    }

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut canvas = Canvas::new(21, 21, Color::black()).unwrap();
        canvas.fill_circle(10, 10, 5, Color::white());
        assert_eq!(canvas.get(10, 10), Color::white());
        assert_eq!(canvas.get(0, 0), Color::black());
    }

    #[test]
    fn test_rgb_image_roundtrip() {
        let mut canvas = Canvas::new(3, 2, Color::black()).unwrap();
        canvas.set(2, 1, Color::from_rgb8([10, 20, 30]));
        let img = canvas.to_rgb_image();
        assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30]);
        assert_eq!(Canvas::from_rgb_image(&img).unwrap(), canvas);
    }

    #[test]
    fn test_mean_luminance() {
        let mut canvas = Canvas::new(4, 4, Color::black()).unwrap();
        canvas.fill_rect(Rect::new(0, 0, 2, 4), Color::white());
        assert!((canvas.mean_luminance(canvas.bounds()) - 0.5).abs() < 1e-9);
        assert!(canvas.mean_luminance(Rect::new(0, 0, 2, 2)) > 0.99);
    }

    #[test]
    fn test_rect_expand_and_contains() {
        let r = Rect::new(10, 10, 5, 5);
        let e = r.expand(2);
        assert_eq!(e, Rect::new(8, 8, 9, 9));
        assert!(e.contains(&r));
        assert!(!r.contains(&e));
    }
}
