//! Built-in 5x7 bitmap face.
//!
//! Covers printable ASCII 32..=95 (space through underscore). Lowercase
//! letters borrow the uppercase glyphs; anything else draws as a blank cell.
//! Glyphs are scaled by whole pixels with nearest-neighbor sampling.

/// Glyph cell width in unscaled pixels.
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph cell height in unscaled pixels.
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance per character, in unscaled pixels (cell plus one gap).
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Line height in unscaled pixels (cell plus one row of leading).
pub const LINE_HEIGHT: u32 = GLYPH_HEIGHT + 1;

const FIRST_CHAR: u32 = 32;

/// One row per entry, most significant of the low five bits is the leftmost pixel.
static GLYPHS: [[u8; 7]; 64] = [
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // ' '
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100, 0b00000], // '!'
    [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // '"'
    [0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b00000, 0b00000], // '#'
    [0b00100, 0b01110, 0b10100, 0b01110, 0b00101, 0b01110, 0b00100], // '$'
    [0b11001, 0b11010, 0b00100, 0b01011, 0b10011, 0b00000, 0b00000], // '%'
    [0b01100, 0b10010, 0b01100, 0b10010, 0b10011, 0b01101, 0b00000], // '&'
    [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // '\''
    [0b00100, 0b01000, 0b01000, 0b01000, 0b01000, 0b00100, 0b00000], // '('
    [0b00100, 0b00010, 0b00010, 0b00010, 0b00010, 0b00100, 0b00000], // ')'
    [0b00000, 0b10101, 0b01110, 0b10101, 0b00000, 0b00000, 0b00000], // '*'
    [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000], // '+'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ','
    [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000], // '-'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000], // '.'
    [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000, 0b00000], // '/'
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // '0'
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // '1'
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // '2'
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // '3'
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // '4'
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // '5'
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // '6'
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // '7'
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // '8'
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // '9'
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000], // ':'
    [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // ';'
    [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010], // '<'
    [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000], // '='
    [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000], // '>'
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100], // '?'
    [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110], // '@'
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // 'A'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // 'B'
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // 'C'
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // 'D'
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // 'E'
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // 'F'
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // 'G'
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // 'H'
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 'I'
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // 'J'
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // 'K'
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // 'L'
    [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001], // 'M'
    [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001], // 'N'
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 'O'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // 'P'
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // 'Q'
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // 'R'
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // 'S'
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // 'T'
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 'U'
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // 'V'
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001], // 'W'
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // 'X'
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // 'Y'
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // 'Z'
    [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110], // '['
    [0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b00000, 0b00000], // '\\'
    [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110], // ']'
    [0b00100, 0b01010, 0b10001, 0b00000, 0b00000, 0b00000, 0b00000], // '^'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111], // '_'
];

/// Integer scale factor for a nominal font size: `max(1, round(size / 8))`.
pub fn scale_for_size(size: f32) -> u32 {
    ((size / 8.0).round() as i64).max(1) as u32
}

/// Row bitmasks for a character, or `None` for a blank cell.
pub fn glyph_rows(ch: char) -> Option<&'static [u8; 7]> {
    let ch = ch.to_ascii_uppercase();
    let index = (ch as u32).checked_sub(FIRST_CHAR)? as usize;
    GLYPHS.get(index)
}

/// Expand a glyph into a `GLYPH_WIDTH x GLYPH_HEIGHT` 0/1 pattern.
fn unpack(rows: &[u8; 7]) -> Vec<u8> {
    let mut pattern = Vec::with_capacity((GLYPH_WIDTH * GLYPH_HEIGHT) as usize);
    for row in rows {
        for bit in (0..GLYPH_WIDTH).rev() {
            pattern.push((row >> bit) & 1);
        }
    }
    pattern
}

/// Scale a pattern from source dimensions to target dimensions using nearest-neighbor.
pub fn scale_pattern(
    pattern: &[u8],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> Vec<u8> {
    let mut scaled = vec![0u8; (dst_width * dst_height) as usize];

    for dy in 0..dst_height {
        for dx in 0..dst_width {
            let sx = (dx * src_width / dst_width).min(src_width - 1);
            let sy = (dy * src_height / dst_height).min(src_height - 1);

            let src_idx = (sy * src_width + sx) as usize;
            let dst_idx = (dy * dst_width + dx) as usize;

            if src_idx < pattern.len() {
                scaled[dst_idx] = pattern[src_idx];
            }
        }
    }

    scaled
}

/// Coverage mask (0 or 255) for `ch` at an integer scale.
///
/// The mask is `GLYPH_WIDTH * scale` wide and `GLYPH_HEIGHT * scale` tall.
pub fn rasterize(ch: char, scale: u32) -> Vec<u8> {
    let scale = scale.max(1);
    let (w, h) = (GLYPH_WIDTH * scale, GLYPH_HEIGHT * scale);
    match glyph_rows(ch) {
        Some(rows) => scale_pattern(&unpack(rows), GLYPH_WIDTH, GLYPH_HEIGHT, w, h)
            .into_iter()
            .map(|bit| bit * 255)
            .collect(),
        None => vec![0; (w * h) as usize],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_for_size() {
        assert_eq!(scale_for_size(1.0), 1);
        assert_eq!(scale_for_size(8.0), 1);
        assert_eq!(scale_for_size(28.0), 4);
        assert_eq!(scale_for_size(48.0), 6);
        assert_eq!(scale_for_size(72.0), 9);
    }

    #[test]
    fn test_lowercase_uses_uppercase() {
        assert_eq!(glyph_rows('a'), glyph_rows('A'));
        assert_eq!(glyph_rows('z'), glyph_rows('Z'));
    }

    #[test]
    fn test_unknown_chars_are_blank() {
        assert!(glyph_rows('~').is_none());
        assert!(glyph_rows('é').is_none());
        assert!(glyph_rows('\u{1F4DE}').is_none());
        assert!(glyph_rows('\t').is_none());
        assert!(rasterize('é', 2).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_space_is_blank_and_bang_is_not() {
        assert!(rasterize(' ', 1).iter().all(|&c| c == 0));
        assert!(rasterize('!', 1).iter().any(|&c| c == 255));
    }

    #[test]
    fn test_rasterize_scales_each_pixel() {
        let one = rasterize('T', 1);
        let three = rasterize('T', 3);
        assert_eq!(three.len(), (15 * 21) as usize);
        // Top row of 'T' is solid.
        assert!(one[..5].iter().all(|&c| c == 255));
        assert!(three[..15].iter().all(|&c| c == 255));
        // Each source pixel becomes a 3x3 block.
        for y in 0..21u32 {
            for x in 0..15u32 {
                let src = one[((y / 3) * 5 + x / 3) as usize];
                assert_eq!(three[(y * 15 + x) as usize], src);
            }
        }
    }
}
