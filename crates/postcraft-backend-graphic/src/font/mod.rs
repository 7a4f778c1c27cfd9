//! Font roles and glyph rasterization.
//!
//! Templates ask for a logical [`FontRole`]; a [`FontLibrary`] maps each role
//! to a face. Vector faces are TrueType/OpenType files rasterized with
//! `fontdue`. A role whose files are missing or unparseable uses the built-in
//! bitmap face instead, so font resolution never fails a render.

pub mod bitmap;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a font file.
#[derive(Debug, Error)]
pub enum FontError {
    /// The file could not be read.
    #[error("Failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a usable TrueType/OpenType font.
    #[error("Failed to parse font {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Logical font role used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Large bold headline.
    Headline,
    /// Medium-weight category badge.
    Badge,
    /// Regular body copy.
    Body,
    /// Light body copy.
    BodyLight,
    /// Bold call-to-action.
    Action,
}

impl FontRole {
    /// All roles.
    pub const ALL: [FontRole; 5] = [
        FontRole::Headline,
        FontRole::Badge,
        FontRole::Body,
        FontRole::BodyLight,
        FontRole::Action,
    ];

    /// Stable role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontRole::Headline => "headline-bold",
            FontRole::Badge => "badge-medium",
            FontRole::Body => "body-regular",
            FontRole::BodyLight => "body-light",
            FontRole::Action => "action-bold",
        }
    }

    /// Font file names tried, in order, in each font directory.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            FontRole::Headline | FontRole::Action => &[
                "arialbd.ttf",
                "Arial Bold.ttf",
                "DejaVuSans-Bold.ttf",
                "LiberationSans-Bold.ttf",
            ],
            FontRole::Badge => &[
                "arialbd.ttf",
                "Arial Bold.ttf",
                "DejaVuSans-Bold.ttf",
                "LiberationSans-Bold.ttf",
                "arial.ttf",
            ],
            FontRole::Body => &[
                "arial.ttf",
                "Arial.ttf",
                "DejaVuSans.ttf",
                "LiberationSans-Regular.ttf",
            ],
            FontRole::BodyLight => &[
                "ariallt.ttf",
                "DejaVuSans-ExtraLight.ttf",
                "arial.ttf",
                "DejaVuSans.ttf",
                "LiberationSans-Regular.ttf",
            ],
        }
    }

    fn index(&self) -> usize {
        match self {
            FontRole::Headline => 0,
            FontRole::Badge => 1,
            FontRole::Body => 2,
            FontRole::BodyLight => 3,
            FontRole::Action => 4,
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rasterized glyph, positioned relative to the pen and the line top.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the bitmap's left edge.
    pub left: i32,
    /// Offset from the line top to the bitmap's top edge.
    pub top: i32,
    /// Pen advance after this glyph, unrounded.
    pub advance: f32,
    /// Row-major coverage, 0..=255.
    pub coverage: Vec<u8>,
}

/// Horizontal ink extent of one line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineExtent {
    /// Leftmost ink column relative to the pen start; negative when the
    /// first glyph overhangs to the left.
    pub left: i32,
    /// Width from the leftmost to the rightmost ink column.
    pub width: u32,
}

/// Pixel column of a glyph origin for an unrounded pen position.
pub fn pen_column(pen: f32) -> i32 {
    pen.round() as i32
}

/// A concrete face.
#[derive(Clone)]
pub enum Face {
    /// Parsed TrueType/OpenType font.
    Vector {
        font: Arc<fontdue::Font>,
        path: PathBuf,
    },
    /// The built-in 5x7 bitmap face.
    Builtin,
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Vector { path, .. } => f.debug_tuple("Vector").field(path).finish(),
            Face::Builtin => f.write_str("Builtin"),
        }
    }
}

impl Face {
    /// Load a vector face from a font file.
    pub fn from_file(path: &Path) -> Result<Face, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |message| FontError::Parse {
                path: path.to_path_buf(),
                message: message.to_string(),
            },
        )?;
        Ok(Face::Vector {
            font: Arc::new(font),
            path: path.to_path_buf(),
        })
    }

    /// Whether this is the built-in bitmap face.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Builtin)
    }

    /// Distance from the line top to the baseline.
    fn ascent(&self, size: f32) -> i32 {
        match self {
            Face::Vector { font, .. } => font
                .horizontal_line_metrics(size)
                .map(|m| m.ascent.round() as i32)
                .unwrap_or((size * 0.8).round() as i32),
            Face::Builtin => (bitmap::GLYPH_HEIGHT * bitmap::scale_for_size(size)) as i32,
        }
    }

    /// Height of one line of text, without extra spacing.
    pub fn line_height(&self, size: f32) -> u32 {
        match self {
            Face::Vector { font, .. } => font
                .horizontal_line_metrics(size)
                .map(|m| (m.ascent - m.descent).ceil() as u32)
                .unwrap_or(size.ceil() as u32)
                .max(1),
            Face::Builtin => bitmap::LINE_HEIGHT * bitmap::scale_for_size(size),
        }
    }

    /// Left bearing, bitmap width and unrounded advance of one character.
    fn metrics(&self, ch: char, size: f32) -> (i32, u32, f32) {
        match self {
            Face::Vector { font, .. } => {
                let m = font.metrics(ch, size);
                (m.xmin, m.width as u32, m.advance_width)
            }
            Face::Builtin => {
                let scale = bitmap::scale_for_size(size);
                (
                    0,
                    bitmap::GLYPH_WIDTH * scale,
                    (bitmap::ADVANCE * scale) as f32,
                )
            }
        }
    }

    /// Ink extent of a single line, with glyphs placed at
    /// [`pen_column`] of the running unrounded pen.
    pub fn line_extent(&self, text: &str, size: f32) -> LineExtent {
        let mut pen = 0.0f32;
        let mut ink: Option<(i32, i32)> = None;
        for ch in text.chars() {
            let (left, width, advance) = self.metrics(ch, size);
            if width > 0 {
                let x0 = pen_column(pen) + left;
                let x1 = x0 + width as i32;
                ink = Some(match ink {
                    Some((a, b)) => (a.min(x0), b.max(x1)),
                    None => (x0, x1),
                });
            }
            pen += advance;
        }
        match ink {
            Some((a, b)) => LineExtent {
                left: a,
                width: (b - a) as u32,
            },
            None => LineExtent {
                left: 0,
                width: pen_column(pen).max(0) as u32,
            },
        }
    }

    /// Ink width of a single line of text.
    pub fn line_width(&self, text: &str, size: f32) -> u32 {
        self.line_extent(text, size).width
    }

    /// Rasterize one character.
    pub fn glyph(&self, ch: char, size: f32) -> Glyph {
        match self {
            Face::Vector { font, .. } => {
                let (metrics, coverage) = font.rasterize(ch, size);
                let ascent = self.ascent(size);
                Glyph {
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    left: metrics.xmin,
                    top: ascent - metrics.ymin - metrics.height as i32,
                    advance: metrics.advance_width,
                    coverage,
                }
            }
            Face::Builtin => {
                let scale = bitmap::scale_for_size(size);
                Glyph {
                    width: bitmap::GLYPH_WIDTH * scale,
                    height: bitmap::GLYPH_HEIGHT * scale,
                    left: 0,
                    top: 0,
                    advance: (bitmap::ADVANCE * scale) as f32,
                    coverage: bitmap::rasterize(ch, scale),
                }
            }
        }
    }
}

/// Role to face mapping for one composer.
#[derive(Debug, Clone)]
pub struct FontLibrary {
    faces: [Face; 5],
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontLibrary {
    /// Every role uses the built-in face.
    pub fn builtin() -> Self {
        Self {
            faces: [
                Face::Builtin,
                Face::Builtin,
                Face::Builtin,
                Face::Builtin,
                Face::Builtin,
            ],
        }
    }

    /// Resolve every role against the given directories.
    ///
    /// The first candidate file that exists and parses wins; roles with no
    /// usable file get the built-in face.
    pub fn load(font_dirs: &[PathBuf]) -> Self {
        let mut library = Self::builtin();
        for role in FontRole::ALL {
            if let Some(face) = Self::find_face(role, font_dirs) {
                library.faces[role.index()] = face;
            } else {
                log::debug!("no font file for role {}, using built-in face", role);
            }
        }
        library
    }

    fn find_face(role: FontRole, font_dirs: &[PathBuf]) -> Option<Face> {
        for dir in font_dirs {
            for name in role.candidates() {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                match Face::from_file(&path) {
                    Ok(face) => {
                        log::debug!("font role {} -> {}", role, path.display());
                        return Some(face);
                    }
                    Err(e) => {
                        log::warn!("ignoring font: {}", e);
                    }
                }
            }
        }
        None
    }

    /// Replace the face for one role.
    pub fn with_face(mut self, role: FontRole, face: Face) -> Self {
        self.faces[role.index()] = face;
        self
    }

    /// The face used for a role.
    pub fn face(&self, role: FontRole) -> &Face {
        &self.faces[role.index()]
    }
}
