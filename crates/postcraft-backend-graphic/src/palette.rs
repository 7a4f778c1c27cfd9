//! Category color schemes and stock background lists.
//!
//! All per-category data lives in one static table, read-only for the life of
//! the process. [`resolve`] is total: unknown names get the Plumbing scheme.

use postcraft_spec::Category;
use serde::Serialize;

use crate::color::Color;

/// Light neutral that flat gradients fade into.
pub const GRADIENT_NEUTRAL: [u8; 3] = [230, 230, 230];

/// Primary, secondary and accent colors for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub accent: [u8; 3],
}

impl ColorPalette {
    /// Primary color.
    pub fn primary(&self) -> Color {
        Color::from_rgb8(self.primary)
    }

    /// Secondary color.
    pub fn secondary(&self) -> Color {
        Color::from_rgb8(self.secondary)
    }

    /// Accent color.
    pub fn accent(&self) -> Color {
        Color::from_rgb8(self.accent)
    }
}

/// Everything the engine knows about a category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryProfile {
    pub category: Category,
    pub palette: ColorPalette,
    /// Background sources, relative to the asset root or absolute http(s) URLs.
    pub backgrounds: &'static [&'static str],
}

static CATEGORY_TABLE: [CategoryProfile; 5] = [
    CategoryProfile {
        category: Category::Plumbing,
        palette: ColorPalette {
            primary: [0, 90, 180],
            secondary: [0, 51, 102],
            accent: [255, 140, 0],
        },
        backgrounds: &[
            "backgrounds/plumbing_1.jpg",
            "backgrounds/plumbing_2.jpg",
            "backgrounds/plumbing_3.jpg",
        ],
    },
    CategoryProfile {
        category: Category::Cleaning,
        palette: ColorPalette {
            primary: [30, 110, 40],
            secondary: [200, 230, 201],
            accent: [255, 193, 7],
        },
        backgrounds: &[
            "backgrounds/cleaning_1.jpg",
            "backgrounds/cleaning_2.jpg",
            "backgrounds/cleaning_3.jpg",
        ],
    },
    CategoryProfile {
        category: Category::Landscaping,
        palette: ColorPalette {
            primary: [40, 120, 45],
            secondary: [139, 90, 43],
            accent: [255, 167, 38],
        },
        backgrounds: &[
            "backgrounds/landscaping_1.jpg",
            "backgrounds/landscaping_2.jpg",
            "backgrounds/landscaping_3.jpg",
        ],
    },
    CategoryProfile {
        category: Category::Hvac,
        palette: ColorPalette {
            primary: [180, 30, 30],
            secondary: [30, 60, 120],
            accent: [66, 133, 244],
        },
        backgrounds: &[
            "backgrounds/hvac_1.jpg",
            "backgrounds/hvac_2.jpg",
            "backgrounds/hvac_3.jpg",
        ],
    },
    CategoryProfile {
        category: Category::Electrical,
        palette: ColorPalette {
            primary: [110, 25, 140],
            secondary: [40, 40, 40],
            accent: [255, 214, 0],
        },
        backgrounds: &[
            "backgrounds/electrical_1.jpg",
            "backgrounds/electrical_2.jpg",
            "backgrounds/electrical_3.jpg",
        ],
    },
];

/// All category profiles, in display order.
pub fn profiles() -> &'static [CategoryProfile] {
    &CATEGORY_TABLE
}

/// Profile for a known category.
pub fn profile(category: Category) -> &'static CategoryProfile {
    CATEGORY_TABLE
        .iter()
        .find(|p| p.category == category)
        .unwrap_or(&CATEGORY_TABLE[0])
}

/// Profile for a category name, falling back to Plumbing.
pub fn profile_for_name(name: &str) -> &'static CategoryProfile {
    match Category::from_name(name) {
        Some(category) => profile(category),
        None => {
            log::debug!("unknown category '{}', using Plumbing profile", name);
            &CATEGORY_TABLE[0]
        }
    }
}

/// Resolve the palette for a category name. Never fails.
pub fn resolve(category: &str) -> ColorPalette {
    profile_for_name(category).palette
}
