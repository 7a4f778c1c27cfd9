//! Graphic request types.
//!
//! A [`GraphicRequest`] is built fresh by the shell for every render call and
//! is never mutated by the engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Documented upper bound on headline length, in characters.
pub const MAX_HEADLINE_CHARS: usize = 200;

/// Documented upper bound on description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Documented upper bound on the number of hashtags.
pub const MAX_HASHTAGS: usize = 10;

/// Business categories with a dedicated color scheme and stock backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Plumbing services (also the fallback scheme).
    Plumbing,
    /// Cleaning services.
    Cleaning,
    /// Landscaping services.
    Landscaping,
    /// Heating, ventilation and air conditioning.
    #[serde(rename = "HVAC")]
    Hvac,
    /// Electrical services.
    Electrical,
}

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Plumbing,
        Category::Cleaning,
        Category::Landscaping,
        Category::Hvac,
        Category::Electrical,
    ];

    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plumbing => "Plumbing",
            Category::Cleaning => "Cleaning",
            Category::Landscaping => "Landscaping",
            Category::Hvac => "HVAC",
            Category::Electrical => "Electrical",
        }
    }

    /// Exact, case-sensitive match against the display names.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named visual layouts.
///
/// Parsing is total: any unrecognized name selects [`TemplateStyle::Modern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TemplateStyle {
    /// Gradient or photo with headline, badge, plated description and a phone band.
    #[default]
    Modern,
    /// Darkened background, rule separator, phone number in a circular badge.
    Minimal,
    /// White card with drop shadow and an accent action bar.
    Bold,
}

impl TemplateStyle {
    /// All styles.
    pub const ALL: [TemplateStyle; 3] = [
        TemplateStyle::Modern,
        TemplateStyle::Minimal,
        TemplateStyle::Bold,
    ];

    /// Returns the style as a string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStyle::Modern => "modern",
            TemplateStyle::Minimal => "minimal",
            TemplateStyle::Bold => "bold",
        }
    }

    /// Parses a style name, case-insensitively.
    ///
    /// The legacy label "Modern Professional" maps to `Modern`, as does
    /// anything unrecognized.
    pub fn from_name(name: &str) -> TemplateStyle {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimal" => TemplateStyle::Minimal,
            "bold" => TemplateStyle::Bold,
            _ => TemplateStyle::Modern,
        }
    }
}

impl From<String> for TemplateStyle {
    fn from(name: String) -> Self {
        TemplateStyle::from_name(&name)
    }
}

impl std::fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the background is produced when no generated image is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Vertical gradient from the category primary color to a light neutral.
    #[default]
    Flat,
    /// One of the category's stock photos, falling back to `Flat`.
    Photo,
}

impl BackgroundMode {
    /// Returns the mode as a string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundMode::Flat => "flat",
            BackgroundMode::Photo => "photo",
        }
    }
}

/// A single render request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphicRequest {
    /// Business category name (see [`Category::from_name`]).
    pub category: String,

    /// Visual layout.
    #[serde(default)]
    pub template_style: TemplateStyle,

    /// Headline text.
    pub headline: String,

    /// Description text.
    #[serde(default)]
    pub description: String,

    /// Phone number shown in the call-to-action.
    pub phone_number: String,

    /// Optional hashtags, with or without the leading `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,

    /// Background mode.
    #[serde(default)]
    pub background: BackgroundMode,

    /// Ask the image-generation collaborator for the background.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generate_background: bool,
}

impl GraphicRequest {
    /// Creates a request with a flat background and no hashtags.
    pub fn new(
        category: impl Into<String>,
        template_style: TemplateStyle,
        headline: impl Into<String>,
        description: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            template_style,
            headline: headline.into(),
            description: description.into(),
            phone_number: phone_number.into(),
            hashtags: Vec::new(),
            background: BackgroundMode::Flat,
            generate_background: false,
        }
    }

    /// Sets the hashtags.
    pub fn with_hashtags<I, S>(mut self, hashtags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags = hashtags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the background mode.
    pub fn with_background(mut self, background: BackgroundMode) -> Self {
        self.background = background;
        self
    }

    /// Requests a generated background from the image collaborator.
    pub fn with_generated_background(mut self, enabled: bool) -> Self {
        self.generate_background = enabled;
        self
    }

    /// Returns the known category, if the name matches one exactly.
    pub fn known_category(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }

    /// Hashtags joined into one line, each prefixed with `#`.
    ///
    /// Returns `None` when there are no non-empty hashtags.
    pub fn hashtag_line(&self) -> Option<String> {
        let tags: Vec<String> = self
            .hashtags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty() && *t != "#")
            .map(|t| {
                if t.starts_with('#') {
                    t.to_string()
                } else {
                    format!("#{}", t)
                }
            })
            .collect();

        if tags.is_empty() {
            None
        } else {
            Some(tags.join(" "))
        }
    }

    /// Prompt handed to the image-generation collaborator.
    pub fn image_prompt(&self) -> String {
        format!(
            "A professional social media graphic for a {} business: {}, {}",
            self.category, self.headline, self.description
        )
    }

    /// Parses a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a request from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the request as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_exact_match() {
        assert_eq!(Category::from_name("HVAC"), Some(Category::Hvac));
        assert_eq!(Category::from_name("Cleaning"), Some(Category::Cleaning));
        assert_eq!(Category::from_name("hvac"), None);
        assert_eq!(Category::from_name("UnknownType"), None);
    }

    #[test]
    fn test_style_parse_is_total() {
        assert_eq!(TemplateStyle::from_name("Bold"), TemplateStyle::Bold);
        assert_eq!(TemplateStyle::from_name(" minimal "), TemplateStyle::Minimal);
        assert_eq!(
            TemplateStyle::from_name("Modern Professional"),
            TemplateStyle::Modern
        );
        assert_eq!(TemplateStyle::from_name("retro"), TemplateStyle::Modern);
        assert_eq!(TemplateStyle::from_name(""), TemplateStyle::Modern);
    }

    #[test]
    fn test_hashtag_line_normalizes_prefix() {
        let request = GraphicRequest::new("Plumbing", TemplateStyle::Modern, "h", "d", "p")
            .with_hashtags(["plumber", "#local", "  ", "#"]);
        assert_eq!(request.hashtag_line().as_deref(), Some("#plumber #local"));

        let empty = GraphicRequest::new("Plumbing", TemplateStyle::Modern, "h", "d", "p");
        assert_eq!(empty.hashtag_line(), None);
    }

    #[test]
    fn test_image_prompt() {
        let request = GraphicRequest::new(
            "HVAC",
            TemplateStyle::Bold,
            "Stay Cool",
            "AC tune-ups",
            "555",
        );
        assert_eq!(
            request.image_prompt(),
            "A professional social media graphic for a HVAC business: Stay Cool, AC tune-ups"
        );
    }
}
