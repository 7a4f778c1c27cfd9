//! Composer configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::SourceSelector;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a [`GraphicComposer`](crate::GraphicComposer).
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    /// Directory that relative background paths are resolved against.
    pub asset_root: PathBuf,
    /// Directories searched for font files, in order.
    pub font_dirs: Vec<PathBuf>,
    /// How photo backgrounds are picked.
    pub selector: SourceSelector,
    /// Upper bound for each collaborator call, in milliseconds.
    pub provider_timeout_ms: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            font_dirs: default_font_dirs(),
            selector: SourceSelector::Random,
            provider_timeout_ms: 30_000,
        }
    }
}

fn default_font_dirs() -> Vec<PathBuf> {
    [
        "fonts",
        "/usr/share/fonts/truetype/msttcorefonts",
        "/usr/share/fonts/truetype/dejavu",
        "/usr/share/fonts/truetype/liberation",
        "/Library/Fonts",
        "C:\\Windows\\Fonts",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl ComposerConfig {
    /// Config that only uses the built-in font and picks backgrounds
    /// reproducibly. Useful for tests and golden images.
    pub fn deterministic(asset_root: impl Into<PathBuf>, selector: SourceSelector) -> Self {
        Self {
            asset_root: asset_root.into(),
            font_dirs: Vec::new(),
            selector,
            ..Self::default()
        }
    }

    /// Collaborator timeout as a [`Duration`].
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
