//! User configuration.
//!
//! Read from JSON with camelCase keys. Every key is optional:
//!
//! ```json
//! { "maxFileSize": 100000, "debounceDelay": 300, "saturation": 60, "lightness": 60 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tagdepth_levels::color::{DEFAULT_LIGHTNESS, DEFAULT_SATURATION};
use tagdepth_levels::{color_for_level_with, Hsl};

use crate::ConfigError;

/// Largest document, in characters, that is still scanned.
pub const DEFAULT_MAX_FILE_SIZE: usize = 100_000;

/// Quiet period before a re-scan, in milliseconds.
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;

/// Language ids that get colored by default.
pub const SUPPORTED_LANGS: &[&str] = &[
    "html",
    "typescriptreact",
    "javascriptreact",
    "vue",
    "xml",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    pub max_file_size: usize,
    #[serde(rename = "debounceDelay")]
    pub debounce_delay_ms: u64,
    pub saturation: u8,
    pub lightness: u8,
    pub languages: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            saturation: DEFAULT_SATURATION,
            lightness: DEFAULT_LIGHTNESS,
            languages: SUPPORTED_LANGS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl HighlightConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(invalid("maxFileSize must be greater than 0".into()));
        }
        if self.saturation > 100 {
            return Err(invalid(format!(
                "saturation must be a percentage, got {}",
                self.saturation
            )));
        }
        if self.lightness > 100 {
            return Err(invalid(format!(
                "lightness must be a percentage, got {}",
                self.lightness
            )));
        }
        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Whether documents with this language id get colored.
    pub fn supports(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }

    /// Whether `source` has more than `max_file_size` characters.
    pub fn exceeds_max_size(&self, source: &str) -> bool {
        // Byte length is an upper bound on the character count.
        source.len() > self.max_file_size && source.chars().count() > self.max_file_size
    }

    pub fn color_for_level(&self, level: usize) -> Hsl {
        color_for_level_with(level, self.saturation, self.lightness)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid { message }
}
