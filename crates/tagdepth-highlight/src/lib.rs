//! tagdepth highlight
//!
//! Editor-agnostic glue around the level scanner: user configuration,
//! the language gate, the oversized-file guard, byte offset to line/column
//! conversion, and a trailing debounce for re-scanning while the user types.
//!
//! ```text
//! (language, text) → Highlighter::update → Update::Paint([Decoration { level, color, ranges }])
//! ```

pub mod config;
pub mod debounce;
pub mod line_index;
pub mod session;

use std::path::PathBuf;

pub use config::HighlightConfig;
pub use debounce::Debouncer;
pub use line_index::{LineIndex, Position, Range};
pub use session::{decorate, Decoration, Highlighter, Update};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {message}")]
    Invalid { message: String },
}
