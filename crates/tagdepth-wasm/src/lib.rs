//! WASM bindings for the tagdepth scanner.
//!
//! Exposes `scan()` to JavaScript editor hosts via wasm-bindgen.
//! Span offsets are converted to UTF-16 code units so they can be handed to
//! `document.positionAt` directly.

use serde::Serialize;
use tagdepth_highlight::{HighlightConfig, LineIndex};
use tagdepth_levels::color::{color_for_level_with, DEFAULT_LIGHTNESS, DEFAULT_SATURATION};
use wasm_bindgen::prelude::*;

/// One level as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSpans {
    pub level: usize,
    /// CSS color, e.g. `hsl(60, 60%, 60%)`
    pub color: String,
    /// `[start, end]` pairs in UTF-16 code units.
    pub spans: Vec<[usize; 2]>,
}

/// Scan markup source with the default colors.
///
/// Returns an array of `{ level: number, color: string, spans: [start, end][] }`,
/// shallowest level first.
#[wasm_bindgen]
pub fn scan(source: &str) -> Result<JsValue, JsError> {
    to_js(&level_spans(source, &HighlightConfig::default()))
}

/// Scan with a JSON config (`maxFileSize`, `saturation`, `lightness`).
///
/// Returns `null` when the source is over `maxFileSize` characters.
/// Throws a JS error if the config is invalid.
#[wasm_bindgen(js_name = scanWithConfig)]
pub fn scan_with_config(source: &str, config_json: &str) -> Result<JsValue, JsError> {
    let config =
        HighlightConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?;
    if config.exceeds_max_size(source) {
        return Ok(JsValue::NULL);
    }
    to_js(&level_spans(source, &config))
}

/// CSS color for a nesting level. Saturation and lightness default to 60.
#[wasm_bindgen(js_name = colorForLevel)]
pub fn color_for_level(level: usize, saturation: Option<u8>, lightness: Option<u8>) -> String {
    color_for_level_with(
        level,
        saturation.unwrap_or(DEFAULT_SATURATION),
        lightness.unwrap_or(DEFAULT_LIGHTNESS),
    )
    .to_string()
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Native half of `scan`: levels with UTF-16 spans.
pub fn level_spans(source: &str, config: &HighlightConfig) -> Vec<LevelSpans> {
    let index = LineIndex::new(source);
    tagdepth_levels::scan(source)
        .iter()
        .map(|(level, spans)| LevelSpans {
            level,
            color: config.color_for_level(level).to_string(),
            spans: spans
                .iter()
                .map(|span| [index.utf16_offset(span.start), index.utf16_offset(span.end)])
                .collect(),
        })
        .collect()
}

fn to_js(levels: &[LevelSpans]) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(levels).map_err(|e| JsError::new(&e.to_string()))
}
