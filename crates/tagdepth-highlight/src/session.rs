use tagdepth_levels::{Hsl, Span};

use crate::config::HighlightConfig;
use crate::line_index::{LineIndex, Range};

/// Everything painted for one nesting level.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub level: usize,
    pub color: Hsl,
    /// Tag name byte spans, in document order.
    pub spans: Vec<Span>,
    /// The same spans as line/column ranges.
    pub ranges: Vec<Range>,
}

/// What the host should do after a document change.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Language isn't colored: remove existing decorations.
    Clear,
    /// Document is over the size limit: remove existing decorations, and show
    /// a warning if `warn` is set.
    TooLarge { warn: bool },
    /// Replace existing decorations with these, one per level.
    Paint(Vec<Decoration>),
}

/// Scan `source` and build one decoration per non-empty level,
/// shallowest first.
pub fn decorate(source: &str, config: &HighlightConfig) -> Vec<Decoration> {
    let levels = tagdepth_levels::scan(source);
    let index = LineIndex::new(source);

    levels
        .iter()
        .filter(|(_, spans)| !spans.is_empty())
        .map(|(level, spans)| Decoration {
            level,
            color: config.color_for_level(level),
            spans: spans.to_vec(),
            ranges: spans.iter().map(|span| index.range(*span)).collect(),
        })
        .collect()
}

/// Highlighting state for one editor session.
///
/// The only state kept between updates is whether the size warning was
/// already shown, so it appears once per session rather than once per edit.
#[derive(Debug, Default)]
pub struct Highlighter {
    config: HighlightConfig,
    warning_shown: bool,
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            warning_shown: false,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn update(&mut self, language_id: &str, source: &str) -> Update {
        if !self.config.supports(language_id) {
            tracing::debug!(language_id, "language not colored");
            return Update::Clear;
        }

        if self.config.exceeds_max_size(source) {
            let warn = !self.warning_shown;
            self.warning_shown = true;
            if warn {
                tracing::warn!(
                    max = self.config.max_file_size,
                    "file is too large for colored tags, coloring disabled"
                );
            }
            return Update::TooLarge { warn };
        }

        Update::Paint(decorate(source, &self.config))
    }

    /// Re-arm the size warning, e.g. after switching documents.
    pub fn reset_warning(&mut self) {
        self.warning_shown = false;
    }
}
