//! Terminal painting.

use colored::Colorize;
use tagdepth_highlight::Decoration;
use tagdepth_levels::{Hsl, Span};

/// Return `source` with every decorated tag name in its level's color.
pub fn paint(source: &str, decorations: &[Decoration]) -> String {
    let mut spans: Vec<(Span, Hsl)> = decorations
        .iter()
        .flat_map(|d| d.spans.iter().map(move |span| (*span, d.color)))
        .collect();
    spans.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (span, color) in spans {
        if span.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..span.start]);
        let (r, g, b) = color.to_rgb();
        out.push_str(&source[span.range()].truecolor(r, g, b).to_string());
        cursor = span.end;
    }
    out.push_str(&source[cursor..]);
    out
}
