use std::iter::FusedIterator;

use crate::token::{Span, TagKind, TagToken};

pub const COMMENT_OPEN: &str = "<!--";
pub const COMMENT_CLOSE: &str = "-->";

/// Outcome of trying to match a tag at one `<`.
enum TagMatch<'a> {
    /// A tag, and the offset just past its `>`.
    Found(TagToken<'a>, usize),
    /// Not a tag; scanning resumes at the next byte.
    Miss,
    /// No `>` remains in the buffer, so no later `<` can match either.
    Exhausted,
}

/// Tag scanner over a markup buffer.
///
/// Lazy, single pass and left to right. Every call to `next` resumes at the
/// cursor left by the previous match, so consumed input is never rescanned.
/// A fresh scanner is created per buffer; nothing is shared between scans.
///
/// Recognised shape, per `<`:
/// - optional `/` (closing tag)
/// - name: `[a-zA-Z][a-zA-Z0-9]*`
/// - either whitespace then anything up to the first `>`, or `>` / `/>` directly
///
/// A tag whose last character before `>` is `/` is self-closing, unless it
/// is already a closing tag.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Collect every tag in the source.
    pub fn tokenize(source: &'a str) -> Vec<TagToken<'a>> {
        Scanner::new(source).collect()
    }

    /// Byte offset the next search starts from.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn scan_token(&mut self) -> Option<TagToken<'a>> {
        while let Some(open) = self.find_byte(self.pos, b'<') {
            if self.source[open..].starts_with(COMMENT_OPEN) {
                self.skip_comment(open);
                continue;
            }

            match self.match_tag(open) {
                TagMatch::Found(token, end) => {
                    self.pos = end;
                    return Some(token);
                }
                TagMatch::Miss => self.pos = open + 1,
                TagMatch::Exhausted => break,
            }
        }

        self.pos = self.bytes.len();
        None
    }

    /// Try to match a tag starting at the `<` at `open`.
    fn match_tag(&self, open: usize) -> TagMatch<'a> {
        let mut cursor = open + 1;

        let closing = self.byte_at(cursor) == Some(b'/');
        if closing {
            cursor += 1;
        }

        let name_start = cursor;
        if !self.byte_at(cursor).is_some_and(|b| b.is_ascii_alphabetic()) {
            return TagMatch::Miss;
        }
        cursor += 1;
        while self.byte_at(cursor).is_some_and(|b| b.is_ascii_alphanumeric()) {
            cursor += 1;
        }
        let name_end = cursor;

        let Some(next) = self.source[cursor..].chars().next() else {
            return TagMatch::Exhausted;
        };

        let (bracket, slash_before_bracket) = if is_pattern_whitespace(next) {
            // Attribute content: anything up to the first `>`.
            match self.find_byte(cursor + next.len_utf8(), b'>') {
                Some(gt) => (gt, self.bytes[gt - 1] == b'/'),
                None => return TagMatch::Exhausted,
            }
        } else {
            match next {
                '>' => (cursor, false),
                '/' if self.byte_at(cursor + 1) == Some(b'>') => (cursor + 1, true),
                _ => return TagMatch::Miss,
            }
        };

        let kind = if closing {
            TagKind::Closing
        } else if slash_before_bracket {
            TagKind::SelfClosing
        } else {
            TagKind::Opening
        };

        let token = TagToken::new(
            kind,
            &self.source[name_start..name_end],
            Span::new(name_start, name_end),
        );
        TagMatch::Found(token, bracket + 1)
    }

    /// Move the cursor past the comment starting at `open`.
    /// An unterminated comment runs to the end of the buffer.
    fn skip_comment(&mut self, open: usize) {
        let body = open + COMMENT_OPEN.len();
        self.pos = match self.source[body..].find(COMMENT_CLOSE) {
            Some(offset) => body + offset + COMMENT_CLOSE.len(),
            None => self.bytes.len(),
        };
        tracing::trace!(start = open, end = self.pos, "skipped comment");
    }

    // --- Helpers ---

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    fn find_byte(&self, from: usize, needle: u8) -> Option<usize> {
        self.bytes
            .get(from..)?
            .iter()
            .position(|&b| b == needle)
            .map(|offset| from + offset)
    }
}

/// Whitespace as JavaScript's `\s` defines it: Unicode `White_Space`
/// without U+0085, plus U+FEFF.
fn is_pattern_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

impl<'a> Iterator for Scanner<'a> {
    type Item = TagToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}

impl FusedIterator for Scanner<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: (kind, name) pairs, ignoring spans.
    fn kinds(source: &str) -> Vec<(TagKind, &str)> {
        Scanner::tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.name))
            .collect()
    }

    /// Helper: name spans as (start, end).
    fn spans(source: &str) -> Vec<(usize, usize)> {
        Scanner::tokenize(source)
            .into_iter()
            .map(|t| (t.span.start, t.span.end))
            .collect()
    }

    // =========================================================================
    // Basic tags
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert!(Scanner::tokenize("").is_empty());
    }

    #[test]
    fn test_plain_text() {
        assert!(Scanner::tokenize("just some text").is_empty());
    }

    #[test]
    fn test_opening_and_closing() {
        assert_eq!(
            kinds("<div></div>"),
            vec![(TagKind::Opening, "div"), (TagKind::Closing, "div")]
        );
        assert_eq!(spans("<div></div>"), vec![(1, 4), (7, 10)]);
    }

    #[test]
    fn test_name_with_digits() {
        assert_eq!(
            kinds("<h1>Title</h1>"),
            vec![(TagKind::Opening, "h1"), (TagKind::Closing, "h1")]
        );
    }

    #[test]
    fn test_component_names_keep_case() {
        assert_eq!(
            kinds("<Typography variant=\"h1\">Dev</Typography>"),
            vec![
                (TagKind::Opening, "Typography"),
                (TagKind::Closing, "Typography"),
            ]
        );
    }

    // =========================================================================
    // Self-closing tags
    // =========================================================================

    #[test]
    fn test_self_closing_with_space() {
        assert_eq!(kinds("<img />"), vec![(TagKind::SelfClosing, "img")]);
        assert_eq!(spans("<img />"), vec![(1, 4)]);
    }

    #[test]
    fn test_self_closing_without_space() {
        assert_eq!(kinds("<br/>"), vec![(TagKind::SelfClosing, "br")]);
        assert_eq!(spans("<br/>"), vec![(1, 3)]);
    }

    #[test]
    fn test_self_closing_with_extra_spaces() {
        assert_eq!(kinds("<br  />"), vec![(TagKind::SelfClosing, "br")]);
    }

    #[test]
    fn test_self_closing_with_attributes() {
        assert_eq!(
            kinds("<img src=\"a.png\" alt=\"\" />"),
            vec![(TagKind::SelfClosing, "img")]
        );
    }

    #[test]
    fn test_unquoted_attribute_ending_in_slash_self_closes() {
        assert_eq!(
            kinds("<a href=/docs/>"),
            vec![(TagKind::SelfClosing, "a")]
        );
    }

    #[test]
    fn test_slash_separated_from_bracket_is_opening() {
        assert_eq!(kinds("<img / >"), vec![(TagKind::Opening, "img")]);
    }

    #[test]
    fn test_closing_tag_never_self_closes() {
        assert_eq!(kinds("</div/>"), vec![(TagKind::Closing, "div")]);
        assert_eq!(kinds("</div />"), vec![(TagKind::Closing, "div")]);
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_opening_with_attributes() {
        assert_eq!(
            kinds("<div class=\"container\">"),
            vec![(TagKind::Opening, "div")]
        );
        assert_eq!(spans("<div class=\"container\">"), vec![(1, 4)]);
    }

    #[test]
    fn test_attribute_containing_slash() {
        assert_eq!(
            kinds("<a href=\"/home\">home</a>"),
            vec![(TagKind::Opening, "a"), (TagKind::Closing, "a")]
        );
    }

    #[test]
    fn test_multiline_attributes() {
        let source = "<Card\n    key={item.id}\n    className=\"card\"\n>";
        assert_eq!(kinds(source), vec![(TagKind::Opening, "Card")]);
    }

    #[test]
    fn test_closing_tag_with_trailing_content() {
        assert_eq!(kinds("</div  >"), vec![(TagKind::Closing, "div")]);
    }

    #[test]
    fn test_attribute_content_swallows_inner_tag() {
        // Everything up to the first `>` belongs to the outer tag.
        assert_eq!(kinds("<div <span>"), vec![(TagKind::Opening, "div")]);
    }

    #[test]
    fn test_unicode_whitespace_separates_attributes() {
        assert_eq!(kinds("<p\u{a0}hidden>"), vec![(TagKind::Opening, "p")]);
    }

    #[test]
    fn test_byte_order_mark_separates_attributes() {
        assert_eq!(kinds("<p\u{feff}hidden>"), vec![(TagKind::Opening, "p")]);
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert!(Scanner::tokenize("<p\u{85}x>").is_empty());
    }

    #[test]
    fn test_pattern_whitespace_set() {
        for c in [' ', '\t', '\n', '\r', '\u{b}', '\u{c}', '\u{a0}', '\u{2028}', '\u{3000}', '\u{feff}'] {
            assert!(is_pattern_whitespace(c), "{c:?}");
        }
        for c in ['\u{85}', '\u{200b}', 'a', '/'] {
            assert!(!is_pattern_whitespace(c), "{c:?}");
        }
    }

    // =========================================================================
    // Not tags
    // =========================================================================

    #[test]
    fn test_space_after_bracket() {
        assert!(Scanner::tokenize("< div>").is_empty());
        assert!(Scanner::tokenize("</ div>").is_empty());
    }

    #[test]
    fn test_name_must_start_with_letter() {
        assert!(Scanner::tokenize("<1div>").is_empty());
        assert!(Scanner::tokenize("<_div>").is_empty());
    }

    #[test]
    fn test_name_followed_by_punctuation() {
        assert!(Scanner::tokenize("<my-element>").is_empty());
        assert!(Scanner::tokenize("<div/ >").is_empty());
    }

    #[test]
    fn test_comparison_operators() {
        assert!(Scanner::tokenize("if (a < b && c > d) {}").is_empty());
    }

    #[test]
    fn test_doctype_is_skipped() {
        assert_eq!(
            kinds("<!DOCTYPE html><html>"),
            vec![(TagKind::Opening, "html")]
        );
        assert_eq!(spans("<!DOCTYPE html><html>"), vec![(16, 20)]);
    }

    #[test]
    fn test_incomplete_tags_at_end() {
        assert!(Scanner::tokenize("<div").is_empty());
        assert!(Scanner::tokenize("<div class=\"x\"").is_empty());
        assert_eq!(kinds("<div><span"), vec![(TagKind::Opening, "div")]);
    }

    #[test]
    fn test_failed_tag_does_not_hide_following_tag() {
        assert_eq!(kinds("<1<b>"), vec![(TagKind::Opening, "b")]);
        assert_eq!(spans("<1<b>"), vec![(3, 4)]);
    }

    // =========================================================================
    // Comments
    // =========================================================================

    #[test]
    fn test_comment_only() {
        assert!(Scanner::tokenize("<!-- comment -->").is_empty());
    }

    #[test]
    fn test_tags_inside_comment_are_ignored() {
        assert!(Scanner::tokenize("<!-- <div><span></span></div> -->").is_empty());
    }

    #[test]
    fn test_comment_before_tags() {
        let source = "<!-- comment --><div></div><!-- another comment -->";
        assert_eq!(
            kinds(source),
            vec![(TagKind::Opening, "div"), (TagKind::Closing, "div")]
        );
        assert_eq!(spans(source), vec![(17, 20), (23, 26)]);
    }

    #[test]
    fn test_comment_inside_element() {
        let source = "<div><!-- <p> --><span></span></div>";
        assert_eq!(
            kinds(source),
            vec![
                (TagKind::Opening, "div"),
                (TagKind::Opening, "span"),
                (TagKind::Closing, "span"),
                (TagKind::Closing, "div"),
            ]
        );
    }

    #[test]
    fn test_multiline_comment() {
        let source = "<ul>\n<!--\n<li>one</li>\n-->\n</ul>";
        assert_eq!(
            kinds(source),
            vec![(TagKind::Opening, "ul"), (TagKind::Closing, "ul")]
        );
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(
            kinds("<div><!-- <span></span>"),
            vec![(TagKind::Opening, "div")]
        );
    }

    // =========================================================================
    // Offsets and laziness
    // =========================================================================

    #[test]
    fn test_offsets_are_bytes() {
        // "é" is two bytes.
        assert_eq!(spans("é<b>"), vec![(3, 4)]);
    }

    #[test]
    fn test_name_slices_source() {
        let source = "<section></section>";
        for token in Scanner::tokenize(source) {
            assert_eq!(&source[token.span.range()], token.name);
        }
    }

    #[test]
    fn test_scanner_is_lazy_and_resumes() {
        let mut scanner = Scanner::new("<a></a><b/>");
        let first = scanner.next().unwrap();
        assert_eq!(first.name, "a");
        assert_eq!(scanner.position(), 3);

        let rest: Vec<_> = scanner.by_ref().map(|t| t.kind).collect();
        assert_eq!(rest, vec![TagKind::Closing, TagKind::SelfClosing]);
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_fresh_scanners_are_independent() {
        let source = "<div><p></p></div>";
        assert_eq!(Scanner::tokenize(source), Scanner::tokenize(source));
    }
}
