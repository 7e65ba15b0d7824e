use std::ops::Range;

/// A byte range in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

/// How a tag occurrence affects nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<div>`, `<div class="x">`
    Opening,
    /// `</div>`
    Closing,
    /// `<br/>`, `<img src="x" />`
    SelfClosing,
}

/// A tag occurrence found by the scanner.
///
/// `span` covers the tag name only, never the brackets, the slash or any
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    pub kind: TagKind,
    pub name: &'a str,
    pub span: Span,
}

impl<'a> TagToken<'a> {
    pub fn new(kind: TagKind, name: &'a str, span: Span) -> Self {
        Self { kind, name, span }
    }

    pub fn is_opening(&self) -> bool {
        self.kind == TagKind::Opening
    }

    pub fn is_closing(&self) -> bool {
        self.kind == TagKind::Closing
    }

    pub fn is_self_closing(&self) -> bool {
        self.kind == TagKind::SelfClosing
    }
}
