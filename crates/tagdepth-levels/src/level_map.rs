use std::collections::btree_map;
use std::collections::BTreeMap;

use tagdepth_lexer::Span;

/// Tag name spans grouped by nesting depth.
///
/// Depth 0 is the outermost scope. Only depths that received at least one
/// span are present, and spans within a depth keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    levels: BTreeMap<usize, Vec<Span>>,
}

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span at the end of `level`'s sequence.
    pub fn record(&mut self, level: usize, span: Span) {
        self.levels.entry(level).or_default().push(span);
    }

    pub fn get(&self, level: usize) -> Option<&[Span]> {
        self.levels.get(&level).map(Vec::as_slice)
    }

    /// Number of distinct depths with spans.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Deepest depth with spans.
    pub fn max_level(&self) -> Option<usize> {
        self.levels.keys().next_back().copied()
    }

    /// Total number of spans over all depths.
    pub fn span_count(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Depths in ascending order with their spans.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.levels.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, usize, Vec<Span>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a [Span]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(level, spans)| (*level, spans.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a LevelMap {
    type Item = (usize, &'a [Span]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for LevelMap {
    type Item = (usize, Vec<Span>);
    type IntoIter = btree_map::IntoIter<usize, Vec<Span>>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.into_iter()
    }
}
