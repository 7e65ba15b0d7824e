use serde::Serialize;
use tagdepth_lexer::Span;

/// Zero-based line and column. Columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Byte distance between counting checkpoints.
const CHECKPOINT_STRIDE: usize = 64;

/// Character and UTF-16 unit counts of everything before `byte`.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    byte: usize,
    chars: usize,
    utf16: usize,
}

/// Converts byte offsets into line/column positions.
///
/// Counts are precomputed at every line start and every
/// `CHECKPOINT_STRIDE` bytes, so a lookup only counts the few bytes after
/// the nearest checkpoint, even on a single minified line.
///
/// Offsets must fall on character boundaries; offsets past the end clamp
/// to the end of the source.
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Sorted by byte offset, always starting at 0
    checkpoints: Vec<Checkpoint>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut checkpoints = vec![Checkpoint {
            byte: 0,
            chars: 0,
            utf16: 0,
        }];
        let (mut chars, mut utf16) = (0, 0);
        let mut last_checkpoint = 0;

        for (offset, ch) in source.char_indices() {
            if offset - last_checkpoint >= CHECKPOINT_STRIDE {
                checkpoints.push(Checkpoint {
                    byte: offset,
                    chars,
                    utf16,
                });
                last_checkpoint = offset;
            }

            chars += 1;
            utf16 += ch.len_utf16();

            if ch == '\n' {
                let next = offset + 1;
                line_starts.push(next);
                checkpoints.push(Checkpoint {
                    byte: next,
                    chars,
                    utf16,
                });
                last_checkpoint = next;
            }
        }

        Self {
            source,
            line_starts,
            checkpoints,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = self.counts_at(offset).chars - self.counts_at(line_start).chars;

        Position::new(line, column)
    }

    pub fn range(&self, span: Span) -> Range {
        Range {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }

    /// Offset in UTF-16 code units, as used by JavaScript strings.
    pub fn utf16_offset(&self, offset: usize) -> usize {
        self.counts_at(offset.min(self.source.len())).utf16
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Counts up to `offset`, from the nearest checkpoint at or before it.
    fn counts_at(&self, offset: usize) -> Checkpoint {
        let nearest = self
            .checkpoints
            .partition_point(|cp| cp.byte <= offset)
            .saturating_sub(1);
        let base = self.checkpoints[nearest];
        let tail = self.source.get(base.byte..offset).unwrap_or_default();

        Checkpoint {
            byte: offset,
            chars: base.chars + tail.chars().count(),
            utf16: base.utf16 + tail.encode_utf16().count(),
        }
    }
}
