use tagdepth_lexer::{TagKind, TagToken};

use crate::level_map::LevelMap;

/// An open tag on the depth stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame<'a> {
    pub name: &'a str,
    pub level: usize,
}

/// Nesting-level resolver.
///
/// Consumes tag tokens in document order and records each name span at its
/// depth. Closing tags never fail:
/// - a closer matching the innermost open tag pops it and shares its level
/// - a closer that doesn't match stays at the innermost scope, nothing popped
/// - a closer with nothing open lands on level 0
///
/// One resolver serves one scan; `finish` consumes it.
#[derive(Debug, Default)]
pub struct Resolver<'a> {
    stack: Vec<StackFrame<'a>>,
    levels: LevelMap,
}

impl<'a> Resolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one token and return the level it was recorded at.
    pub fn push(&mut self, token: TagToken<'a>) -> usize {
        let level = match token.kind {
            TagKind::SelfClosing => self.stack.len(),
            TagKind::Opening => {
                let level = self.stack.len();
                self.stack.push(StackFrame {
                    name: token.name,
                    level,
                });
                level
            }
            TagKind::Closing => self.close(token),
        };

        self.levels.record(level, token.span);
        level
    }

    fn close(&mut self, token: TagToken<'a>) -> usize {
        match self.stack.last() {
            Some(top) if top.name == token.name => {
                let level = top.level;
                self.stack.pop();
                level
            }
            Some(top) => {
                tracing::debug!(
                    name = token.name,
                    open = top.name,
                    start = token.span.start,
                    "closing tag does not match innermost open tag"
                );
                self.stack.len() - 1
            }
            None => {
                tracing::debug!(
                    name = token.name,
                    start = token.span.start,
                    "closing tag without open tag"
                );
                0
            }
        }
    }

    /// Number of currently open tags.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Open tags, outermost first.
    pub fn open_tags(&self) -> &[StackFrame<'a>] {
        &self.stack
    }

    /// Finish the scan. Tags still open are dropped with the stack.
    pub fn finish(self) -> LevelMap {
        tracing::debug!(
            levels = self.levels.len(),
            spans = self.levels.span_count(),
            unclosed = self.stack.len(),
            "resolved tag levels"
        );
        self.levels
    }
}

/// Resolve a token sequence into a level map.
pub fn resolve_levels<'a, I>(tokens: I) -> LevelMap
where
    I: IntoIterator<Item = TagToken<'a>>,
{
    let mut resolver = Resolver::new();
    for token in tokens {
        resolver.push(token);
    }
    resolver.finish()
}
