//! tagdepth levels
//!
//! Resolves the nesting depth of every tag occurrence and groups the tag
//! name spans by depth, ready for depth-based coloring.
//!
//! ```text
//! source → Scanner → TagToken* → Resolver → LevelMap { depth → [Span] }
//! ```
//!
//! # Example
//!
//! ```
//! use tagdepth_levels::{color_for_level, scan};
//!
//! let levels = scan("<div><p>hi</p></div>");
//! assert_eq!(levels.len(), 2);
//! assert_eq!(levels.get(1).unwrap().len(), 2);
//! assert_eq!(color_for_level(1).to_string(), "hsl(60, 60%, 60%)");
//! ```

pub mod color;
pub mod level_map;
pub mod resolver;

pub use color::{color_for_level, color_for_level_with, Hsl};
pub use level_map::LevelMap;
pub use resolver::{resolve_levels, Resolver, StackFrame};
pub use tagdepth_lexer::{Span, TagKind, TagToken};

/// Tokenize and resolve a whole buffer in one pass.
pub fn scan(source: &str) -> LevelMap {
    resolve_levels(tagdepth_lexer::Scanner::new(source))
}
