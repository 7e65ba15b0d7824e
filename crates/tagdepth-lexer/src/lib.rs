//! tagdepth lexer
//!
//! Finds tag occurrences in HTML, JSX, Vue and XML style markup.
//! Each token records whether the tag opens, closes or self-closes a scope,
//! and the byte span of its name. Attribute content is never interpreted and
//! `<!-- ... -->` comments are skipped entirely.
//!
//! # Example
//!
//! ```
//! use tagdepth_lexer::{Scanner, TagKind};
//!
//! let tokens = Scanner::tokenize("<div><br/></div>");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TagKind::SelfClosing);
//! assert_eq!(tokens[1].name, "br");
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Span, TagKind, TagToken};

/// Tokenize a whole buffer.
///
/// Shorthand for `Scanner::tokenize`. Malformed tags are skipped, so this
/// never fails.
pub fn tokenize(source: &str) -> Vec<TagToken<'_>> {
    Scanner::tokenize(source)
}
