//! Regex matching core for TextMate-style grammar tokenizers.
//!
//! A tokenizer walks a grammar's rule tree line by line and asks, at every
//! step, which rule pattern matches next. This crate answers that question:
//!
//! - [`EncodedText`] wraps a line once per pass and maps UTF-8 byte offsets
//!   to the editor's UTF-16 (or UTF-32) columns.
//! - [`PatternSource`] prepares a rule pattern once: `\z` is rewritten, the
//!   `\A`/`\G` spellings are precomputed, and `\N` back-references are
//!   resolved against an enclosing match on demand.
//! - [`Matcher`] compiles one effective pattern and remembers its last
//!   search, so forward probing of the same line does not rescan.
//! - [`MatcherCache`] and [`Scanner`] organize matchers the way a tokenizer
//!   uses them.
//!
//! ```rust
//! use tmregex::{EncodedText, Matcher, PatternSource, RuleId};
//!
//! let source = PatternSource::new(r"\A\s*#.*", RuleId(1));
//! let line = EncodedText::new("  # hello");
//!
//! let mut first_line = Matcher::new(source.resolve_anchors(true, false)).unwrap();
//! assert_eq!(first_line.search(&line, 0).unwrap().range(), 0..9);
//!
//! let mut later_line = Matcher::new(source.resolve_anchors(false, false)).unwrap();
//! assert!(later_line.search(&line, 0).is_none());
//! ```

mod cache;
mod captures;
mod error;
mod escape;
mod matcher;
mod options;
mod scanner;
mod source;
mod text;

#[cfg(test)]
mod tests;

pub use cache::MatcherCache;
pub use captures::Captures;
pub use error::{BackReferenceError, PatternError, TextError};
pub use escape::{escape_regex_characters, is_regex_character};
pub use matcher::Matcher;
pub use options::MatcherOptions;
pub use scanner::{ScanMatch, Scanner};
pub use source::{PatternSource, RuleId};
pub use text::{BufferId, CodeUnit, EncodedText};
