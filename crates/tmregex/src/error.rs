use core::ops::Range;
use std::sync::Arc;

use thiserror::Error;

/// A pattern string that the regex engine refused to compile.
///
/// This is a construction-time failure: the owning grammar rule should be
/// reported and treated as permanently non-matching.
#[derive(Error, Debug, Clone)]
#[error("parsing regex pattern {pattern:?} failed: {cause}")]
pub struct PatternError {
    pattern: String,
    #[source]
    cause: Arc<fancy_regex::Error>,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, cause: fancy_regex::Error) -> Self {
        Self {
            pattern: pattern.to_owned(),
            cause: Arc::new(cause),
        }
    }

    /// The effective pattern string that failed to compile.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The engine diagnostic.
    #[must_use]
    pub fn cause(&self) -> &fancy_regex::Error {
        &self.cause
    }
}

/// A fault while splicing captured text into a back-referencing pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackReferenceError {
    /// The digits of a `\N` token do not fit in a `usize`.
    #[error("back-reference token \\{token} is out of range")]
    IndexOverflow {
        /// The digits following the backslash.
        token: String,
    },
    /// A capture does not describe a valid slice of the line.
    #[error("capture {group} spans {range:?}, which is not a valid slice of a {line_len}-byte line")]
    InvalidCaptureRange {
        /// Capture group index.
        group: usize,
        /// The offending byte range.
        range: Range<usize>,
        /// Byte length of the line the capture was applied to.
        line_len: usize,
    },
}

/// Text that cannot be turned into an [`EncodedText`](crate::EncodedText).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// An unpaired surrogate in UTF-16 input.
    #[error("unpaired surrogate at UTF-16 offset {position}")]
    InvalidUtf16 {
        /// Code-unit offset of the offending surrogate.
        position: usize,
    },
}
