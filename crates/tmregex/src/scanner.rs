use std::sync::Arc;

use crate::{
    captures::Captures, error::PatternError, matcher::Matcher, options::MatcherOptions,
    text::EncodedText,
};

/// The winning pattern of a [`Scanner`] search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// Index of the pattern in the order it was given to the scanner.
    pub index: usize,
    /// Captures of that pattern's match.
    pub captures: Arc<Captures>,
}

/// A set of patterns searched together, earliest match wins.
///
/// This is the shape of a tokenizer step: a rule offers several patterns and
/// the one matching closest to the scan position is taken. Each pattern keeps
/// its own memo, so a pattern whose last match still lies ahead of the scan
/// position is not searched again.
#[derive(Debug)]
pub struct Scanner {
    matchers: Vec<Matcher>,
}

impl Scanner {
    /// Compiles every pattern with default options.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        Self::with_options(patterns, MatcherOptions::default())
    }

    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn with_options<S: AsRef<str>>(
        patterns: &[S],
        options: MatcherOptions,
    ) -> Result<Self, PatternError> {
        let matchers = patterns
            .iter()
            .map(|p| Matcher::with_options(p.as_ref(), options))
            .collect::<Result<_, _>>()?;
        Ok(Self { matchers })
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the scanner has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Finds the pattern whose match starts earliest at or after byte
    /// `position`. Ties go to the pattern listed first.
    pub fn find_next_match(&mut self, text: &EncodedText, position: usize) -> Option<ScanMatch> {
        let mut best: Option<ScanMatch> = None;

        for (index, matcher) in self.matchers.iter_mut().enumerate() {
            let Some(captures) = matcher.search(text, position) else {
                continue;
            };
            if best
                .as_ref()
                .is_some_and(|b| b.captures.start() <= captures.start())
            {
                continue;
            }
            let at_position = captures.start() == position;
            best = Some(ScanMatch { index, captures });
            if at_position {
                break;
            }
        }

        best
    }
}
