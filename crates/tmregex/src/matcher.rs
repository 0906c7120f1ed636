//! A compiled pattern with a one-slot search memo.
//!
//! The tokenizer probes the same pattern against the same line many times,
//! at start positions that only move forward. A match found at or after `P`
//! is still the first match at or after any `P'` with `P <= P' <= start`, and
//! a failed search at `P` still fails at any `P' >= P`. The memo exploits
//! exactly that and nothing more.
//!
//! Neither holds once the pattern contains `\G`, which matches wherever the
//! search starts. Such a matcher only reuses a search made at the very same
//! position.

use std::sync::Arc;

use crate::{
    captures::Captures,
    error::PatternError,
    options::MatcherOptions,
    source::has_search_anchor,
    text::{BufferId, EncodedText},
};

#[derive(Debug)]
struct Memo {
    buffer: BufferId,
    position: usize,
    result: Option<Arc<Captures>>,
}

impl Memo {
    fn answers(&self, buffer: BufferId, position: usize, search_anchored: bool) -> bool {
        if self.buffer != buffer {
            return false;
        }
        if search_anchored {
            return self.position == position;
        }
        self.position <= position
            && self.result.as_ref().is_none_or(|c| c.start() >= position)
    }
}

/// One compiled effective pattern.
#[derive(Debug)]
pub struct Matcher {
    pattern: String,
    regex: fancy_regex::Regex,
    search_anchored: bool,
    memo: Option<Memo>,
}

impl Matcher {
    /// Compiles `pattern` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::with_options(pattern, MatcherOptions::default())
    }

    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn with_options(pattern: &str, options: MatcherOptions) -> Result<Self, PatternError> {
        let regex = options
            .builder(pattern)
            .build()
            .map_err(|e| PatternError::new(pattern, e))?;
        log::debug!("compiled pattern {pattern:?}");
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
            search_anchored: has_search_anchor(pattern),
            memo: None,
        })
    }

    /// The effective pattern this matcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of capture groups, including the overall match.
    #[must_use]
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    /// Forgets the memoized search.
    pub fn reset(&mut self) {
        self.memo = None;
    }

    /// Finds the first match in `text` starting at or after byte `position`.
    ///
    /// Look-behind and `\A` still see the text before `position`; `\G` holds
    /// at `position`.
    pub fn search(&mut self, text: &EncodedText, position: usize) -> Option<Arc<Captures>> {
        if let Some(memo) = &self.memo
            && memo.answers(text.id(), position, self.search_anchored)
        {
            log::trace!("memo hit for {:?} at {position}", self.pattern);
            return memo.result.clone();
        }

        let result = self.search_uncached(text, position);
        self.memo = Some(Memo {
            buffer: text.id(),
            position,
            result: result.clone(),
        });
        result
    }

    /// Same as [`search`](Self::search), with the start position given in the
    /// buffer's code units.
    ///
    /// # Panics
    ///
    /// Panics if `unit_position` is not a character boundary of `text`.
    pub fn search_units(
        &mut self,
        text: &EncodedText,
        unit_position: usize,
    ) -> Option<Arc<Captures>> {
        self.search(text, text.byte_offset(unit_position))
    }

    fn search_uncached(&self, text: &EncodedText, position: usize) -> Option<Arc<Captures>> {
        debug_assert!(
            text.as_str().is_char_boundary(position),
            "search position {position} is not a character boundary"
        );
        if !text.as_str().is_char_boundary(position) {
            log::error!(
                "search position {position} is not a character boundary of a {}-byte buffer",
                text.byte_len()
            );
            return None;
        }

        match self.regex.captures_from_pos(text.as_str(), position) {
            Ok(caps) => caps.map(|c| Arc::new(Captures::from_engine(&c))),
            Err(e) => {
                log::warn!("search for {:?} at {position} aborted: {e}", self.pattern);
                None
            }
        }
    }
}
