use std::collections::HashMap;

use crate::{error::PatternError, matcher::Matcher, options::MatcherOptions};

/// Matchers keyed by effective pattern string.
///
/// Back-reference substitution can turn one end pattern into a different
/// string per enclosing match, so matchers are created lazily, one per
/// distinct string. Compilation failures are kept as well: a malformed
/// pattern is reported once and then stays non-matching.
///
/// The cache is unbounded. Every distinct substitution stays until
/// [`clear`](Self::clear), so callers clear it once per document or
/// tokenization pass.
#[derive(Debug, Default)]
pub struct MatcherCache {
    options: MatcherOptions,
    matchers: HashMap<String, Result<Matcher, PatternError>>,
}

impl MatcherCache {
    /// An empty cache compiling with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache compiling with `options`.
    #[must_use]
    pub fn with_options(options: MatcherOptions) -> Self {
        Self {
            options,
            matchers: HashMap::new(),
        }
    }

    /// The matcher for `pattern`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns the (possibly remembered) compilation failure.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<&mut Matcher, PatternError> {
        if !self.matchers.contains_key(pattern) {
            let compiled = Matcher::with_options(pattern, self.options);
            if let Err(e) = &compiled {
                log::warn!("{e}");
            }
            self.matchers.insert(pattern.to_owned(), compiled);
            log::debug!("matcher cache holds {} patterns", self.matchers.len());
        }
        match self.matchers.get_mut(pattern) {
            Some(Ok(matcher)) => Ok(matcher),
            Some(Err(e)) => Err(e.clone()),
            None => unreachable!("pattern was inserted above"),
        }
    }

    /// Number of distinct patterns seen, including failed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether no pattern has been requested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Drops every matcher.
    pub fn clear(&mut self) {
        self.matchers.clear();
    }
}
