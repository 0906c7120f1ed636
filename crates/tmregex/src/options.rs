/// Compilation options for [`Matcher`](crate::Matcher).
///
/// Grammar patterns are written for Oniguruma's Ruby syntax, where `^` and
/// `$` always match at line boundaries. The defaults reproduce that.
///
/// # Examples
///
/// ```rust
/// use tmregex::{Matcher, MatcherOptions};
///
/// let options = MatcherOptions {
///     backtrack_limit: Some(100_000),
///     ..Default::default()
/// };
/// let _matcher = Matcher::with_options(r"\w+", options).unwrap();
/// ```
///
/// # Default
///
/// All limits are left to the engine and anchors follow line semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Maximum number of backtracking steps before a search gives up.
    ///
    /// A search that hits the limit is reported as no match (and logged).
    ///
    /// # Default
    ///
    /// `None`, the engine's own limit.
    pub backtrack_limit: Option<usize>,

    /// Size limit for the automaton the engine delegates simple
    /// sub-expressions to.
    ///
    /// # Default
    ///
    /// `None`, the engine's own limit.
    pub delegate_size_limit: Option<usize>,

    /// Size limit for the lazy DFA cache of delegated sub-expressions.
    ///
    /// # Default
    ///
    /// `None`, the engine's own limit.
    pub delegate_dfa_size_limit: Option<usize>,

    /// Whether `^` and `$` match only at the very start and end of the text.
    ///
    /// When `false`, the pattern is compiled in multi-line mode so that `$`
    /// also matches before a `\n`, as in Oniguruma.
    ///
    /// # Default
    ///
    /// `false`
    pub single_line_anchors: bool,
}

impl MatcherOptions {
    pub(crate) fn builder(&self, pattern: &str) -> fancy_regex::RegexBuilder {
        let mut builder = if self.single_line_anchors {
            fancy_regex::RegexBuilder::new(pattern)
        } else {
            fancy_regex::RegexBuilder::new(&format!("(?m){pattern}"))
        };
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        if let Some(limit) = self.delegate_size_limit {
            builder.delegate_size_limit(limit);
        }
        if let Some(limit) = self.delegate_dfa_size_limit {
            builder.delegate_dfa_size_limit(limit);
        }
        builder
    }
}
