//! Grammar rule patterns before they reach the engine.
//!
//! A [`PatternSource`] is built once per rule pattern and shared by every
//! line tokenized with that rule. It does the work that does not depend on
//! the line up front:
//! - `\z` is rewritten into an engine-native assertion.
//! - If `\A` or `\G` occurs, the four anchor-resolved spellings are built.
//! - Whether the pattern refers to an enclosing rule's captures is recorded.
//!
//! Per match attempt the caller only picks a precomputed spelling, plus a
//! back-reference substitution for end patterns that need one.

mod anchors;
mod backrefs;

use std::borrow::Cow;

use crate::{captures::Captures, error::BackReferenceError};
use anchors::AnchorVariants;
pub(crate) use anchors::has_search_anchor;

/// Opaque identifier of the grammar rule a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

/// A grammar rule pattern with its anchor spellings precomputed.
///
/// This is a value type. [`with_source`](Self::with_source) returns a new
/// value instead of patching the anchor spellings in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSource {
    authored: String,
    source: String,
    rule_id: RuleId,
    rewrote_end_anchor: bool,
    anchors: Option<Box<AnchorVariants>>,
    has_back_references: bool,
}

impl PatternSource {
    /// Prepares `pattern` for the rule `rule_id`.
    #[must_use]
    pub fn new(pattern: &str, rule_id: RuleId) -> Self {
        let scanned = anchors::scan(pattern);
        let rewrote_end_anchor = matches!(scanned.source, Cow::Owned(_));
        let source = scanned.source.into_owned();
        let anchors = scanned
            .has_anchor
            .then(|| Box::new(AnchorVariants::build(&source)));
        let has_back_references = backrefs::has_back_references(&source);

        Self {
            authored: pattern.to_owned(),
            source,
            rule_id,
            rewrote_end_anchor,
            anchors,
            has_back_references,
        }
    }

    /// Replaces the pattern, keeping the rule id.
    ///
    /// Passing the current source returns `self` untouched; anything else
    /// is prepared from scratch.
    #[must_use]
    pub fn with_source(self, pattern: &str) -> Self {
        if self.source == pattern {
            return self;
        }
        Self::new(pattern, self.rule_id)
    }

    /// The pattern as written in the grammar.
    #[must_use]
    pub fn authored(&self) -> &str {
        &self.authored
    }

    /// The pattern after the `\z` rewrite.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The owning rule.
    #[must_use]
    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }

    /// Whether a `\z` was rewritten.
    #[must_use]
    pub fn rewrote_end_anchor(&self) -> bool {
        self.rewrote_end_anchor
    }

    /// Whether the pattern contains `\A` or `\G`.
    #[must_use]
    pub fn has_anchor(&self) -> bool {
        self.anchors.is_some()
    }

    /// Whether the pattern contains a `\N` back-reference.
    #[must_use]
    pub fn has_back_references(&self) -> bool {
        self.has_back_references
    }

    /// The spelling to compile for one match attempt.
    ///
    /// `allow_a` says whether the attempt starts at the beginning of the
    /// document, `allow_g` whether it starts where the previous match ended.
    /// A disallowed anchor can never match.
    #[must_use]
    pub fn resolve_anchors(&self, allow_a: bool, allow_g: bool) -> &str {
        match &self.anchors {
            Some(variants) => variants.get(allow_a, allow_g),
            None => &self.source,
        }
    }

    /// Splices the enclosing match's captured text into every `\N` of the
    /// pattern, escaped so that it matches literally.
    ///
    /// `line` is the text `captures` were produced against. A reference to a
    /// group that is absent or did not participate becomes the empty string.
    ///
    /// # Errors
    ///
    /// Fails if a group index does not fit in a `usize`, or if a capture is
    /// not a valid slice of `line`.
    pub fn try_resolve_back_references(
        &self,
        line: &str,
        captures: &Captures,
    ) -> Result<String, BackReferenceError> {
        backrefs::resolve(&self.source, line, captures)
    }

    /// Like [`try_resolve_back_references`](Self::try_resolve_back_references),
    /// but a fault yields the unresolved source so that one malformed rule
    /// cannot abort the tokenization of a line.
    #[must_use]
    pub fn resolve_back_references(&self, line: &str, captures: &Captures) -> Cow<'_, str> {
        if !self.has_back_references {
            return Cow::Borrowed(&self.source);
        }
        match self.try_resolve_back_references(line, captures) {
            Ok(resolved) => Cow::Owned(resolved),
            Err(e) => {
                log::warn!(
                    "rule {:?}: keeping {:?} unresolved: {e}",
                    self.rule_id,
                    self.source
                );
                Cow::Borrowed(&self.source)
            }
        }
    }

    /// The effective pattern for one match attempt of an end pattern: first
    /// back-references, then anchors.
    #[must_use]
    pub fn effective_pattern(
        &self,
        line: &str,
        captures: &Captures,
        allow_a: bool,
        allow_g: bool,
    ) -> Cow<'_, str> {
        match self.resolve_back_references(line, captures) {
            Cow::Borrowed(_) => Cow::Borrowed(self.resolve_anchors(allow_a, allow_g)),
            Cow::Owned(resolved) => {
                let resolved = Self::new(&resolved, self.rule_id);
                Cow::Owned(resolved.resolve_anchors(allow_a, allow_g).to_owned())
            }
        }
    }
}
