use core::ops::Range;

use crate::text::EncodedText;

/// Snapshot of one successful search.
///
/// Entry 0 is the overall match. Every other entry is a capture group, `None`
/// when the group did not take part in the match. Offsets are UTF-8 byte
/// offsets into the searched [`EncodedText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Range<usize>>>,
}

impl Captures {
    pub(crate) fn from_engine(caps: &fancy_regex::Captures<'_>) -> Self {
        let groups = (0..caps.len())
            .map(|i| caps.get(i).map(|m| m.start()..m.end()))
            .collect();
        Self { groups }
    }

    /// Builds a snapshot from explicit byte ranges.
    ///
    /// Useful to callers that carry captures across lines or rebuild them
    /// from a saved tokenizer state.
    ///
    /// # Panics
    ///
    /// Panics if `groups` is empty, if the overall match is absent, or if
    /// any range has `start > end`.
    #[must_use]
    pub fn from_ranges(groups: Vec<Option<Range<usize>>>) -> Self {
        assert!(
            matches!(groups.first(), Some(Some(_))),
            "the overall match must be present"
        );
        assert!(
            groups.iter().flatten().all(|r| r.start <= r.end),
            "capture ranges must not be reversed"
        );
        Self { groups }
    }

    /// Number of entries, including the overall match.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Byte range of entry `index`, if that group participated.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Byte range of the overall match.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.get(0).unwrap_or_default()
    }

    /// Start of the overall match.
    #[must_use]
    pub fn start(&self) -> usize {
        self.range().start
    }

    /// End of the overall match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.range().end
    }

    /// Iterates over all entries in group order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<Range<usize>>> + '_ {
        self.groups.iter().cloned()
    }

    /// The text captured by entry `index`.
    #[must_use]
    pub fn text<'t>(&self, index: usize, text: &'t EncodedText) -> Option<&'t str> {
        self.get(index).and_then(|r| text.as_str().get(r))
    }

    /// Translates every entry into the caller's code-unit offsets.
    ///
    /// # Panics
    ///
    /// Panics if these captures were not produced against `text` and an
    /// offset does not land on one of its character boundaries.
    #[must_use]
    pub fn to_code_units(&self, text: &EncodedText) -> Vec<Option<Range<usize>>> {
        self.groups
            .iter()
            .map(|g| {
                g.as_ref()
                    .map(|r| text.unit_offset(r.start)..text.unit_offset(r.end))
            })
            .collect()
    }
}
