//! `\A`, `\G` and `\z` handling.
//!
//! The scan treats a backslash and the character after it as one unit, so
//! `\\A` is an escaped backslash followed by a literal `A` and is left alone.

use std::borrow::Cow;

/// Engine-native "end of subject, not after a line terminator".
pub(crate) const END_ANCHOR_REPLACEMENT: &str = r"$(?!\n)(?<!\n)";

/// Stands in for a disallowed anchor. It never occurs in editor text, so the
/// branch containing it cannot match.
pub(crate) const SENTINEL: char = '\u{FFFF}';

pub(crate) struct Scanned<'a> {
    pub(crate) source: Cow<'a, str>,
    pub(crate) has_anchor: bool,
}

/// Splices out every `\z` and reports whether `\A` or `\G` occurs.
pub(crate) fn scan(pattern: &str) -> Scanned<'_> {
    let mut output = String::new();
    let mut last_pushed = 0;
    let mut has_anchor = false;

    let mut chars = pattern.char_indices();
    while let Some((pos, ch)) = chars.next() {
        if ch != '\\' {
            continue;
        }
        match chars.next() {
            Some((_, 'z')) => {
                output.push_str(&pattern[last_pushed..pos]);
                output.push_str(END_ANCHOR_REPLACEMENT);
                last_pushed = pos + 2;
            }
            Some((_, 'A' | 'G')) => has_anchor = true,
            _ => {}
        }
    }

    let source = if last_pushed == 0 {
        Cow::Borrowed(pattern)
    } else {
        output.push_str(&pattern[last_pushed..]);
        Cow::Owned(output)
    };
    Scanned { source, has_anchor }
}

/// Whether `pattern` contains an unescaped `\G`, whose meaning follows the
/// search start position.
pub(crate) fn has_search_anchor(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.next() == Some('G') {
            return true;
        }
    }
    false
}

/// The four spellings of an anchor-sensitive pattern, indexed by
/// `(allow_a, allow_g)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnchorVariants {
    a0_g0: String,
    a0_g1: String,
    a1_g0: String,
    a1_g1: String,
}

impl AnchorVariants {
    pub(crate) fn build(source: &str) -> Self {
        let mut variants = Self {
            a0_g0: String::with_capacity(source.len()),
            a0_g1: String::with_capacity(source.len()),
            a1_g0: String::with_capacity(source.len()),
            a1_g1: String::with_capacity(source.len()),
        };

        let mut chars = source.chars();
        while let Some(ch) = chars.next() {
            let next = if ch == '\\' { chars.next() } else { None };
            for (allow_a, allow_g, out) in variants.slots_mut() {
                match next {
                    Some('A') => push_anchor(out, allow_a, 'A'),
                    Some('G') => push_anchor(out, allow_g, 'G'),
                    Some(next) => {
                        out.push(ch);
                        out.push(next);
                    }
                    None => out.push(ch),
                }
            }
        }

        variants
    }

    fn slots_mut(&mut self) -> [(bool, bool, &mut String); 4] {
        [
            (false, false, &mut self.a0_g0),
            (false, true, &mut self.a0_g1),
            (true, false, &mut self.a1_g0),
            (true, true, &mut self.a1_g1),
        ]
    }

    pub(crate) fn get(&self, allow_a: bool, allow_g: bool) -> &str {
        match (allow_a, allow_g) {
            (false, false) => &self.a0_g0,
            (false, true) => &self.a0_g1,
            (true, false) => &self.a1_g0,
            (true, true) => &self.a1_g1,
        }
    }
}

fn push_anchor(out: &mut String, allowed: bool, anchor: char) {
    if allowed {
        out.push('\\');
        out.push(anchor);
    } else {
        out.push(SENTINEL);
    }
}
