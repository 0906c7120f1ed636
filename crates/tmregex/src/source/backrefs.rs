use std::sync::LazyLock;

use regex::Regex;

use crate::{captures::Captures, error::BackReferenceError, escape::escape_regex_characters};

/// A backslash and the character after it, with the digit run captured when
/// the escape is a back-reference. Consuming every escape pair keeps `\\1`
/// (an escaped backslash, then `1`) from being read as a back-reference.
static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\(?:([0-9]+)|.)").expect("escape pattern is valid"));

pub(crate) fn has_back_references(source: &str) -> bool {
    ESCAPE
        .captures_iter(source)
        .any(|caps| caps.get(1).is_some())
}

pub(crate) fn resolve(
    source: &str,
    line: &str,
    captures: &Captures,
) -> Result<String, BackReferenceError> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for caps in ESCAPE.captures_iter(source) {
        let Some(digits) = caps.get(1) else {
            continue;
        };
        let whole = caps.get_match().range();
        output.push_str(&source[last..whole.start]);
        output.push_str(&escape_regex_characters(captured_text(
            digits.as_str(),
            line,
            captures,
        )?));
        last = whole.end;
    }
    output.push_str(&source[last..]);

    Ok(output)
}

fn captured_text<'l>(
    digits: &str,
    line: &'l str,
    captures: &Captures,
) -> Result<&'l str, BackReferenceError> {
    let group: usize = digits
        .parse()
        .map_err(|_| BackReferenceError::IndexOverflow {
            token: digits.to_owned(),
        })?;
    let Some(range) = captures.get(group) else {
        return Ok("");
    };
    line.get(range.clone())
        .ok_or_else(|| BackReferenceError::InvalidCaptureRange {
            group,
            range,
            line_len: line.len(),
        })
}
