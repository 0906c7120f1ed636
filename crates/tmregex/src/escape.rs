use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static REGEX_CHARACTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\-\\\{\}\*\+\?\|\^\$\.,\[\]\(\)#\s]").expect("metacharacter class is valid")
});

/// Whether `ch` has to be escaped to be matched literally by a grammar
/// pattern.
#[must_use]
pub fn is_regex_character(ch: char) -> bool {
    REGEX_CHARACTER.is_match(ch.encode_utf8(&mut [0; 4]))
}

/// Prefixes every regex metacharacter and every whitespace character in
/// `value` with a backslash, so that the result matches `value` literally.
///
/// ```rust
/// assert_eq!(tmregex::escape_regex_characters("a.b*c"), r"a\.b\*c");
/// assert_eq!(tmregex::escape_regex_characters("plain"), "plain");
/// ```
#[must_use]
pub fn escape_regex_characters(value: &str) -> Cow<'_, str> {
    REGEX_CHARACTER.replace_all(value, r"\$0")
}
