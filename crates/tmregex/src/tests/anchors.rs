use rstest::rstest;

use crate::{EncodedText, Matcher, PatternSource, RuleId};

fn search(pattern: &str, text: &str, position: usize) -> Option<core::ops::Range<usize>> {
    let text = EncodedText::new(text);
    Matcher::new(pattern)
        .unwrap()
        .search(&text, position)
        .map(|c| c.range())
}

#[test]
fn comment_at_buffer_start() {
    let source = PatternSource::new(r"\A\s*#.*", RuleId(7));
    assert!(source.has_anchor());

    assert_eq!(search(source.resolve_anchors(true, false), "  # hello", 0), Some(0..9));
    assert_eq!(search(source.resolve_anchors(true, true), "  # hello", 0), Some(0..9));
    assert_eq!(search(source.resolve_anchors(false, false), "  # hello", 0), None);
    assert_eq!(search(source.resolve_anchors(false, true), "  # hello", 0), None);
}

#[test]
fn variants_splice_sentinel_for_disallowed_anchors() {
    let source = PatternSource::new(r"\Afoo\G", RuleId(0));
    assert_eq!(source.resolve_anchors(false, false), "\u{FFFF}foo\u{FFFF}");
    assert_eq!(source.resolve_anchors(false, true), "\u{FFFF}foo\\G");
    assert_eq!(source.resolve_anchors(true, false), "\\Afoo\u{FFFF}");
    assert_eq!(source.resolve_anchors(true, true), r"\Afoo\G");
}

#[rstest]
#[case(false, false)]
#[case(false, true)]
#[case(true, false)]
#[case(true, true)]
fn patterns_without_anchors_are_returned_as_is(#[case] allow_a: bool, #[case] allow_g: bool) {
    let source = PatternSource::new(r"\bfoo\d+", RuleId(0));
    assert!(!source.has_anchor());
    assert_eq!(source.resolve_anchors(allow_a, allow_g), r"\bfoo\d+");
}

#[test]
fn escaped_backslash_is_not_an_anchor() {
    let source = PatternSource::new(r"\\A\\G", RuleId(0));
    assert!(!source.has_anchor());
    assert_eq!(source.resolve_anchors(false, false), r"\\A\\G");
}

#[test]
fn start_of_buffer_matches_only_at_zero() {
    let source = PatternSource::new(r"\Aab", RuleId(0));
    let pattern = source.resolve_anchors(true, true);
    assert_eq!(search(pattern, "abab", 0), Some(0..2));
    assert_eq!(search(pattern, "abab", 1), None);
    assert_eq!(search(source.resolve_anchors(false, true), "abab", 0), None);
}

#[test]
fn start_of_search_matches_only_at_position() {
    let source = PatternSource::new(r"\Gb", RuleId(0));
    let allowed = source.resolve_anchors(false, true);
    assert_eq!(search(allowed, "abab", 1), Some(1..2));
    assert_eq!(search(allowed, "abab", 0), None);
    assert_eq!(search(source.resolve_anchors(true, false), "abab", 1), None);
}

#[test]
fn end_anchor_is_rewritten_once() {
    let source = PatternSource::new(r"foo\z", RuleId(0));
    assert!(source.rewrote_end_anchor());
    assert_eq!(source.authored(), r"foo\z");
    assert_eq!(source.source(), r"foo$(?!\n)(?<!\n)");
    assert!(!source.has_anchor());

    let plain = PatternSource::new(r"foo\\z", RuleId(0));
    assert!(!plain.rewrote_end_anchor());
    assert_eq!(plain.source(), r"foo\\z");
}

#[rstest]
#[case("foo", Some(0..3))]
#[case("foo\n", None)]
#[case("foo\nfoo", Some(4..7))]
#[case("foobar", None)]
#[case("", None)]
fn end_anchor_matches_end_of_subject(
    #[case] text: &str,
    #[case] expected: Option<core::ops::Range<usize>>,
) {
    let source = PatternSource::new(r"foo\z", RuleId(0));
    assert_eq!(search(source.source(), text, 0), expected);
}

#[test]
fn end_anchor_rejects_end_after_line_terminator() {
    let source = PatternSource::new(r"o*\z", RuleId(0));
    assert_eq!(search(source.source(), "foo", 0), Some(1..3));
    assert_eq!(search(source.source(), "foo\n", 0), None);
}

#[test]
fn end_anchor_rewrite_keeps_anchor_variants_consistent() {
    let source = PatternSource::new(r"\Gx\z", RuleId(0));
    assert!(source.rewrote_end_anchor());
    assert_eq!(
        source.resolve_anchors(false, false),
        "\u{FFFF}x$(?!\\n)(?<!\\n)"
    );
    assert_eq!(search(source.resolve_anchors(false, true), "ax", 1), Some(1..2));
}

#[test]
fn replacing_with_same_source_is_a_no_op() {
    let source = PatternSource::new(r"\Aa\z", RuleId(3));
    let before = source.clone();
    let after = source.with_source(before.source());
    assert_eq!(after, before);
}

#[test]
fn replacing_source_rebuilds_anchor_variants() {
    let source = PatternSource::new(r"\Aa", RuleId(3));
    let replaced = source.with_source(r"\Gb");
    assert_eq!(replaced.rule_id(), RuleId(3));
    assert_eq!(replaced.resolve_anchors(true, false), "\u{FFFF}b");
    assert_eq!(replaced.resolve_anchors(false, true), r"\Gb");

    let unanchored = replaced.with_source("c");
    assert!(!unanchored.has_anchor());
    assert_eq!(unanchored.resolve_anchors(false, false), "c");
}
