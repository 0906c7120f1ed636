use std::borrow::Cow;

use crate::{BackReferenceError, Captures, EncodedText, Matcher, PatternSource, RuleId};

fn begin_match(pattern: &str, line: &EncodedText) -> Captures {
    let captures = Matcher::new(pattern).unwrap().search(line, 0).unwrap();
    (*captures).clone()
}

#[test]
fn captured_text_is_matched_literally() {
    let line = EncodedText::new("begin foo+bar end");
    let captures = begin_match(r"begin (\S+)", &line);
    assert_eq!(captures.text(1, &line), Some("foo+bar"));

    let end = PatternSource::new(r"\1\s*end", RuleId(2));
    assert!(end.has_back_references());
    let resolved = end.resolve_back_references(line.as_str(), &captures);
    assert_eq!(resolved, r"foo\+bar\s*end");

    let mut matcher = Matcher::new(&resolved).unwrap();
    let target = EncodedText::new("foo+bar end");
    assert_eq!(matcher.search(&target, 0).map(|c| c.range()), Some(0..11));
    assert!(matcher.search(&EncodedText::new("foobarbar end"), 0).is_none());
}

#[test]
fn metacharacters_in_captures_are_escaped() {
    let line = "a.b*c";
    let captures = Captures::from_ranges(vec![Some(0..5), Some(0..5)]);
    let end = PatternSource::new(r"^\1$", RuleId(0));
    let resolved = end.resolve_back_references(line, &captures);
    assert_eq!(resolved, r"^a\.b\*c$");

    let mut matcher = Matcher::new(&resolved).unwrap();
    assert!(matcher.search(&EncodedText::new("a.b*c"), 0).is_some());
    assert!(matcher.search(&EncodedText::new("axbbc"), 0).is_none());
    assert!(matcher.search(&EncodedText::new("a.bbbc"), 0).is_none());
}

#[test]
fn whitespace_in_captures_is_escaped() {
    let captures = Captures::from_ranges(vec![Some(0..3), Some(0..3)]);
    let end = PatternSource::new(r"\1", RuleId(0));
    let resolved = end.resolve_back_references("a b", &captures);
    assert_eq!(resolved, r"a\ b");

    let mut matcher = Matcher::new(&resolved).unwrap();
    assert_eq!(
        matcher.search(&EncodedText::new("xa b"), 0).map(|c| c.range()),
        Some(1..4)
    );
    assert!(matcher.search(&EncodedText::new("ab"), 0).is_none());

    let line = "\t\u{3000}\u{a0}";
    let captures = Captures::from_ranges(vec![Some(0..line.len()), Some(0..line.len())]);
    let resolved = end.resolve_back_references(line, &captures);
    let mut matcher = Matcher::new(&resolved).unwrap();
    assert!(matcher.search(&EncodedText::new(line), 0).is_some());
    assert!(matcher.search(&EncodedText::new("\t  "), 0).is_none());
}

#[test]
fn out_of_range_group_becomes_empty() {
    let captures = Captures::from_ranges(vec![Some(0..1)]);
    let end = PatternSource::new(r"x\3y", RuleId(0));
    assert_eq!(end.resolve_back_references("q", &captures), "xy");
}

#[test]
fn non_participating_group_becomes_empty() {
    let captures = Captures::from_ranges(vec![Some(0..1), None, Some(0..1)]);
    let end = PatternSource::new(r"<\1|\2>", RuleId(0));
    assert_eq!(end.resolve_back_references("q", &captures), "<|q>");
}

#[test]
fn multi_digit_references() {
    let line = "0123456789X";
    let mut groups: Vec<_> = (0..=10).map(|i| Some(i..i + 1)).collect();
    groups[0] = Some(0..11);
    let captures = Captures::from_ranges(groups);
    let end = PatternSource::new(r"\10\1", RuleId(0));
    assert_eq!(end.resolve_back_references(line, &captures), "X1");
}

#[test]
fn escaped_backslash_before_digit_is_not_a_reference() {
    let end = PatternSource::new(r"\\1", RuleId(0));
    assert!(!end.has_back_references());
    let captures = Captures::from_ranges(vec![Some(0..1), Some(0..1)]);
    assert_eq!(
        end.resolve_back_references("z", &captures),
        Cow::Borrowed(r"\\1")
    );
}

#[test]
fn patterns_without_references_are_borrowed() {
    let end = PatternSource::new(r"\)", RuleId(0));
    let captures = Captures::from_ranges(vec![Some(0..1)]);
    assert!(matches!(
        end.resolve_back_references("(", &captures),
        Cow::Borrowed(r"\)")
    ));
}

#[test]
fn invalid_capture_range_falls_back_to_source() {
    let end = PatternSource::new(r"\0!", RuleId(0));
    let captures = Captures::from_ranges(vec![Some(0..50)]);

    assert_eq!(
        end.try_resolve_back_references("short", &captures),
        Err(BackReferenceError::InvalidCaptureRange {
            group: 0,
            range: 0..50,
            line_len: 5,
        })
    );
    // The unresolved pattern, never the line text.
    assert_eq!(end.resolve_back_references("short", &captures), r"\0!");
}

#[test]
fn overflowing_reference_falls_back_to_source() {
    let end = PatternSource::new(r"\99999999999999999999999", RuleId(0));
    let captures = Captures::from_ranges(vec![Some(0..1)]);
    assert!(matches!(
        end.try_resolve_back_references("a", &captures),
        Err(BackReferenceError::IndexOverflow { .. })
    ));
    assert_eq!(
        end.resolve_back_references("a", &captures),
        r"\99999999999999999999999"
    );
}

#[test]
fn effective_pattern_resolves_references_then_anchors() {
    let line = "<<tag>>";
    let captures = Captures::from_ranges(vec![Some(0..5), Some(2..5)]);
    let end = PatternSource::new(r"\G</\1>", RuleId(4));
    assert_eq!(end.effective_pattern(line, &captures, false, true), r"\G</tag>");
    assert_eq!(
        end.effective_pattern(line, &captures, false, false),
        "\u{FFFF}</tag>"
    );

    let plain = PatternSource::new(r"\G>", RuleId(5));
    assert!(matches!(
        plain.effective_pattern(line, &captures, false, true),
        Cow::Borrowed(r"\G>")
    ));
}
