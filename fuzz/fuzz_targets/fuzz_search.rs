#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tmregex::{Captures, EncodedText, Matcher, MatcherOptions, PatternSource, RuleId};

#[derive(Arbitrary, Debug)]
struct Input {
    pattern: String,
    line: String,
    allow_a: bool,
    allow_g: bool,
    /// Raw probe positions, snapped to character boundaries.
    probes: Vec<u16>,
    /// Raw capture bounds for back-reference resolution.
    groups: Vec<(u16, u16)>,
}

fn boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(core::iter::once(text.len()))
        .collect()
}

fuzz_target!(|input: Input| {
    let source = PatternSource::new(&input.pattern, RuleId(0));
    let stops = boundaries(&input.line);

    // Back-reference resolution must never panic, whatever the captures.
    if !input.groups.is_empty() {
        let ranges = input
            .groups
            .iter()
            .map(|&(a, b)| {
                let (a, b) = (usize::from(a.min(b)), usize::from(a.max(b)));
                Some(a..b)
            })
            .collect();
        let captures = Captures::from_ranges(ranges);
        let _ = source.resolve_back_references(&input.line, &captures);
    }

    let effective = source.resolve_anchors(input.allow_a, input.allow_g);
    let options = MatcherOptions::default();
    let Ok(mut memoized) = Matcher::with_options(effective, options) else {
        return;
    };
    let Ok(mut fresh) = Matcher::with_options(effective, options) else {
        panic!("pattern compiled once but not twice: {effective:?}");
    };

    let mut positions: Vec<usize> = input
        .probes
        .iter()
        .map(|&p| stops[usize::from(p) % stops.len()])
        .collect();
    positions.sort_unstable();

    let text = EncodedText::new(input.line.as_str());
    for position in positions {
        fresh.reset();
        let expected = fresh.search(&text, position);
        let actual = memoized.search(&text, position);
        assert_eq!(expected, actual, "{effective:?} at {position}");
        if let Some(caps) = actual {
            let _ = caps.to_code_units(&text);
        }
    }
});
