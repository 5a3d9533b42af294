use parsekit::scanners::{digit, is_char};
use parsekit::{Location, SourceLocator, never, operators};
use proptest::prelude::*;
use std::collections::HashSet;

fn naive_locate(source: &[char], index: usize) -> Location {
    let before = &source[..index];
    let line = before.iter().filter(|&&c| c == '\n').count() + 1;
    let line_start = before.iter().rposition(|&c| c == '\n').map_or(0, |i| i + 1);
    Location::new(line, index - line_start + 1)
}

proptest! {
    #[test]
    fn test_locator_agrees_with_scan(
        text in "[ab\n]{0,40}",
        queries in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let source: Vec<char> = text.chars().collect();
        let mut locator = SourceLocator::new();
        for query in queries {
            let index = query.index(source.len() + 1);
            prop_assert_eq!(locator.locate(&source, index), naive_locate(&source, index));
        }
    }

    #[test]
    fn test_operator_order_never_shadows(names in prop::collection::vec("[=<>+]{1,3}", 0..12)) {
        let sorted = operators::sort(&names);
        let distinct: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(sorted.len(), distinct.len());
        for (i, earlier) in sorted.iter().enumerate() {
            for later in &sorted[i + 1..] {
                prop_assert!(
                    !(later.len() > earlier.len() && later.starts_with(earlier.as_str())),
                    "{} is tried before its extension {}", earlier, later
                );
            }
        }
    }

    #[test]
    fn test_zero_width_repetition_terminates(text in "x{0,20}") {
        let parser = is_char('x').optional().many();
        prop_assert_eq!(parser.parse(&text).map(|v| v.len()).ok(), Some(text.len()));
    }

    #[test]
    fn test_or_never_reports_the_same(text in "[0-9a]{0,6}") {
        let number = digit().many1().source();
        let with_never = number.clone().or(never());
        let plain = number.parse(&text).map_err(|e| e.to_string());
        let combined = with_never.parse(&text).map_err(|e| e.to_string());
        prop_assert_eq!(plain, combined);
    }
}
