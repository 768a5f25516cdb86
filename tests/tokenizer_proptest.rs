//! Property-based tests for the prerequisite tokenizer and parser
//!
//! The tokenizer must accept any input. The parser must be deterministic, and
//! the rendered form of a parsed expression must parse back to the same tree.

use grove::prereq::{parse_prerequisites, tokenize, CommaPolicy, ParseOptions, Token};
use proptest::prelude::*;

/// Strategy for a single course code in catalog spellings
fn course_code_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["EEL", "eee", "MAC", "Cop", "PHY"]),
        prop::sample::select(vec!["", " ", "  ", "\n", "\u{a0}", " \t"]),
        1000u32..6000,
        prop::sample::select(vec!["", "C", "c", "L"]),
    )
        .prop_map(|(prefix, gap, number, suffix)| format!("{}{}{}{}", prefix, gap, number, suffix))
}

/// Strategy for prerequisite text built from codes, operators, groups and prose
fn prerequisite_text_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        4 => course_code_strategy(),
        1 => prop::sample::select(vec![
            "consent of instructor",
            "senior standing",
            "C.S. majors only",
        ])
        .prop_map(String::from),
    ];

    leaf.prop_recursive(4, 24, 4, |inner| {
        (
            prop::collection::vec(inner, 2..4),
            prop::sample::select(vec![" and ", " or ", ", ", " & ", "; "]),
            any::<bool>(),
        )
            .prop_map(|(parts, op, grouped)| {
                let joined = parts.join(op);
                if grouped {
                    format!("({})", joined)
                } else {
                    joined
                }
            })
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_tokenize_never_panics(input in ".*") {
            let _tokens = tokenize(&input);
        }

        #[test]
        fn test_token_spans_are_ordered_and_in_bounds(input in "[A-Za-z0-9 ,;&().:/]{0,60}") {
            let tokens = tokenize(&input);
            let mut last_end = 0;
            for (_, span) in &tokens {
                prop_assert!(span.start >= last_end);
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= input.len());
                last_end = span.end;
            }
        }

        #[test]
        fn test_text_tokens_never_adjacent(input in "[a-z ]{0,40}") {
            let tokens = tokenize(&input);
            for pair in tokens.windows(2) {
                let both_text = matches!(pair[0].0, Token::Text(_)) && matches!(pair[1].0, Token::Text(_));
                prop_assert!(!both_text);
            }
        }

        #[test]
        fn test_parse_is_deterministic(input in "[A-Za-z0-9 ,&()]{0,40}") {
            let options = ParseOptions::default();
            prop_assert_eq!(
                parse_prerequisites(&input, options),
                parse_prerequisites(&input, options)
            );
        }

        #[test]
        fn test_generated_text_always_parses(text in prerequisite_text_strategy()) {
            prop_assert!(parse_prerequisites(&text, ParseOptions::default()).is_ok());
        }

        #[test]
        fn test_display_round_trip(text in prerequisite_text_strategy()) {
            for comma in [CommaPolicy::And, CommaPolicy::Or] {
                let options = ParseOptions::with_comma(comma);
                let expr = parse_prerequisites(&text, options).unwrap();
                let reparsed = parse_prerequisites(&expr.to_string(), options).unwrap();
                prop_assert_eq!(reparsed, expr);
            }
        }
    }
}
