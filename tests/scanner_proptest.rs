//! Robustness properties for the scanner and the reading pipeline

use proptest::prelude::*;
use toml_reader::{read_toml, tokenize};

proptest! {
    /// Arbitrary input never panics the scanner
    #[test]
    fn tokenize_never_panics(input in any::<String>()) {
        let _ = tokenize(&input);
    }

    /// Every token covers an in-bounds span and quotes the exact slice
    /// it was scanned from
    #[test]
    fn tokens_quote_their_spans(input in any::<String>()) {
        let (tokens, _) = tokenize(&input);
        for token in &tokens {
            prop_assert!(token.span.start <= token.span.end);
            prop_assert!(token.span.end <= input.len());
            prop_assert_eq!(token.image, &input[token.span.start..token.span.end]);
        }
    }

    /// Tokens come out in source order
    #[test]
    fn tokens_are_ordered(input in any::<String>()) {
        let (tokens, _) = tokenize(&input);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.start <= pair[1].span.start);
            prop_assert!(pair[0].pos <= pair[1].pos);
        }
    }

    /// The whole pipeline never panics, whatever the input
    #[test]
    fn read_toml_never_panics(input in any::<String>()) {
        let _ = read_toml(&input, false);
        let _ = read_toml(&input, true);
    }

    /// A tree comes back exactly when there are no errors
    #[test]
    fn result_and_errors_are_mutually_exclusive(input in any::<String>()) {
        let outcome = read_toml(&input, false);
        prop_assert_eq!(outcome.result.is_some(), outcome.errors.is_empty());
    }

    /// Well-formed bindings with arbitrary string values round-trip
    #[test]
    fn simple_string_bindings_read_back(value in "[a-zA-Z0-9 .,;:!?_-]*") {
        let text = format!("key = \"{value}\"\n");
        let outcome = read_toml(&text, false);
        prop_assert!(outcome.is_ok(), "errors: {:?}", outcome.errors);
    }
}
