// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the streaming lexer over the Kaubo machine set.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics** — arbitrary byte input always produces tokens
//! 2. **Byte accounting** — every non-suppressed input byte lands in
//!    exactly one lexeme, in order
//! 3. **Coordinates are monotone** — token starts never move backwards
//! 4. **UTF-8 errors are one byte wide** — error tokens never swallow more
//! 5. **Valid fragments produce no error tokens**

use proptest::prelude::*;

use crate::lex::{Coordinate, Lexer, LexerConfig, Token};
use crate::parse::{kaubo_machines, KauboTokenKind};

/// Lexes raw bytes with the Kaubo machine set.
fn lex_bytes(input: &[u8]) -> Vec<Token<KauboTokenKind>> {
    let mut lexer = Lexer::with_config(LexerConfig {
        ring_capacity: input.len().max(64),
        ..LexerConfig::default()
    });
    for machine in kaubo_machines() {
        lexer.register_machine(machine);
    }
    lexer.feed(input).expect("fresh lexer accepts input");
    lexer.terminate();
    lexer.collect()
}

/// Bytes that the lexer suppresses (or may suppress, for comment slashes).
fn non_suppressible_byte() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("suppressible or comment-start byte", |b| {
        !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'/')
    })
}

/// Known-valid Kaubo fragments that must lex without error tokens.
const VALID_FRAGMENTS: &[&str] = &[
    "var x = 1;",
    "x + 1",
    "a.b.c()",
    "|x, y| { x + y; }",
    "if a >= b { a; } else { b; }",
    "while true { break_me(); }",
    "for item in [1, 2, 3] { item; }",
    "\"string\" 'other'",
    "// comment\nx",
    "/* block */ y",
    "a == b != c",
    "truer true",
];

proptest! {
    /// Property 1: the lexer never panics and always terminates on
    /// arbitrary bytes.
    #[test]
    fn lexer_never_panics(input in proptest::collection::vec(any::<u8>(), 0..400)) {
        let _tokens = lex_bytes(&input);
    }

    /// Property 2: with no suppressible bytes in the input, concatenating
    /// every lexeme (including error lexemes) rebuilds the input exactly.
    #[test]
    fn lexemes_rebuild_unsuppressed_input(
        input in proptest::collection::vec(non_suppressible_byte(), 0..300)
    ) {
        let tokens = lex_bytes(&input);
        let rebuilt: Vec<u8> = tokens
            .iter()
            .flat_map(|token| token.lexeme().iter().copied())
            .collect();
        prop_assert_eq!(rebuilt, input);
    }

    /// Property 3: token start coordinates never decrease.
    #[test]
    fn coordinates_are_monotone(input in proptest::collection::vec(any::<u8>(), 0..300)) {
        let tokens = lex_bytes(&input);
        let mut previous = Coordinate::new(1, 1);
        for token in &tokens {
            let here = token.coordinate();
            prop_assert!(
                here.line > previous.line
                    || (here.line == previous.line && here.column >= previous.column),
                "coordinate went backwards: {} -> {} in {:?}",
                previous,
                here,
                input,
            );
            prop_assert!(here.line >= 1 && here.column >= 1);
            previous = here;
        }
    }

    /// Property 4: every UTF-8 error lexeme is exactly one byte.
    #[test]
    fn utf8_error_lexemes_are_one_byte(
        input in proptest::collection::vec(any::<u8>(), 0..300)
    ) {
        for token in lex_bytes(&input) {
            if token.is_utf8_error() {
                prop_assert_eq!(token.lexeme().len(), 1, "lexeme: {:?}", token.lexeme());
            }
        }
    }

    /// Property 5: known-valid fragments produce no error tokens.
    #[test]
    fn valid_fragments_lex_cleanly(
        fragment in proptest::sample::select(VALID_FRAGMENTS)
    ) {
        for token in lex_bytes(fragment.as_bytes()) {
            prop_assert!(
                !token.is_utf8_error() && !token.is_invalid(),
                "fragment {:?} produced {:?}",
                fragment,
                token,
            );
        }
    }

    /// Property 6: the lexer is deterministic.
    #[test]
    fn lexer_is_deterministic(input in proptest::collection::vec(any::<u8>(), 0..200)) {
        let first = lex_bytes(&input);
        let second = lex_bytes(&input);
        prop_assert_eq!(first, second);
    }
}
