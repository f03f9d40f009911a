// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The Kaubo machine set and lexer assembly.
//!
//! One machine per token shape, built from the shared
//! [`builders`](crate::lex::builders) vocabulary. Keyword machines carry
//! kinds that numerically precede [`KauboTokenKind::Identifier`], so the
//! manager's tie-break resolves `true` as a keyword while `truer` stays an
//! identifier by longest match; the set asserts that ordering in debug
//! builds rather than trusting convention.

use crate::lex::{builders, Lexer, LexerConfig, StateMachine, Token, TokenKind as _};
use crate::parse::KauboTokenKind;

/// All machines of the Kaubo front-end, in registration order.
#[must_use]
pub fn kaubo_machines() -> Vec<StateMachine<KauboTokenKind>> {
    use crate::parse::KauboTokenKind as K;

    let keywords = [
        ("var", K::Var),
        ("if", K::If),
        ("elif", K::Elif),
        ("else", K::Else),
        ("while", K::While),
        ("for", K::For),
        ("return", K::Return),
        ("in", K::In),
        ("true", K::True),
        ("false", K::False),
        ("null", K::Null),
        ("and", K::And),
        ("or", K::Or),
    ];
    for (_, kind) in keywords {
        debug_assert!(
            kind.priority() < K::Identifier.priority(),
            "keyword {kind:?} must outrank the identifier machine"
        );
    }

    let mut machines = Vec::new();
    for (word, kind) in keywords {
        machines.push(builders::keyword(word, kind));
    }

    machines.push(builders::integer(K::Integer));
    machines.push(builders::string(K::String));
    machines.push(builders::identifier(K::Identifier));

    machines.push(builders::line_comment(K::Comment));
    machines.push(builders::block_comment(K::Comment));

    machines.push(builders::double_symbol("==", K::EqualEqual));
    machines.push(builders::double_symbol("!=", K::BangEqual));
    machines.push(builders::double_symbol(">=", K::GreaterEqual));
    machines.push(builders::double_symbol("<=", K::LessEqual));

    let singles = [
        (b'>', K::Greater),
        (b'<', K::Less),
        (b'+', K::Plus),
        (b'-', K::Minus),
        (b'*', K::Star),
        (b'/', K::Slash),
        (b'!', K::Bang),
        (b'=', K::Equal),
        (b',', K::Comma),
        (b';', K::Semicolon),
        (b'.', K::Dot),
        (b'|', K::Pipe),
        (b'(', K::LeftParen),
        (b')', K::RightParen),
        (b'{', K::LeftBrace),
        (b'}', K::RightBrace),
        (b'[', K::LeftBracket),
        (b']', K::RightBracket),
    ];
    for (byte, kind) in singles {
        machines.push(builders::single_symbol(byte, kind));
    }

    machines.push(builders::whitespace(K::Whitespace));
    machines.push(builders::tab(K::Tab));
    machines.push(builders::newline(K::NewLine));

    machines
}

/// A streaming lexer with the full Kaubo machine set registered.
#[must_use]
pub fn kaubo_lexer(config: LexerConfig) -> Lexer<KauboTokenKind> {
    let mut lexer = Lexer::with_config(config);
    for machine in kaubo_machines() {
        lexer.register_machine(machine);
    }
    lexer
}

/// Lexes a complete source string into tokens.
///
/// Convenience for tests and one-shot callers; streaming callers build a
/// [`kaubo_lexer`] and drive `feed`/`next_token` themselves.
#[must_use]
pub fn lex(source: &str) -> Vec<Token<KauboTokenKind>> {
    let capacity = source.len().max(64);
    let mut lexer = kaubo_lexer(LexerConfig {
        ring_capacity: capacity,
        ..LexerConfig::default()
    });
    lexer
        .feed(source.as_bytes())
        .expect("freshly created lexer accepts input");
    lexer.terminate();
    lexer.collect()
}
