// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for lexer crash safety.
//!
//! Feeds arbitrary bytes — including invalid UTF-8 — straight into a
//! Kaubo lexer and drains it. The lexer must never panic: undecodable
//! bytes become `Utf8Error` tokens and unmatched stretches become
//! `InvalidToken`, so every input has a finite, well-formed token stream.
//!
//! # Success Criteria
//!
//! - No panic on any byte sequence
//! - Draining terminates (every byte is consumed by some token or
//!   suppressed as whitespace)
//! - Every `Utf8Error` lexeme is exactly one byte

#![no_main]

use kaubo_core::lex::{Lexer, LexerConfig};
use kaubo_core::parse::kaubo_machines;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut lexer = Lexer::with_config(LexerConfig {
        ring_capacity: data.len().max(64),
        ..LexerConfig::default()
    });
    for machine in kaubo_machines() {
        lexer.register_machine(machine);
    }
    if lexer.feed(data).is_err() {
        return;
    }
    lexer.terminate();

    while let Some(token) = lexer.next_token() {
        if token.is_utf8_error() {
            assert_eq!(token.lexeme().len(), 1);
        }
    }
});
