// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety.
//!
//! Runs arbitrary bytes through the full pipeline: Kaubo lexer, Pratt
//! parser, AST. The parser returns the first error as a value; success
//! here means "no panic", not "no parse error".

#![no_main]

use kaubo_core::parse::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The parser takes str input at this entry point; lossy conversion
    // still exercises unusual codepoint sequences. Raw invalid bytes are
    // covered by the `lex` target.
    let source = String::from_utf8_lossy(data);
    let _ = Parser::from_source(&source).parse();
});
