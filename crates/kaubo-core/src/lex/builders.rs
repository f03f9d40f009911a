// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Factory vocabulary for the common token machine shapes.
//!
//! Front-ends assemble their machine sets from these constructors instead
//! of wiring states by hand. Each returns a fresh [`StateMachine`] tagged
//! with the caller's token kind; the caller remains responsible for
//! choosing kind values so that keyword machines numerically precede the
//! identifier machine (the tie-break rule).

use crate::lex::{Predicate, StateMachine, TokenKind};
use crate::utf8;

/// Two-state machine accepting exactly one byte.
pub fn single_symbol<K: TokenKind>(byte: u8, kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let accept = machine.add_state(true);
    machine.add_transition(start, accept, Predicate::Byte(byte));
    machine
}

/// Three-state machine accepting an exact two-byte sequence.
///
/// # Panics
///
/// Panics unless `symbol` is exactly two bytes.
pub fn double_symbol<K: TokenKind>(symbol: &str, kind: K) -> StateMachine<K> {
    let bytes = symbol.as_bytes();
    assert!(bytes.len() == 2, "double_symbol requires a two-byte symbol");
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let middle = machine.add_state(false);
    let accept = machine.add_state(true);
    machine.add_transition(start, middle, Predicate::Byte(bytes[0]));
    machine.add_transition(middle, accept, Predicate::Byte(bytes[1]));
    machine
}

/// Chain of n+1 states accepting only the full keyword.
///
/// # Panics
///
/// Panics on an empty keyword.
pub fn keyword<K: TokenKind>(word: &str, kind: K) -> StateMachine<K> {
    let bytes = word.as_bytes();
    assert!(!bytes.is_empty(), "keyword must be non-empty");
    let mut machine = StateMachine::new(kind);
    let mut state = machine.current_state();
    for (i, &byte) in bytes.iter().enumerate() {
        let next = machine.add_state(i + 1 == bytes.len());
        machine.add_transition(state, next, Predicate::Byte(byte));
        state = next;
    }
    machine
}

/// `[0-9]+`.
pub fn integer<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let digits = machine.add_state(true);
    machine.add_transition(start, digits, Predicate::digit());
    machine.add_transition(digits, digits, Predicate::digit());
    machine
}

/// `id_start id_part*`, using the codec classifiers.
pub fn identifier<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let body = machine.add_state(true);
    machine.add_transition(start, body, Predicate::identifier_start());
    machine.add_transition(body, body, Predicate::identifier_part());
    machine
}

/// Symmetric single- or double-quoted string; the body is any byte except
/// the opening quote. No escape processing — the lexeme is raw, quotes
/// included.
pub fn string<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    for quote in [b'"', b'\''] {
        let body = machine.add_state(false);
        let accept = machine.add_state(true);
        machine.add_transition(start, body, Predicate::Byte(quote));
        machine.add_transition(body, accept, Predicate::Byte(quote));
        machine.add_transition(body, body, Predicate::NotByte(quote));
    }
    machine
}

/// `// …` up to (and excluding) the newline.
pub fn line_comment<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let slash = machine.add_state(false);
    let body = machine.add_state(true);
    machine.add_transition(start, slash, Predicate::Byte(b'/'));
    machine.add_transition(slash, body, Predicate::Byte(b'/'));
    machine.add_transition(body, body, Predicate::NotByte(b'\n'));
    machine
}

/// `/* … */` with the two-state `*`/`/` trailer.
pub fn block_comment<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let slash = machine.add_state(false);
    let body = machine.add_state(false);
    let star = machine.add_state(false);
    let accept = machine.add_state(true);
    machine.add_transition(start, slash, Predicate::Byte(b'/'));
    machine.add_transition(slash, body, Predicate::Byte(b'*'));
    machine.add_transition(body, star, Predicate::Byte(b'*'));
    machine.add_transition(body, body, Predicate::NotByte(b'*'));
    machine.add_transition(star, accept, Predicate::Byte(b'/'));
    machine.add_transition(star, star, Predicate::Byte(b'*'));
    machine.add_transition(star, body, Predicate::NotByte(b'/'));
    machine
}

/// Single space.
pub fn whitespace<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let accept = machine.add_state(true);
    machine.add_transition(start, accept, Predicate::Classifier(utf8::is_whitespace));
    machine
}

/// Single tab.
pub fn tab<K: TokenKind>(kind: K) -> StateMachine<K> {
    single_symbol(b'\t', kind)
}

/// `\n`, or `\r\n` via a two-step path.
pub fn newline<K: TokenKind>(kind: K) -> StateMachine<K> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let carriage = machine.add_state(false);
    let accept = machine.add_state(true);
    machine.add_transition(start, accept, Predicate::Byte(b'\n'));
    machine.add_transition(start, carriage, Predicate::Byte(b'\r'));
    machine.add_transition(carriage, accept, Predicate::Byte(b'\n'));
    machine
}
