// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The JSON machine set and lexer assembly.

use crate::json::JsonTokenKind;
use crate::lex::{builders, Lexer, LexerConfig, Predicate, StateMachine, Token};

/// Double-quoted JSON string; the body is any byte except `"`. The lexeme
/// stays raw — escape sequences pass through untouched.
fn json_string(kind: JsonTokenKind) -> StateMachine<JsonTokenKind> {
    let mut machine = StateMachine::new(kind);
    let start = machine.current_state();
    let body = machine.add_state(false);
    let accept = machine.add_state(true);
    machine.add_transition(start, body, Predicate::Byte(b'"'));
    machine.add_transition(body, accept, Predicate::Byte(b'"'));
    machine.add_transition(body, body, Predicate::NotByte(b'"'));
    machine
}

/// All machines of the JSON front-end, in registration order.
#[must_use]
pub fn json_machines() -> Vec<StateMachine<JsonTokenKind>> {
    use crate::json::JsonTokenKind as J;

    let mut machines = vec![
        builders::keyword("true", J::True),
        builders::keyword("false", J::False),
        builders::keyword("null", J::Null),
        json_string(J::String),
        builders::integer(J::Integer),
        builders::single_symbol(b'[', J::LeftBracket),
        builders::single_symbol(b']', J::RightBracket),
        builders::single_symbol(b'{', J::LeftCurly),
        builders::single_symbol(b'}', J::RightCurly),
        builders::single_symbol(b':', J::Colon),
        builders::single_symbol(b',', J::Comma),
    ];
    machines.push(builders::whitespace(J::Whitespace));
    machines.push(builders::tab(J::Tab));
    machines.push(builders::newline(J::NewLine));
    machines
}

/// A streaming lexer with the full JSON machine set registered.
#[must_use]
pub fn json_lexer(config: LexerConfig) -> Lexer<JsonTokenKind> {
    let mut lexer = Lexer::with_config(config);
    for machine in json_machines() {
        lexer.register_machine(machine);
    }
    lexer
}

/// Lexes a complete JSON string into tokens.
#[must_use]
pub fn lex(source: &str) -> Vec<Token<JsonTokenKind>> {
    let mut lexer = json_lexer(LexerConfig {
        ring_capacity: source.len().max(64),
        ..LexerConfig::default()
    });
    lexer
        .feed(source.as_bytes())
        .expect("freshly created lexer accepts input");
    lexer.terminate();
    lexer.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Coordinate;
    use crate::json::JsonTokenKind as J;

    #[test]
    fn minimal_object_token_stream() {
        // The smallest interesting object, with exact coordinates.
        let tokens = lex(r#"{"a":123}"#);
        let expected = [
            (J::LeftCurly, "{", (1, 1)),
            (J::String, "\"a\"", (1, 2)),
            (J::Colon, ":", (1, 5)),
            (J::Integer, "123", (1, 6)),
            (J::RightCurly, "}", (1, 9)),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, text, (line, column))) in tokens.iter().zip(expected) {
            assert_eq!(token.kind(), kind);
            assert_eq!(token.text(), Some(text));
            assert_eq!(token.coordinate(), Coordinate::new(line, column));
        }
    }

    #[test]
    fn keywords_and_structure() {
        let kinds: Vec<J> = lex("[true, false, null]")
            .into_iter()
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                J::LeftBracket,
                J::True,
                J::Comma,
                J::False,
                J::Comma,
                J::Null,
                J::RightBracket
            ]
        );
    }

    #[test]
    fn strings_keep_escapes_raw() {
        let tokens = lex(r#""a\nb""#);
        assert_eq!(tokens[0].kind(), J::String);
        assert_eq!(tokens[0].text(), Some(r#""a\nb""#));
    }

    #[test]
    fn unmatched_bytes_are_invalid_tokens() {
        let tokens = lex("{x}");
        assert_eq!(tokens[1].kind(), J::InvalidToken);
        assert_eq!(tokens[1].lexeme(), b"x");
    }
}
