// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for JSON.
//!
//! One token of lookahead over a terminated [`Lexer`]; produces a
//! [`Value`] tree. The grammar is small enough that plain descent beats a
//! precedence climb — JSON has no operators.

use ecow::EcoString;

use crate::json::{json_lexer, JsonParseError, JsonParseErrorKind, JsonParseResult, JsonTokenKind, Value};
use crate::lex::{Coordinate, Lexer, LexerConfig, Token};

/// A JSON parser over a terminated token stream.
pub struct Parser {
    lexer: Lexer<JsonTokenKind>,
    current: Option<Token<JsonTokenKind>>,
    last_coordinate: Coordinate,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a parser over a fed and terminated lexer, priming one
    /// token of lookahead.
    #[must_use]
    pub fn new(lexer: Lexer<JsonTokenKind>) -> Self {
        let mut parser = Self {
            lexer,
            current: None,
            last_coordinate: Coordinate::default(),
        };
        parser.consume();
        parser
    }

    /// Creates a parser over a complete source string.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let mut lexer = json_lexer(LexerConfig {
            ring_capacity: source.len().max(64),
            ..LexerConfig::default()
        });
        lexer
            .feed(source.as_bytes())
            .expect("freshly created lexer accepts input");
        lexer.terminate();
        Self::new(lexer)
    }

    /// Parses one JSON value; trailing tokens are an error.
    ///
    /// # Errors
    ///
    /// Returns the first [`JsonParseError`] encountered.
    pub fn parse(&mut self) -> JsonParseResult<Value> {
        let value = self.parse_value()?;
        if self.current.is_some() {
            return Err(self.error(JsonParseErrorKind::UnexpectedToken));
        }
        Ok(value)
    }

    fn consume(&mut self) {
        if let Some(token) = &self.current {
            self.last_coordinate = token.coordinate();
        }
        self.current = self.lexer.next_token();
    }

    fn check(&self, kind: JsonTokenKind) -> bool {
        self.current.as_ref().is_some_and(|t| t.kind() == kind)
    }

    fn match_kind(&mut self, kind: JsonTokenKind) -> bool {
        if self.check(kind) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: JsonTokenKind, error: JsonParseErrorKind) -> JsonParseResult<()> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error(error))
        }
    }

    fn here(&self) -> Coordinate {
        self.current
            .as_ref()
            .map_or(self.last_coordinate, Token::coordinate)
    }

    fn error(&self, kind: JsonParseErrorKind) -> JsonParseError {
        JsonParseError::new(kind, self.here())
    }

    /// Current string token's text with the quotes stripped.
    fn current_string_content(&self) -> EcoString {
        let text = self
            .current
            .as_ref()
            .and_then(Token::text)
            .unwrap_or_default();
        EcoString::from(&text[1..text.len() - 1])
    }

    fn parse_value(&mut self) -> JsonParseResult<Value> {
        use crate::json::JsonTokenKind as J;
        let Some(token) = self.current.as_ref() else {
            return Err(self.error(JsonParseErrorKind::UnexpectedEndOfInput));
        };
        match token.kind() {
            J::Null => {
                self.consume();
                Ok(Value::Null)
            }
            J::True => {
                self.consume();
                Ok(Value::Bool(true))
            }
            J::False => {
                self.consume();
                Ok(Value::Bool(false))
            }
            J::Integer => {
                let value: i64 = token
                    .text()
                    .and_then(|text| text.parse().ok())
                    .ok_or_else(|| self.error(JsonParseErrorKind::InvalidNumberFormat))?;
                self.consume();
                Ok(Value::Integer(value))
            }
            J::String => {
                let content = self.current_string_content();
                self.consume();
                Ok(Value::String(content))
            }
            J::LeftCurly => self.parse_object(),
            J::LeftBracket => self.parse_array(),
            _ => Err(self.error(JsonParseErrorKind::UnexpectedToken)),
        }
    }

    fn parse_object(&mut self) -> JsonParseResult<Value> {
        use crate::json::JsonTokenKind as J;
        self.consume(); // {

        let mut members = Vec::new();
        if !self.check(J::RightCurly) {
            loop {
                if !self.check(J::String) {
                    return Err(self.error(JsonParseErrorKind::UnexpectedToken));
                }
                let key = self.current_string_content();
                self.consume();

                self.expect(J::Colon, JsonParseErrorKind::MissingColonInObject)?;
                let value = self.parse_value()?;
                members.push((key, value));

                if self.match_kind(J::Comma) {
                    continue;
                }
                break;
            }
        }

        self.expect(J::RightCurly, JsonParseErrorKind::MissingCommaOrBracket)?;
        Ok(Value::Object(members))
    }

    fn parse_array(&mut self) -> JsonParseResult<Value> {
        use crate::json::JsonTokenKind as J;
        self.consume(); // [

        let mut elements = Vec::new();
        if !self.check(J::RightBracket) {
            loop {
                elements.push(self.parse_value()?);
                if self.match_kind(J::Comma) {
                    continue;
                }
                break;
            }
        }

        self.expect(J::RightBracket, JsonParseErrorKind::MissingCommaOrBracket)?;
        Ok(Value::Array(elements))
    }
}
