// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the JSON parser.

use miette::Diagnostic;
use thiserror::Error;

use crate::lex::Coordinate;

/// A JSON parse error with the source coordinate that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {coordinate}")]
#[diagnostic()]
pub struct JsonParseError {
    /// What went wrong.
    #[source]
    pub kind: JsonParseErrorKind,
    /// Start coordinate of the offending token (or of end-of-input).
    pub coordinate: Coordinate,
}

impl JsonParseError {
    /// Creates a JSON parse error.
    #[must_use]
    pub fn new(kind: JsonParseErrorKind, coordinate: Coordinate) -> Self {
        Self { kind, coordinate }
    }
}

/// The kind of JSON parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JsonParseErrorKind {
    /// A token no JSON production starts with.
    #[error("unexpected token")]
    UnexpectedToken,

    /// The token stream ended inside a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// An integer literal that does not fit the value type.
    #[error("invalid number format")]
    InvalidNumberFormat,

    /// An object key without its `:`.
    #[error("missing colon in object")]
    MissingColonInObject,

    /// A member or element not followed by `,` or the closing bracket.
    #[error("missing comma or closing bracket")]
    MissingCommaOrBracket,
}

/// Convenience alias for JSON parser results.
pub type JsonParseResult<T> = Result<T, JsonParseError>;
