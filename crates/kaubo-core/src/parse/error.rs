// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Kaubo parser.
//!
//! Lexical problems never reach this module — the lexer reports them
//! in-band as error tokens. Parse errors are returned as values from
//! [`super::Parser::parse`]; there is no recovery, the first error wins.
//! Every error carries the [`Coordinate`] of the token that triggered it.

use miette::Diagnostic;
use thiserror::Error;

use crate::lex::Coordinate;

/// A parse error with the source coordinate that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at {coordinate}")]
#[diagnostic()]
pub struct ParseError {
    /// What went wrong.
    #[source]
    pub kind: ParseErrorKind,
    /// Start coordinate of the offending token (or of end-of-input).
    pub coordinate: Coordinate,
}

impl ParseError {
    /// Creates a parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, coordinate: Coordinate) -> Self {
        Self { kind, coordinate }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A token that no production can start or continue with.
    #[error("unexpected token")]
    UnexpectedToken,

    /// The token stream ended inside a production.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// An integer literal that does not fit the value type.
    #[error("invalid number format")]
    InvalidNumberFormat,

    /// A `(` without its matching `)`.
    #[error("missing right parenthesis")]
    MissingRightParen,

    /// A `{` without its matching `}`.
    #[error("missing right brace")]
    MissingRightBrace,

    /// An arrow not followed by `{`.
    #[error("expected '{{' after arrow")]
    ExpectedLeftBraceAfterArrow,

    /// An argument list element not followed by `,` or `)`.
    #[error("expected ',' or ')' in argument list")]
    ExpectedCommaOrRightParen,

    /// A `.` not followed by a member name.
    #[error("expected identifier after '.'")]
    ExpectedIdentifierAfterDot,

    /// A lambda parameter list without its closing `|`.
    #[error("expected '|'")]
    ExpectedPipe,

    /// A non-identifier inside lambda parameters.
    #[error("expected identifier in lambda parameters")]
    ExpectedIdentifierInLambdaParams,

    /// A lambda parameter not followed by `,` or `|`.
    #[error("expected ',' or '|' in lambda parameters")]
    ExpectedCommaOrPipeInLambda,

    /// A lambda parameter list not followed by a `{` body.
    #[error("expected '{{' as lambda body")]
    ExpectedLeftBraceInLambdaBody,

    /// Reserved for evaluators; the parser never produces it.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience alias for parser results.
pub type ParseResult<T> = Result<T, ParseError>;
