// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token kinds for the JSON front-end.
//!
//! The keyword literals sit at the top of the priority range (below only
//! `Utf8Error`) so they cannot lose a tie; JSON has no identifier rule to
//! compete with, but the ordering keeps the two front-ends consistent.

use std::fmt;

use crate::lex::TokenKind;

/// Every token kind the JSON machine set can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum JsonTokenKind {
    /// A byte that failed UTF-8 decoding; highest priority.
    Utf8Error = 0,

    /// `true`
    True = 5,
    /// `false`
    False = 6,
    /// `null`
    Null = 7,

    /// A double-quoted string, raw lexeme including the quotes.
    String = 10,
    /// `[0-9]+`
    Integer = 11,

    /// `[`
    LeftBracket = 20,
    /// `]`
    RightBracket = 21,
    /// `{`
    LeftCurly = 22,
    /// `}`
    RightCurly = 23,
    /// `:`
    Colon = 24,
    /// `,`
    Comma = 25,

    /// A single space.
    Whitespace = 30,
    /// A tab.
    Tab = 31,
    /// `\n` or `\r\n`.
    NewLine = 32,

    /// A byte stretch no machine accepts; lowest priority.
    InvalidToken = 255,
}

impl TokenKind for JsonTokenKind {
    const UTF8_ERROR: Self = Self::Utf8Error;
    const INVALID_TOKEN: Self = Self::InvalidToken;

    fn priority(self) -> u8 {
        self as u8
    }

    fn is_whitespace(self) -> bool {
        self == Self::Whitespace
    }

    fn is_newline(self) -> bool {
        self == Self::NewLine
    }

    fn is_tab(self) -> bool {
        self == Self::Tab
    }

    fn is_comment(self) -> bool {
        false
    }
}

impl fmt::Display for JsonTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Utf8Error => "<utf8 error>",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::String => "<string>",
            Self::Integer => "<integer>",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftCurly => "{",
            Self::RightCurly => "}",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Whitespace => "<whitespace>",
            Self::Tab => "<tab>",
            Self::NewLine => "<newline>",
            Self::InvalidToken => "<invalid token>",
        };
        f.write_str(text)
    }
}
