// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the streaming lexer.
//!
//! Lexical problems in the *input* are never errors: ill-formed bytes
//! surface in-band as `Utf8Error`/`InvalidToken` tokens. The errors here
//! cover misuse of the lexer itself.

use thiserror::Error;

/// Contract violations on the [`super::Lexer`] API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// [`super::Lexer::feed`] was called after [`super::Lexer::terminate`].
    #[error("cannot feed input after terminate")]
    FeedAfterTerminate,
}
