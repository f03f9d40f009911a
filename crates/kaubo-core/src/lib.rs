// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Kaubo streaming lexer and Pratt parser framework.
//!
//! This crate contains the core framework:
//! - A blocking byte [`ring_buffer`] between feeder and lexer threads
//! - A strict [`utf8`] codec with the byte classifiers machines use
//! - The generic [`lex`] engine: parallel token machines, longest-match
//!   selection with priority tie-breaks, and precise line/column tracking
//! - The Kaubo front-end: [`ast`], [`ast_walker`] listeners, and the
//!   [`parse`] Pratt parser
//! - A minimal [`json`] front-end exercising the same engine
//!
//! The pipeline: bytes → ring buffer → lexer (drives the machine manager;
//! machines consult the codec) → token stream → parser → AST → listeners.
//!
//! # Example
//!
//! ```
//! use kaubo_core::ast_walker::AstPrinter;
//! use kaubo_core::parse::Parser;
//!
//! let module = Parser::from_source("var sum = |a, b| { a + b; };")
//!     .parse()
//!     .unwrap();
//! assert!(AstPrinter::render(&module).contains("Lambda: |a, b|"));
//! ```

pub mod ast;
pub mod ast_walker;
pub mod json;
pub mod lex;
pub mod parse;
pub mod ring_buffer;
pub mod utf8;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{ExprPtr, Expression, Module, Statement, StmtPtr};
    pub use crate::ast_walker::ParseListener;
    pub use crate::lex::{Coordinate, Lexer, LexerConfig, StateMachine, Token, TokenKind};
    pub use crate::parse::{KauboTokenKind, ParseError, Parser};
    pub use crate::ring_buffer::RingBuffer;
}
