// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The generic streaming lexer engine.
//!
//! This module is front-end agnostic: it knows nothing about Kaubo or
//! JSON, only about byte streams, token machines, and the [`TokenKind`]
//! contract. A front-end supplies a token-kind enum and a machine set
//! (usually assembled from [`builders`]), then pulls [`Token`]s out of a
//! [`Lexer`].
//!
//! See the crate docs for the full pipeline:
//! bytes → ring buffer → lexer → manager → machines → tokens.

pub mod builders;
mod error;
mod lexer;
mod machine;
mod manager;
mod token;

pub use error::LexError;
pub use lexer::{Lexer, LexerConfig};
pub use machine::{Predicate, StateId, StateMachine};
pub use manager::{BestMatch, MachineId, MachineManager};
pub use token::{Coordinate, Token, TokenKind};
