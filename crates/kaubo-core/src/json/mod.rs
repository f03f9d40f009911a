// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The JSON front-end: token kinds, machine set, value DOM, and parser.
//!
//! A deliberately small exercise of the engine: the machine set covers
//! the JSON token shapes, and a recursive descent parser folds the token
//! stream into a [`Value`] that prints back as compact JSON.
//!
//! # Example
//!
//! ```
//! use kaubo_core::json;
//!
//! let value = json::Parser::from_source(r#"{"a":123}"#).parse().unwrap();
//! assert_eq!(value.to_string(), r#"{"a": 123}"#);
//! ```

mod error;
mod machines;
mod parser;
mod token_kind;
mod value;

pub use error::{JsonParseError, JsonParseErrorKind, JsonParseResult};
pub use machines::{json_lexer, json_machines, lex};
pub use parser::Parser;
pub use token_kind::JsonTokenKind;
pub use value::Value;
