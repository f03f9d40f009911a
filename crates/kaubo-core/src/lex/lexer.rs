// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The streaming lexer engine.
//!
//! The lexer pulls bytes out of a [`RingBuffer`], discovers codepoint
//! boundaries with the UTF-8 codec, and drives every registered machine in
//! parallel through the [`MachineManager`]. When the machines stop, the
//! manager's best match becomes the next token; whitespace, tabs, newlines,
//! and comments fold into cursor updates instead of being emitted.
//!
//! # Design Principles
//!
//! - **Never halt on bad input**: undecodable bytes become `Utf8Error`
//!   tokens, unmatched stretches become `InvalidToken` — the caller decides
//!   whether to keep going.
//! - **Pull model**: [`Lexer::next_token`] drives everything; there is no
//!   internal scheduler. `None` means "no token *yet*" until the stream is
//!   terminated, after which it means "input exhausted".
//! - **Peek, don't pop**: bytes stay in the ring until a winner is chosen,
//!   so a losing machine's extra progress is re-lexed, not lost.
//!
//! # Example
//!
//! ```
//! use kaubo_core::lex::Lexer;
//! use kaubo_core::parse::{kaubo_machines, KauboTokenKind};
//!
//! let mut lexer = Lexer::new(256);
//! for machine in kaubo_machines() {
//!     lexer.register_machine(machine);
//! }
//! lexer.feed(b"var x = 1;").unwrap();
//! lexer.terminate();
//!
//! let first = lexer.next_token().unwrap();
//! assert_eq!(first.kind(), KauboTokenKind::Var);
//! ```

use ecow::EcoVec;

use crate::lex::{Coordinate, LexError, MachineManager, StateMachine, Token, TokenKind};
use crate::ring_buffer::RingBuffer;
use crate::utf8;

/// Configuration for a [`Lexer`].
#[derive(Debug, Clone, Copy)]
pub struct LexerConfig {
    /// Ring buffer capacity in bytes; must be at least the longest
    /// expected token.
    pub ring_capacity: usize,
    /// Columns a tab advances the cursor by.
    pub tab_stride: u32,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 4096,
            tab_stride: 4,
        }
    }
}

/// What one codepoint-sized bite of input did to the machines.
#[derive(Debug, Clone, Copy)]
enum EatOutcome {
    /// The whole codepoint was consumed; keep eating.
    Consumed,
    /// A machine rejected a byte; the current token is as long as it gets.
    Rejected,
    /// Not enough bytes buffered and the stream is still open.
    Wait,
    /// Not enough bytes buffered and the stream is terminated.
    Exhausted,
    /// The bytes at the token frontier do not decode.
    DecodeError,
}

/// Result of settling the bytes accumulated for one token attempt.
enum Settled<K: TokenKind> {
    /// A real token to hand to the caller.
    Token(Token<K>),
    /// Whitespace/tab/newline/comment; the cursor advanced, nothing to emit.
    Trivia,
}

/// Streaming tokenizer over a byte ring, generic over the front-end's
/// token-kind enum.
#[derive(Debug)]
pub struct Lexer<K: TokenKind> {
    ring: RingBuffer,
    manager: MachineManager<K>,
    tab_stride: u32,
    /// Coordinate captured before the first byte of the current attempt.
    token_start: Coordinate,
    cursor: Coordinate,
    /// Bytes the machines consumed for the current attempt. The bytes
    /// themselves are still in the ring; only a winner pops them.
    token_byte_len: usize,
    terminated: bool,
    /// Latched by the first `next_token`; locks machine registration.
    started: bool,
}

impl<K: TokenKind> Lexer<K> {
    /// Creates a lexer with the given ring capacity and the default tab
    /// stride.
    #[must_use]
    pub fn new(ring_capacity: usize) -> Self {
        Self::with_config(LexerConfig {
            ring_capacity,
            ..LexerConfig::default()
        })
    }

    /// Creates a lexer from a full configuration.
    #[must_use]
    pub fn with_config(config: LexerConfig) -> Self {
        Self {
            ring: RingBuffer::new(config.ring_capacity),
            manager: MachineManager::new(),
            tab_stride: config.tab_stride,
            token_start: Coordinate::default(),
            cursor: Coordinate::default(),
            token_byte_len: 0,
            terminated: false,
            started: false,
        }
    }

    /// Registers a token machine.
    ///
    /// # Panics
    ///
    /// Panics when called after the first [`Lexer::next_token`]; the
    /// machine set is part of the lexer's construction.
    pub fn register_machine(&mut self, machine: StateMachine<K>) {
        assert!(
            !self.started,
            "machines must be registered before lexing begins"
        );
        self.manager.add_machine(machine);
    }

    /// Appends bytes to the input stream.
    ///
    /// Blocks while the ring is full; pair a large feed with a consumer on
    /// another thread, or size the ring for the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::FeedAfterTerminate`] once the stream is
    /// terminated.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), LexError> {
        if self.terminated {
            return Err(LexError::FeedAfterTerminate);
        }
        for &byte in bytes {
            self.ring
                .push(byte)
                .map_err(|_| LexError::FeedAfterTerminate)?;
        }
        Ok(())
    }

    /// Marks end-of-input and wakes any blocked feeder. Idempotent.
    pub fn terminate(&mut self) {
        self.terminated = true;
        self.ring.close();
    }

    /// Returns `true` once the stream is terminated and fully drained.
    #[must_use]
    pub fn end_of_input(&self) -> bool {
        self.terminated && self.ring.is_empty()
    }

    /// Returns the next token.
    ///
    /// `None` means "waiting for input" while the stream is open, and
    /// "exhausted" once it is terminated; [`Lexer::end_of_input`]
    /// disambiguates.
    pub fn next_token(&mut self) -> Option<Token<K>> {
        self.started = true;
        loop {
            match self.eat() {
                EatOutcome::Consumed => {}
                EatOutcome::Wait => return None,
                EatOutcome::Rejected => match self.settle_token() {
                    Settled::Token(token) => return Some(token),
                    Settled::Trivia => {}
                },
                EatOutcome::Exhausted => {
                    if self.token_byte_len > 0 {
                        match self.settle_token() {
                            Settled::Token(token) => return Some(token),
                            Settled::Trivia => {}
                        }
                    } else if self.ring.is_empty() {
                        return None;
                    } else {
                        // A trailing byte run too short for its announced
                        // codepoint length; drain it one error at a time.
                        return self.utf8_error_token();
                    }
                }
                EatOutcome::DecodeError => {
                    if self.token_byte_len > 0 {
                        // Settle the pending token first; the offending
                        // byte is re-examined on the next call.
                        match self.settle_token() {
                            Settled::Token(token) => return Some(token),
                            Settled::Trivia => {}
                        }
                    } else {
                        return self.utf8_error_token();
                    }
                }
            }
        }
    }

    /// Peeks the next codepoint at the token frontier and feeds its bytes
    /// to the machines.
    fn eat(&mut self) -> EatOutcome {
        let Some(leading_byte) = self.ring.try_peek_at(self.token_byte_len) else {
            return if self.terminated {
                EatOutcome::Exhausted
            } else {
                EatOutcome::Wait
            };
        };

        let Ok(length) = utf8::quick_byte_length(leading_byte) else {
            return EatOutcome::DecodeError;
        };

        let mut bytes = [0u8; 4];
        for (i, slot) in bytes.iter_mut().take(length).enumerate() {
            match self.ring.try_peek_at(self.token_byte_len + i) {
                Some(byte) => *slot = byte,
                None => {
                    return if self.terminated {
                        EatOutcome::Exhausted
                    } else {
                        EatOutcome::Wait
                    };
                }
            }
        }

        if utf8::decode(&bytes[..length], 0).is_err() {
            return EatOutcome::DecodeError;
        }

        for &byte in &bytes[..length] {
            if self.manager.process_event(byte) {
                self.token_byte_len += 1;
            } else {
                return EatOutcome::Rejected;
            }
        }
        EatOutcome::Consumed
    }

    /// Resolves the accumulated bytes into a token or a cursor update.
    fn settle_token(&mut self) -> Settled<K> {
        match self.manager.select_best_match() {
            Some(best) => {
                let lexeme = self.pop_bytes(best.match_length);
                let kind = best.token_kind;
                if kind.is_whitespace() {
                    self.cursor.column += 1;
                    self.finish_attempt();
                    Settled::Trivia
                } else if kind.is_tab() {
                    self.cursor.column += self.tab_stride;
                    self.finish_attempt();
                    Settled::Trivia
                } else if kind.is_newline() {
                    self.cursor.line += 1;
                    self.cursor.column = 1;
                    self.finish_attempt();
                    Settled::Trivia
                } else if kind.is_comment() {
                    self.advance_cursor_over(&lexeme);
                    self.finish_attempt();
                    Settled::Trivia
                } else {
                    let token = Token::new(kind, lexeme.as_slice(), self.token_start);
                    self.advance_cursor_over(&lexeme);
                    self.finish_attempt();
                    Settled::Token(token)
                }
            }
            None => {
                // No machine ever accepted. Pop at least one byte so the
                // stream always makes progress.
                let length = self.token_byte_len.max(1);
                let lexeme = self.pop_bytes(length);
                let token = Token::new(K::INVALID_TOKEN, lexeme.as_slice(), self.token_start);
                self.advance_cursor_over(&lexeme);
                self.finish_attempt();
                Settled::Token(token)
            }
        }
    }

    /// Pops one undecodable byte as a `Utf8Error` token.
    fn utf8_error_token(&mut self) -> Option<Token<K>> {
        let byte = self.ring.try_pop()?;
        let lexeme: EcoVec<u8> = EcoVec::from([byte].as_slice());
        let token = Token::new(K::UTF8_ERROR, lexeme, self.token_start);
        self.cursor.column += 1;
        self.finish_attempt();
        Some(token)
    }

    fn pop_bytes(&mut self, length: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(length);
        for _ in 0..length {
            match self.ring.try_pop() {
                Some(byte) => bytes.push(byte),
                // The bytes were peeked moments ago and only this thread
                // consumes; a short pop means the attempt is already bust.
                None => break,
            }
        }
        bytes
    }

    /// Advances the cursor across a popped lexeme, codepoint by codepoint.
    ///
    /// Lexemes spanning lines (block comments) advance the line counter
    /// and restart the column after the last newline.
    fn advance_cursor_over(&mut self, lexeme: &[u8]) {
        let codepoints =
            |bytes: &[u8]| bytes.iter().filter(|&&b| b & 0xC0 != 0x80).count() as u32;
        let newlines = lexeme.iter().filter(|&&b| b == b'\n').count() as u32;
        if newlines > 0 {
            self.cursor.line += newlines;
            let after_last = lexeme
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(lexeme, |pos| &lexeme[pos + 1..]);
            self.cursor.column = 1 + codepoints(after_last);
        } else {
            self.cursor.column += codepoints(lexeme);
        }
    }

    /// Rewinds per-token state for the next attempt.
    fn finish_attempt(&mut self) {
        self.token_byte_len = 0;
        self.manager.reset();
        self.token_start = self.cursor;
    }
}

impl<K: TokenKind> Iterator for Lexer<K> {
    type Item = Token<K>;

    /// Yields tokens; only meaningful once the stream is terminated, since
    /// an open stream reports "waiting" as `None` too.
    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
