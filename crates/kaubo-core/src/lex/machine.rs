// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A single deterministic token state machine.
//!
//! A machine is a transition graph over byte events, tagged with the token
//! kind it recognizes. The [`super::MachineManager`] runs many machines in
//! parallel over the same bytes; each machine only tracks its own current
//! state here.
//!
//! Outgoing transitions from a state are scanned in registration order and
//! the first satisfying predicate wins, so construction order is part of a
//! machine's definition. A machine that rejects a byte stays in its current
//! state until [`StateMachine::reset`].

use crate::lex::TokenKind;
use crate::utf8;

/// Index of a state within one machine.
pub type StateId = usize;

/// A transition predicate over a single input byte.
///
/// Predicates are a small closed set instead of boxed closures: every
/// machine in practice matches an exact byte, everything but a byte, or a
/// codec classifier, and the tagged form keeps transitions `Copy` and
/// allocation-free.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Matches exactly this byte.
    Byte(u8),
    /// Matches any byte except this one.
    NotByte(u8),
    /// Matches whatever the classifier function accepts.
    Classifier(fn(u8) -> bool),
}

impl Predicate {
    /// Tests the predicate against one byte.
    #[must_use]
    pub fn matches(self, byte: u8) -> bool {
        match self {
            Self::Byte(expected) => byte == expected,
            Self::NotByte(excluded) => byte != excluded,
            Self::Classifier(f) => f(byte),
        }
    }

    /// Predicate for ASCII digits.
    #[must_use]
    pub const fn digit() -> Self {
        Self::Classifier(utf8::is_digit)
    }

    /// Predicate for identifier-start bytes.
    #[must_use]
    pub const fn identifier_start() -> Self {
        Self::Classifier(utf8::is_identifier_start)
    }

    /// Predicate for identifier-continuation bytes.
    #[must_use]
    pub const fn identifier_part() -> Self {
        Self::Classifier(utf8::is_identifier_part)
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    to: StateId,
    predicate: Predicate,
}

/// A token state machine with labeled accepting states.
///
/// Machines start with a single non-accepting initial state; callers add
/// further states and transitions, then the manager drives the machine one
/// byte at a time.
///
/// # Example
///
/// ```
/// use kaubo_core::lex::{Predicate, StateMachine};
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # #[repr(u8)]
/// # enum Kind { Utf8Error = 0, Plus = 10, Invalid = 255 }
/// # impl kaubo_core::lex::TokenKind for Kind {
/// #     const UTF8_ERROR: Self = Self::Utf8Error;
/// #     const INVALID_TOKEN: Self = Self::Invalid;
/// #     fn priority(self) -> u8 { self as u8 }
/// #     fn is_whitespace(self) -> bool { false }
/// #     fn is_newline(self) -> bool { false }
/// #     fn is_tab(self) -> bool { false }
/// #     fn is_comment(self) -> bool { false }
/// # }
/// let mut machine = StateMachine::new(Kind::Plus);
/// let start = machine.current_state();
/// let accept = machine.add_state(true);
/// machine.add_transition(start, accept, Predicate::Byte(b'+'));
///
/// assert!(machine.process_event(b'+'));
/// assert!(machine.is_accepting());
/// ```
#[derive(Debug, Clone)]
pub struct StateMachine<K: TokenKind> {
    token_kind: K,
    accepting: Vec<bool>,
    transitions: Vec<Vec<Transition>>,
    initial: StateId,
    current: StateId,
}

impl<K: TokenKind> StateMachine<K> {
    /// Creates a machine recognizing `token_kind`, with one non-accepting
    /// initial state.
    #[must_use]
    pub fn new(token_kind: K) -> Self {
        Self {
            token_kind,
            accepting: vec![false],
            transitions: vec![Vec::new()],
            initial: 0,
            current: 0,
        }
    }

    /// Adds a state and returns its id.
    pub fn add_state(&mut self, is_accepting: bool) -> StateId {
        self.accepting.push(is_accepting);
        self.transitions.push(Vec::new());
        self.accepting.len() - 1
    }

    /// Adds a transition; later registrations are tried later.
    ///
    /// # Panics
    ///
    /// Panics when either state id does not exist. Dangling ids are a
    /// construction bug, not a runtime condition.
    pub fn add_transition(&mut self, from: StateId, to: StateId, predicate: Predicate) {
        assert!(from < self.accepting.len(), "unknown source state {from}");
        assert!(to < self.accepting.len(), "unknown target state {to}");
        self.transitions[from].push(Transition { to, predicate });
    }

    /// Feeds one byte; returns `true` when a transition fired.
    ///
    /// On `false` the machine is unchanged and will keep rejecting until
    /// [`StateMachine::reset`].
    pub fn process_event(&mut self, byte: u8) -> bool {
        let fired = self.transitions[self.current]
            .iter()
            .find(|t| t.predicate.matches(byte));
        match fired {
            Some(transition) => {
                self.current = transition.to;
                true
            }
            None => false,
        }
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Returns the current state id.
    #[must_use]
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Returns `true` when the current state is accepting.
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.accepting[self.current]
    }

    /// Returns the token kind this machine recognizes.
    #[must_use]
    pub fn token_kind(&self) -> K {
        self.token_kind
    }
}
