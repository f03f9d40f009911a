// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lock-step driver for a set of parallel token machines.
//!
//! Every registered machine sees every byte of the current token attempt.
//! The manager tracks which machines are still live, how many bytes each
//! consumed, and whether each ever visited an accepting state, then picks a
//! single winner by **longest match**, breaking ties by **lowest token-kind
//! value** (highest priority).
//!
//! Running the machines in parallel keeps the grammar modular: front-ends
//! register one small machine per token shape rather than pre-compiling a
//! composite DFA, and the priority tie-break lets `true` outrank the
//! identifier rule even when both accept four bytes.

use crate::lex::{StateMachine, TokenKind};

/// Index of a machine within one manager, in registration order.
pub type MachineId = usize;

/// Per-machine progress for the current token attempt.
#[derive(Debug, Clone, Copy)]
struct RunState {
    /// Bytes consumed since the last reset.
    match_length: usize,
    /// Latched once the machine visits an accepting state.
    has_accepted: bool,
}

impl RunState {
    const fn fresh() -> Self {
        Self {
            match_length: 0,
            has_accepted: false,
        }
    }
}

/// The winning machine for a token attempt, if any machine accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch<K: TokenKind> {
    /// The winning machine's token kind.
    pub token_kind: K,
    /// Bytes the winner consumed.
    pub match_length: usize,
}

/// Runs all registered machines in parallel over each byte.
#[derive(Debug, Clone)]
pub struct MachineManager<K: TokenKind> {
    machines: Vec<StateMachine<K>>,
    runs: Vec<RunState>,
    /// Densely packed ids of machines that have not yet rejected a byte.
    active: Vec<MachineId>,
}

impl<K: TokenKind> MachineManager<K> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            machines: Vec::new(),
            runs: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Registers a machine and activates it immediately.
    pub fn add_machine(&mut self, machine: StateMachine<K>) -> MachineId {
        let id = self.machines.len();
        self.machines.push(machine);
        self.runs.push(RunState::fresh());
        self.active.push(id);
        id
    }

    /// Returns the number of registered machines.
    #[must_use]
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Returns `true` while at least one machine has not rejected a byte.
    #[must_use]
    pub fn has_active_machines(&self) -> bool {
        !self.active.is_empty()
    }

    /// Forwards `byte` to every active machine.
    ///
    /// A machine that consumes the byte advances its match length and
    /// latches `has_accepted` when it lands in an accepting state; a
    /// machine that rejects is deactivated with an O(1) swap-remove.
    /// Returns `true` iff at least one machine remained active.
    pub fn process_event(&mut self, byte: u8) -> bool {
        let mut index = 0;
        while index < self.active.len() {
            let id = self.active[index];
            if self.machines[id].process_event(byte) {
                self.runs[id].match_length += 1;
                if self.machines[id].is_accepting() {
                    self.runs[id].has_accepted = true;
                }
                index += 1;
            } else {
                self.active.swap_remove(index);
            }
        }
        !self.active.is_empty()
    }

    /// Picks the winner among machines that have accepted.
    ///
    /// Longest match wins; on equal lengths the machine whose token kind
    /// has the lower numeric value wins. Iteration is over registration
    /// order, so selection is deterministic regardless of how the active
    /// list was shuffled by deactivations. Returns `None` when no machine
    /// ever accepted.
    #[must_use]
    pub fn select_best_match(&self) -> Option<BestMatch<K>> {
        let mut best: Option<BestMatch<K>> = None;
        for (machine, run) in self.machines.iter().zip(&self.runs) {
            if !run.has_accepted {
                continue;
            }
            let candidate = BestMatch {
                token_kind: machine.token_kind(),
                match_length: run.match_length,
            };
            let wins = match best {
                None => true,
                Some(current) => {
                    candidate.match_length > current.match_length
                        || (candidate.match_length == current.match_length
                            && candidate.token_kind.priority() < current.token_kind.priority())
                }
            };
            if wins {
                best = Some(candidate);
            }
        }
        best
    }

    /// Resets every machine and re-activates all of them.
    pub fn reset(&mut self) {
        self.active.clear();
        for (id, machine) in self.machines.iter_mut().enumerate() {
            machine.reset();
            self.runs[id] = RunState::fresh();
            self.active.push(id);
        }
    }
}

impl<K: TokenKind> Default for MachineManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Predicate;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    enum Kind {
        Utf8Error = 0,
        True = 10,
        Identifier = 20,
        Equal = 30,
        EqualEqual = 29,
        Invalid = 255,
    }

    impl TokenKind for Kind {
        const UTF8_ERROR: Self = Self::Utf8Error;
        const INVALID_TOKEN: Self = Self::Invalid;

        fn priority(self) -> u8 {
            self as u8
        }

        fn is_whitespace(self) -> bool {
            false
        }

        fn is_newline(self) -> bool {
            false
        }

        fn is_tab(self) -> bool {
            false
        }

        fn is_comment(self) -> bool {
            false
        }
    }

    fn keyword_machine(kind: Kind, word: &[u8]) -> StateMachine<Kind> {
        let mut machine = StateMachine::new(kind);
        let mut state = machine.current_state();
        for (i, &byte) in word.iter().enumerate() {
            let next = machine.add_state(i + 1 == word.len());
            machine.add_transition(state, next, Predicate::Byte(byte));
            state = next;
        }
        machine
    }

    fn identifier_machine() -> StateMachine<Kind> {
        let mut machine = StateMachine::new(Kind::Identifier);
        let start = machine.current_state();
        let body = machine.add_state(true);
        machine.add_transition(start, body, Predicate::identifier_start());
        machine.add_transition(body, body, Predicate::identifier_part());
        machine
    }

    fn feed(manager: &mut MachineManager<Kind>, bytes: &[u8]) {
        for &byte in bytes {
            manager.process_event(byte);
        }
    }

    #[test]
    fn no_machines_means_no_match() {
        let mut manager: MachineManager<Kind> = MachineManager::new();
        assert!(!manager.process_event(b'a'));
        assert_eq!(manager.select_best_match(), None);
    }

    #[test]
    fn longest_match_wins() {
        let mut manager = MachineManager::new();
        manager.add_machine(keyword_machine(Kind::True, b"true"));
        manager.add_machine(identifier_machine());

        feed(&mut manager, b"truer");
        let best = manager.select_best_match().unwrap();
        assert_eq!(best.token_kind, Kind::Identifier);
        assert_eq!(best.match_length, 5);
    }

    #[test]
    fn equal_length_resolves_by_priority() {
        let mut manager = MachineManager::new();
        // Register the identifier machine first to prove registration
        // order does not decide ties.
        manager.add_machine(identifier_machine());
        manager.add_machine(keyword_machine(Kind::True, b"true"));

        feed(&mut manager, b"true");
        let best = manager.select_best_match().unwrap();
        assert_eq!(best.token_kind, Kind::True);
        assert_eq!(best.match_length, 4);
    }

    #[test]
    fn rejected_machines_keep_their_progress() {
        let mut manager = MachineManager::new();
        manager.add_machine(keyword_machine(Kind::Equal, b"="));
        manager.add_machine(keyword_machine(Kind::EqualEqual, b"=="));

        // '=' advances both; 'x' kills both, but the single-byte machine
        // already accepted at length 1.
        feed(&mut manager, b"=x");
        assert!(!manager.has_active_machines());
        let best = manager.select_best_match().unwrap();
        assert_eq!(best.token_kind, Kind::Equal);
        assert_eq!(best.match_length, 1);
    }

    #[test]
    fn process_event_reports_remaining_activity() {
        let mut manager = MachineManager::new();
        manager.add_machine(keyword_machine(Kind::True, b"true"));

        assert!(manager.process_event(b't'));
        assert!(!manager.process_event(b'x'));
        assert!(!manager.has_active_machines());
    }

    #[test]
    fn reset_reactivates_everything() {
        let mut manager = MachineManager::new();
        manager.add_machine(keyword_machine(Kind::True, b"true"));
        manager.add_machine(identifier_machine());

        feed(&mut manager, b"true");
        manager.reset();
        assert!(manager.has_active_machines());
        assert_eq!(manager.select_best_match(), None);

        feed(&mut manager, b"true");
        let best = manager.select_best_match().unwrap();
        assert_eq!(best.token_kind, Kind::True);
    }

    #[test]
    fn machine_that_never_accepts_cannot_win() {
        let mut manager = MachineManager::new();
        manager.add_machine(keyword_machine(Kind::EqualEqual, b"=="));

        feed(&mut manager, b"=");
        assert_eq!(manager.select_best_match(), None);
    }
}
