// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Bounded byte FIFO between a producer and a consumer thread.
//!
//! The ring buffer is the only concurrency boundary in the framework: a
//! feeder thread pushes source bytes while the lexer drains them. Blocking
//! [`RingBuffer::push`] and [`RingBuffer::pop`] coordinate through a mutex
//! and two condition variables; the `try_*` variants never block, which is
//! what the lexer uses to peek ahead without committing to a token.
//!
//! # Close semantics
//!
//! [`RingBuffer::close`] is idempotent and wakes every waiter. A closed
//! buffer rejects further pushes, but consumers can still drain whatever
//! bytes remain; only once the buffer is empty *and* closed does `pop`
//! report [`PopError::EmptyAndClosed`].
//!
//! # Example
//!
//! ```
//! use kaubo_core::ring_buffer::RingBuffer;
//!
//! let ring = RingBuffer::new(8);
//! ring.push(b'a').unwrap();
//! ring.close();
//! assert_eq!(ring.pop().unwrap(), b'a');
//! assert!(ring.pop().is_err());
//! ```

use std::sync::{Condvar, Mutex};

use thiserror::Error;

/// Error returned by [`RingBuffer::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PushError {
    /// The buffer was closed; no further bytes are accepted.
    #[error("cannot push to a closed ring buffer")]
    Closed,
}

/// Error returned by [`RingBuffer::pop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PopError {
    /// The buffer is empty and closed; no byte will ever arrive.
    #[error("cannot pop from an empty and closed ring buffer")]
    EmptyAndClosed,
}

/// Fixed-capacity circular byte queue, safe to share across threads.
///
/// Intended for a single producer and a single consumer, but every
/// operation serializes under one mutex so additional threads observe
/// consistent state.
#[derive(Debug)]
pub struct RingBuffer {
    inner: Mutex<Inner>,
    not_full: Condvar,
    not_empty: Condvar,
}

#[derive(Debug)]
struct Inner {
    buffer: Vec<u8>,
    head: usize,
    tail: usize,
    size: usize,
    closed: bool,
}

impl Inner {
    fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    fn push_byte(&mut self, byte: u8) {
        let tail = self.tail;
        self.buffer[tail] = byte;
        self.tail = (tail + 1) % self.capacity();
        self.size += 1;
    }

    fn pop_byte(&mut self) -> u8 {
        let byte = self.buffer[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.size -= 1;
        byte
    }
}

impl RingBuffer {
    /// Creates a buffer holding at most `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity ring can make no
    /// progress.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            inner: Mutex::new(Inner {
                buffer: vec![0; capacity],
                head: 0,
                tail: 0,
                size: 0,
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Appends a byte, blocking while the buffer is full and open.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Closed`] once the buffer has been closed.
    pub fn push(&self, byte: u8) -> Result<(), PushError> {
        let mut inner = self.lock();
        while inner.is_full() && !inner.closed {
            inner = self.wait_not_full(inner);
        }
        if inner.closed {
            return Err(PushError::Closed);
        }
        inner.push_byte(byte);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes the oldest byte, blocking while the buffer is empty and open.
    ///
    /// # Errors
    ///
    /// Returns [`PopError::EmptyAndClosed`] when the buffer is drained and
    /// no producer can refill it.
    pub fn pop(&self) -> Result<u8, PopError> {
        let mut inner = self.lock();
        while inner.size == 0 && !inner.closed {
            inner = self.wait_not_empty(inner);
        }
        if inner.size == 0 && inner.closed {
            return Err(PopError::EmptyAndClosed);
        }
        let byte = inner.pop_byte();
        drop(inner);
        self.not_full.notify_one();
        Ok(byte)
    }

    /// Removes the oldest byte without blocking.
    ///
    /// Returns `None` when the buffer is currently empty.
    pub fn try_pop(&self) -> Option<u8> {
        let mut inner = self.lock();
        if inner.size == 0 {
            return None;
        }
        let byte = inner.pop_byte();
        drop(inner);
        self.not_full.notify_one();
        Some(byte)
    }

    /// Reads the oldest byte without consuming it.
    pub fn try_peek(&self) -> Option<u8> {
        self.try_peek_at(0)
    }

    /// Reads the byte `offset` positions behind the oldest one, without
    /// consuming anything.
    ///
    /// Returns `None` when fewer than `offset + 1` bytes are buffered.
    pub fn try_peek_at(&self, offset: usize) -> Option<u8> {
        let inner = self.lock();
        if offset >= inner.size {
            return None;
        }
        let index = (inner.head + offset) % inner.capacity();
        Some(inner.buffer[index])
    }

    /// Marks the buffer closed and wakes every blocked thread.
    ///
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        drop(inner);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Returns `true` once [`RingBuffer::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns `true` when no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().size == 0
    }

    /// Returns the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.lock().size
    }

    /// Returns `true` when at least `n` bytes are buffered.
    pub fn is_size_at_least(&self, n: usize) -> bool {
        self.lock().size >= n
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic elsewhere already ended the run;
        // the buffer state itself is a plain byte queue and stays usable.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn wait_not_full<'a>(
        &'a self,
        guard: std::sync::MutexGuard<'a, Inner>,
    ) -> std::sync::MutexGuard<'a, Inner> {
        self.not_full
            .wait(guard)
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn wait_not_empty<'a>(
        &'a self,
        guard: std::sync::MutexGuard<'a, Inner>,
    ) -> std::sync::MutexGuard<'a, Inner> {
        self.not_empty
            .wait(guard)
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
