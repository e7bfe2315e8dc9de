/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Bounded, blocking, FIFO message buffer shared between tasks.
//!
//! [`SafeBuffer`] owns a private ring store and three synchronisation
//! primitives:
//!
//! | Primitive | Initial value | Meaning |
//! |---|---|---|
//! | `free_slots` semaphore | capacity | slots a producer may fill |
//! | `full_slots` semaphore | 0 | messages a consumer may take |
//! | `store` mutex | n/a | guards the ring cursors during one copy |
//!
//! # Protocol
//! ```text
//! put:  free_slots.acquire → lock → write → unlock → full_slots.release
//! get:  full_slots.acquire → lock → read  → unlock → free_slots.release
//! ```
//! The mutex is never held while waiting on a semaphore.  Taking the lock
//! first would let a producer sleep on a full buffer while holding the lock
//! the consumer needs to empty it.
//!
//! Delivery order is the order in which `put` calls completed their locked
//! copy.  A full buffer blocks producers; nothing is dropped or overwritten.

mod error;
mod ring;
mod semaphore;

pub use error::BufferError;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, trace};

use ring::RingStore;
use semaphore::Semaphore;

/// Capacity used by the original lab board.
pub const DEFAULT_CAPACITY: usize = 6;

// ── SafeBuffer ────────────────────────────────────────────────────────────────

/// Thread-safe bounded buffer of `Copy` items.
///
/// Share it between tasks with an `Arc`.
pub struct SafeBuffer<T> {
    free_slots: Semaphore,
    full_slots: Semaphore,
    store: Mutex<RingStore<T>>,
}

impl<T: Copy + Default> SafeBuffer<T> {
    /// Create a buffer with `capacity` slots.
    ///
    /// # Errors
    /// [`BufferError::ZeroCapacity`] if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        debug!(capacity, "SafeBuffer created");
        Ok(Self {
            free_slots: Semaphore::new(capacity),
            full_slots: Semaphore::new(0),
            store: Mutex::new(RingStore::new(capacity)),
        })
    }

    fn lock_store(&self) -> MutexGuard<'_, RingStore<T>> {
        // A panic while holding the lock can only happen mid-copy of a `Copy`
        // value, which leaves the cursors consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `item`, blocking while the buffer is full.
    pub fn put(&self, item: T) {
        self.free_slots.acquire();
        self.commit_put(item);
    }

    /// Remove the oldest item, blocking while the buffer is empty.
    pub fn get(&self) -> T {
        self.full_slots.acquire();
        self.commit_get()
    }

    /// Like [`put`](Self::put) but gives up after `timeout`.
    ///
    /// # Errors
    /// [`BufferError::Timeout`] if no slot freed up in time.  The item was
    /// not stored.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), BufferError> {
        if !self.free_slots.acquire_timeout(timeout) {
            return Err(BufferError::Timeout(timeout));
        }
        self.commit_put(item);
        Ok(())
    }

    /// Like [`get`](Self::get) but gives up after `timeout`.
    ///
    /// # Errors
    /// [`BufferError::Timeout`] if nothing arrived in time.
    pub fn get_timeout(&self, timeout: Duration) -> Result<T, BufferError> {
        if !self.full_slots.acquire_timeout(timeout) {
            return Err(BufferError::Timeout(timeout));
        }
        Ok(self.commit_get())
    }

    // Caller holds one `free_slots` unit.
    fn commit_put(&self, item: T) {
        {
            let mut store = self.lock_store();
            store.write(item);
            trace!(pending = store.len(), "put");
        }
        self.full_slots.release();
    }

    // Caller holds one `full_slots` unit.
    fn commit_get(&self) -> T {
        let item = {
            let mut store = self.lock_store();
            let item = store.read();
            trace!(pending = store.len(), "get");
            item
        };
        self.free_slots.release();
        item
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.lock_store().capacity()
    }

    /// Messages written but not yet read.
    pub fn len(&self) -> usize {
        self.lock_store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, SourceId};
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(50);
    const LONG: Duration = Duration::from_secs(5);

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn zero_capacity_is_rejected() {
        let err = SafeBuffer::<Message>::new(0).err();
        assert_eq!(err, Some(BufferError::ZeroCapacity));
    }

    #[test]
    fn new_buffer_is_empty_with_requested_capacity() {
        let buf = SafeBuffer::<Message>::new(DEFAULT_CAPACITY).unwrap();
        assert_eq!(buf.capacity(), 6);
        assert!(buf.is_empty());
    }

    // ── FIFO ──────────────────────────────────────────────────────────────────

    #[test]
    fn link_then_connect_scenario() {
        let buf = SafeBuffer::new(6).unwrap();
        let first = Message::new(SourceId::Link, true, 500);
        let second = Message::new(SourceId::Connect, false, 300);

        buf.put(first);
        buf.put(second);

        assert_eq!(buf.get(), first);
        assert_eq!(buf.get(), second);
        assert!(buf.is_empty());
    }

    #[test]
    fn fills_to_capacity_and_drains_in_order() {
        let buf = SafeBuffer::new(6).unwrap();
        for i in 0..6u16 {
            buf.put(Message::new(SourceId::Link, i % 2 == 0, 100 + i));
        }
        assert_eq!(buf.len(), 6);
        for i in 0..6u16 {
            let msg = buf.get();
            assert_eq!(msg.interval_ms, 100 + i);
            assert_eq!(msg.active, i % 2 == 0);
        }
    }

    // ── Timeouts ──────────────────────────────────────────────────────────────

    #[test]
    fn get_timeout_on_empty_buffer_times_out() {
        let buf = SafeBuffer::<u32>::new(2).unwrap();
        assert_eq!(buf.get_timeout(SHORT), Err(BufferError::Timeout(SHORT)));
    }

    #[test]
    fn put_timeout_on_full_buffer_times_out_without_storing() {
        let buf = SafeBuffer::<u32>::new(1).unwrap();
        buf.put(7);
        assert_eq!(buf.put_timeout(8, SHORT), Err(BufferError::Timeout(SHORT)));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.get(), 7);
        assert!(buf.is_empty());
    }

    // ── Blocking ──────────────────────────────────────────────────────────────

    #[test]
    fn get_on_empty_blocks_until_put() {
        let buf = Arc::new(SafeBuffer::<u32>::new(2).unwrap());
        let (tx, rx) = mpsc::channel();

        let consumer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || tx.send(buf.get()).unwrap())
        };

        assert!(
            rx.recv_timeout(SHORT).is_err(),
            "get must not return while the buffer is empty"
        );
        buf.put(42);
        assert_eq!(rx.recv_timeout(LONG).unwrap(), 42);
        consumer.join().unwrap();
    }

    #[test]
    fn put_on_full_blocks_until_get() {
        let buf = Arc::new(SafeBuffer::<u32>::new(2).unwrap());
        buf.put(1);
        buf.put(2);
        let (tx, rx) = mpsc::channel();

        let producer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                buf.put(3);
                tx.send(()).unwrap();
            })
        };

        assert!(
            rx.recv_timeout(SHORT).is_err(),
            "put must not return while the buffer is full"
        );
        assert_eq!(buf.len(), 2);

        assert_eq!(buf.get(), 1);
        rx.recv_timeout(LONG).unwrap();
        producer.join().unwrap();

        assert_eq!(buf.get(), 2);
        assert_eq!(buf.get(), 3);
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    #[test]
    fn full_empty_alternation_does_not_deadlock() {
        const ROUNDS: u32 = 1_000;
        let buf = Arc::new(SafeBuffer::<u32>::new(6).unwrap());

        let producer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    for i in 0..6 {
                        buf.put(round * 6 + i);
                    }
                }
            })
        };
        let consumer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                let mut expected = 0;
                for _ in 0..ROUNDS {
                    for _ in 0..6 {
                        assert_eq!(buf.get(), expected);
                        expected += 1;
                    }
                }
            })
        };

        producer.join().unwrap();
        consumer.join().unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn occupancy_never_exceeds_capacity() {
        let buf = Arc::new(SafeBuffer::<u32>::new(3).unwrap());
        let producer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                for i in 0..2_000 {
                    buf.put(i);
                }
            })
        };

        let mut max_seen = 0;
        for _ in 0..2_000 {
            max_seen = max_seen.max(buf.len());
            buf.get();
        }
        producer.join().unwrap();
        assert!(max_seen <= 3, "saw {max_seen} pending messages");
    }

    #[test]
    fn every_message_from_many_producers_is_seen_exactly_once() {
        const PRODUCERS: u32 = 4;
        const PER_PRODUCER: u32 = 500;
        let buf = Arc::new(SafeBuffer::<u32>::new(6).unwrap());

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let buf = Arc::clone(&buf);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        buf.put(p * PER_PRODUCER + i);
                    }
                })
            })
            .collect();

        let consumers: Vec<_> = (0..2)
            .map(|_| {
                let buf = Arc::clone(&buf);
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Ok(v) = buf.get_timeout(Duration::from_millis(500)) {
                        got.push(v);
                    }
                    got
                })
            })
            .collect();

        for p in producers {
            p.join().unwrap();
        }
        let mut seen = HashSet::new();
        let mut total = 0;
        for c in consumers {
            for v in c.join().unwrap() {
                assert!(seen.insert(v), "message {v} delivered twice");
                total += 1;
            }
        }
        assert_eq!(total, PRODUCERS * PER_PRODUCER);
    }

    #[test]
    fn single_producer_order_survives_concurrent_consumer() {
        let buf = Arc::new(SafeBuffer::<u32>::new(2).unwrap());
        let producer = {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                for i in 0..500 {
                    buf.put(i);
                }
            })
        };
        let received: Vec<u32> = (0..500).map(|_| buf.get()).collect();
        producer.join().unwrap();
        assert_eq!(received, (0..500).collect::<Vec<_>>());
    }
}
