/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Counting semaphore built from a `Mutex<usize>` and a `Condvar`.
//!
//! `std` has no counting semaphore, so this stands in for the RTOS one.
//! Poisoning is ignored: the guarded value is a plain counter that is never
//! left half-updated.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug)]
pub struct Semaphore {
    count: Mutex<usize>,
    cond: Condvar,
}

impl Semaphore {
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
            cond: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take one unit, blocking while the count is zero.
    pub fn acquire(&self) {
        let mut count = self
            .cond
            .wait_while(self.lock(), |c| *c == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
    }

    /// Take one unit, giving up after `timeout`.
    ///
    /// Returns `false` on timeout, in which case the count is untouched.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        let (mut count, result) = self
            .cond
            .wait_timeout_while(self.lock(), timeout, |c| *c == 0)
            .unwrap_or_else(PoisonError::into_inner);
        if result.timed_out() && *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Give one unit back and wake at most one waiter.
    pub fn release(&self) {
        *self.lock() += 1;
        self.cond.notify_one();
    }

    /// Current count.  Only a snapshot; it may change immediately.
    #[cfg(test)]
    pub fn available(&self) -> usize {
        *self.lock()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn acquire_decrements_and_release_increments() {
        let sem = Semaphore::new(2);
        sem.acquire();
        assert_eq!(sem.available(), 1);
        sem.acquire();
        assert_eq!(sem.available(), 0);
        sem.release();
        assert_eq!(sem.available(), 1);
    }

    #[test]
    fn acquire_timeout_on_zero_count_times_out() {
        let sem = Semaphore::new(0);
        assert!(!sem.acquire_timeout(Duration::from_millis(20)));
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn acquire_timeout_succeeds_when_unit_available() {
        let sem = Semaphore::new(1);
        assert!(sem.acquire_timeout(Duration::from_millis(20)));
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn blocked_acquire_is_woken_by_release() {
        let sem = Arc::new(Semaphore::new(0));
        let (tx, rx) = mpsc::channel();

        let waiter = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || {
                sem.acquire();
                tx.send(()).unwrap();
            })
        };

        // The waiter must still be parked.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        sem.release();
        rx.recv_timeout(Duration::from_secs(5))
            .expect("release must wake the waiter");
        waiter.join().unwrap();
        assert_eq!(sem.available(), 0);
    }
}
