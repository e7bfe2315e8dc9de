/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shared per-actuator state: the `enabled` flag and flash period.
//!
//! One [`ActuatorState`] exists per LED and lives in an `Arc` for the whole
//! run.  The sampler task is the only writer; the LED's flasher task reads it
//! directly, outside the message buffer.
//!
//! # Relaxed consistency
//! Both fields are independent relaxed atomics and no ordering is promised
//! between them, or between them and messages in the buffer.  A flasher that
//! reads a stale value toggles one period late at worst; neither field can be
//! torn.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::delay::{self, ADJUST_STEP_MS};
use crate::message::{Message, SourceId};

#[derive(Debug)]
pub struct ActuatorState {
    id: SourceId,
    enabled: AtomicBool,
    interval_ms: AtomicU16,
}

impl ActuatorState {
    pub fn new(id: SourceId, enabled: bool, interval_ms: u16) -> Self {
        Self {
            id,
            enabled: AtomicBool::new(enabled),
            interval_ms: AtomicU16::new(interval_ms),
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn interval_ms(&self) -> u16 {
        self.interval_ms.load(Ordering::Relaxed)
    }

    /// Lengthen the period by one step, clamped.  Returns the new period.
    ///
    /// Load-then-store is fine here: the sampler is the only writer.
    pub fn increase_interval(&self) -> u16 {
        let next = delay::inc_delay(self.interval_ms(), ADJUST_STEP_MS);
        self.interval_ms.store(next, Ordering::Relaxed);
        next
    }

    /// Shorten the period by one step, clamped.  Returns the new period.
    pub fn decrease_interval(&self) -> u16 {
        let next = delay::dec_delay(self.interval_ms(), ADJUST_STEP_MS);
        self.interval_ms.store(next, Ordering::Relaxed);
        next
    }

    /// Copy the current state into a fresh [`Message`].
    pub fn snapshot(&self) -> Message {
        Message::new(self.id, self.enabled(), self.interval_ms())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
