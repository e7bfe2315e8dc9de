/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The message record passed from the sampler task to the renderer task.
//!
//! ```text
//! sampler  ──put(Message)──►  SafeBuffer  ──get()──►  renderer
//!    ↑ builds a fresh snapshot                 ↑ draws it on the LCD
//! ```
//!
//! # Ownership model
//! `Message` is `Copy`.  The producer copies it into a buffer slot and the
//! consumer copies it back out, so no message is ever shared by reference
//! between tasks.

use std::fmt;

// ── SourceId ──────────────────────────────────────────────────────────────────

/// Identifies the actuator (LED) a message refers to.
///
/// `#[repr(u8)]` keeps the discriminant at one byte so [`Message`] stays at
/// its fixed 4-byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SourceId {
    /// The USB "link" LED.
    #[default]
    Link = 0,
    /// The USB "connect" LED.
    Connect = 1,
}

impl SourceId {
    /// Both actuators, in display order.
    pub const ALL: [SourceId; 2] = [SourceId::Link, SourceId::Connect];

    /// Short label used on the display, always four characters wide.
    pub fn label(self) -> &'static str {
        match self {
            SourceId::Link => "LINK",
            SourceId::Connect => "CNCT",
        }
    }

    /// Lower-case name used in logs and configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            SourceId::Link => "link",
            SourceId::Connect => "connect",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Fixed-shape record describing one actuator's state.
///
/// Layout is 1-byte id, 1-byte flag, 2-byte interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Message {
    /// Which actuator this message concerns.
    pub source: SourceId,

    /// Whether the actuator is currently flashing.
    pub active: bool,

    /// Current flash period in milliseconds.
    pub interval_ms: u16,
}

const _: () = assert!(std::mem::size_of::<Message>() == 4);

impl Message {
    pub fn new(source: SourceId, active: bool, interval_ms: u16) -> Self {
        Self {
            source,
            active,
            interval_ms,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} active={} interval={}ms",
            self.source, self.active, self.interval_ms
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
