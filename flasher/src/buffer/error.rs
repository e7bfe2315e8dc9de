/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::time::Duration;

use thiserror::Error;

/// Errors produced by [`SafeBuffer`](super::SafeBuffer).
///
/// The steady-state `put`/`get` path never fails: a full or empty buffer
/// blocks.  These variants only come from construction and from the
/// optional timed variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A buffer with no slots could never accept a message.
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,

    /// `put_timeout` / `get_timeout` gave up waiting for a slot.
    #[error("timed out after {0:?} waiting for a buffer slot")]
    Timeout(Duration),
}
