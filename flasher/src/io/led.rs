/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::trace;

use super::OutputActuator;
use crate::message::SourceId;

/// Simulated LED bank.
///
/// Keeps each LED's level and a toggle counter that can be handed out with
/// [`toggle_counter`](Self::toggle_counter) and read from another thread.
#[derive(Debug, Default)]
pub struct SimulatedLed {
    lit: [bool; SourceId::ALL.len()],
    toggles: Arc<AtomicU32>,
}

impl SimulatedLed {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_lit(&self, id: SourceId) -> bool {
        self.lit[id as usize]
    }

    /// Shared handle to the number of toggles so far.
    pub fn toggle_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.toggles)
    }
}

impl OutputActuator for SimulatedLed {
    fn toggle_output(&mut self, id: SourceId) {
        let lit = &mut self.lit[id as usize];
        *lit = !*lit;
        let count = self.toggles.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(led = %id, lit = *lit, count, "toggle");
    }
}
