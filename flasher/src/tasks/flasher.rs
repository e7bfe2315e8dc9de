/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Periodic LED task, one per actuator.
//!
//! Reads its [`ActuatorState`] directly rather than through the buffer.  The
//! period is re-read before every sleep and the flag after it, so a change
//! made by the sampler shows up within one period.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::StopToken;
use crate::actuator::ActuatorState;
use crate::io::OutputActuator;

pub struct LedFlasher<O> {
    state: Arc<ActuatorState>,
    output: O,
}

impl<O: OutputActuator> LedFlasher<O> {
    pub fn new(state: Arc<ActuatorState>, output: O) -> Self {
        Self { state, output }
    }

    /// Task body: sleep one period, toggle if enabled, repeat until stopped.
    pub fn run(mut self, stop: StopToken) {
        let led = self.state.id();
        info!(%led, interval_ms = self.state.interval_ms(), "flasher started");
        let mut toggles = 0u64;
        loop {
            let period = Duration::from_millis(u64::from(self.state.interval_ms()));
            if !stop.sleep(period) {
                break;
            }
            if self.tick() {
                toggles += 1;
            }
        }
        info!(%led, toggles, "flasher stopped");
    }

    /// Toggle the output if the actuator is enabled.  Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.state.enabled() {
            return false;
        }
        self.output.toggle_output(self.state.id());
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
