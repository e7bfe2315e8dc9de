/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Input-sampling task: the highest-priority producer.
//!
//! Every period the sampler latches the inputs, detects release edges and
//! turns each edge into an update of the shared actuator state plus one
//! [`Message`] per affected actuator.
//!
//! | Edge | Effect |
//! |---|---|
//! | `Button1` | enable both LEDs |
//! | `Button2` | disable both LEDs |
//! | `JoyUp` / `JoyDown` | link period −/+ one step (only while enabled) |
//! | `JoyRight` / `JoyLeft` | connect period −/+ one step (only while enabled) |
//!
//! The only places the task can suspend are the period sleep and
//! [`SafeBuffer::put`] when the buffer is full.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use super::StopToken;
use crate::actuator::ActuatorState;
use crate::buffer::SafeBuffer;
use crate::io::{Button, InputSource, RawInputs};
use crate::message::Message;

// ── EdgeDetector ──────────────────────────────────────────────────────────────

/// Reports a button once, on the sample where it goes from held to released.
///
/// Holding a button across many samples therefore produces exactly one event.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    previous: RawInputs,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest sample; returns the buttons released since the last one.
    pub fn update(&mut self, current: RawInputs) -> Vec<Button> {
        let released = Button::ALL
            .into_iter()
            .filter(|&b| self.previous.contains(b) && !current.contains(b))
            .collect();
        self.previous = current;
        released
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Step {
    Shorter,
    Longer,
}

pub struct Sampler<I> {
    input: I,
    buffer: Arc<SafeBuffer<Message>>,
    link: Arc<ActuatorState>,
    connect: Arc<ActuatorState>,
    period: Duration,
    edges: EdgeDetector,
}

impl<I: InputSource> Sampler<I> {
    pub fn new(
        input: I,
        buffer: Arc<SafeBuffer<Message>>,
        link: Arc<ActuatorState>,
        connect: Arc<ActuatorState>,
        period: Duration,
    ) -> Self {
        Self {
            input,
            buffer,
            link,
            connect,
            period,
            edges: EdgeDetector::new(),
        }
    }

    /// Task body: poll, then sleep one period, until stopped.
    pub fn run(mut self, stop: StopToken) {
        info!(period = ?self.period, "sampler started");
        let mut emitted = 0usize;
        while !stop.is_stopped() {
            emitted += self.poll();
            if !stop.sleep(self.period) {
                break;
            }
        }
        info!(emitted, "sampler stopped");
    }

    /// One sampling tick.  Returns the number of messages put in the buffer.
    pub fn poll(&mut self) -> usize {
        let raw = self.input.sample_inputs();
        if !raw.is_empty() {
            trace!(bits = raw.bits(), "inputs held");
        }

        let held: RawInputs = Button::ALL
            .into_iter()
            .filter(|&b| self.input.currently_active(b))
            .collect();

        self.edges
            .update(held)
            .into_iter()
            .map(|button| self.handle(button))
            .sum()
    }

    fn handle(&self, button: Button) -> usize {
        debug!(?button, "button released");
        match button {
            Button::Button1 => self.set_all_enabled(true),
            Button::Button2 => self.set_all_enabled(false),
            Button::JoyUp => self.adjust(&self.link, Step::Shorter),
            Button::JoyDown => self.adjust(&self.link, Step::Longer),
            Button::JoyRight => self.adjust(&self.connect, Step::Shorter),
            Button::JoyLeft => self.adjust(&self.connect, Step::Longer),
        }
    }

    fn set_all_enabled(&self, enabled: bool) -> usize {
        for state in [&self.link, &self.connect] {
            state.set_enabled(enabled);
            self.emit(state);
        }
        2
    }

    fn adjust(&self, state: &ActuatorState, step: Step) -> usize {
        if !state.enabled() {
            debug!(led = %state.id(), "period change ignored while not flashing");
            return 0;
        }
        let interval_ms = match step {
            Step::Shorter => state.decrease_interval(),
            Step::Longer => state.increase_interval(),
        };
        debug!(led = %state.id(), interval_ms, "period changed");
        self.emit(state);
        1
    }

    fn emit(&self, state: &ActuatorState) {
        let msg = state.snapshot();
        debug!(%msg, "put");
        self.buffer.put(msg);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
