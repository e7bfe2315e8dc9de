/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Buttons, raw input snapshots and a scripted input source.

use serde::Deserialize;

use super::InputSource;

// ── Button ────────────────────────────────────────────────────────────────────

/// The two push buttons and the four joystick directions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Starts flashing.
    Button1,
    /// Stops flashing.
    Button2,
    JoyUp,
    JoyDown,
    JoyLeft,
    JoyRight,
}

impl Button {
    /// Every input, in the order the sampler checks them.
    pub const ALL: [Button; 6] = [
        Button::Button1,
        Button::Button2,
        Button::JoyUp,
        Button::JoyDown,
        Button::JoyLeft,
        Button::JoyRight,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

// ── RawInputs ─────────────────────────────────────────────────────────────────

/// Bitmask of the inputs held at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawInputs(u8);

impl RawInputs {
    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl FromIterator<Button> for RawInputs {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut raw = RawInputs::default();
        for b in iter {
            raw.insert(b);
        }
        raw
    }
}

// ── ScriptedInput ─────────────────────────────────────────────────────────────

/// One scripted press: `button` is held from `at_ms` for `hold_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptEntry {
    pub at_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    pub button: Button,
}

/// Long enough to span a few 10 ms samples.
fn default_hold_ms() -> u64 {
    30
}

/// Plays back a fixed timeline of button presses.
///
/// Time is derived from the number of samples taken, not the wall clock, so a
/// given script produces the same edges on every run.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: Vec<ScriptEntry>,
    sample_period_ms: u64,
    samples: u64,
    latched: RawInputs,
}

impl ScriptedInput {
    /// `sample_period_ms` must match the sampler's polling period.
    pub fn new(script: Vec<ScriptEntry>, sample_period_ms: u64) -> Self {
        Self {
            script,
            sample_period_ms,
            samples: 0,
            latched: RawInputs::default(),
        }
    }

    /// Script time of the most recent sample.
    #[cfg(test)]
    fn now_ms(&self) -> u64 {
        self.samples.saturating_sub(1) * self.sample_period_ms
    }

    /// `true` once every scripted press has been released.
    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.samples > 0
            && self
                .script
                .iter()
                .all(|e| e.at_ms.saturating_add(e.hold_ms) <= self.now_ms())
    }
}

impl InputSource for ScriptedInput {
    fn sample_inputs(&mut self) -> RawInputs {
        let now = self.samples * self.sample_period_ms;
        self.samples += 1;
        self.latched = self
            .script
            .iter()
            .filter(|e| now >= e.at_ms && now < e.at_ms.saturating_add(e.hold_ms))
            .map(|e| e.button)
            .collect();
        self.latched
    }

    fn currently_active(&self, button: Button) -> bool {
        self.latched.contains(button)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
