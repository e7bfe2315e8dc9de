/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Collaborator interfaces the tasks drive, plus host-side simulations.
//!
//! | Trait | Used by | Simulation |
//! |---|---|---|
//! | [`InputSource`] | sampler | [`ScriptedInput`] |
//! | [`OutputActuator`] | flashers | [`SimulatedLed`] |
//! | [`DisplaySink`] | renderer | [`TextLcd`], [`SharedDisplay`] |
//!
//! Every trait is `Send` because each implementation is moved into the task
//! thread that owns it.

pub mod display;
pub mod input;
pub mod led;

pub use display::{SharedDisplay, TextLcd};
pub use input::{Button, RawInputs, ScriptEntry, ScriptedInput};
pub use led::SimulatedLed;

use std::fmt;

use crate::message::SourceId;

/// Polled input hardware (buttons and joystick).
pub trait InputSource: Send {
    /// Latch the state of every input and return it.
    fn sample_inputs(&mut self) -> RawInputs;

    /// Whether `button` was held at the most recent [`sample_inputs`] call.
    ///
    /// [`sample_inputs`]: InputSource::sample_inputs
    fn currently_active(&self, button: Button) -> bool;
}

/// A toggled output such as an LED.  Must be fast and non-blocking.
pub trait OutputActuator: Send {
    fn toggle_output(&mut self, id: SourceId);
}

/// A character display addressed by column and row.
pub trait DisplaySink: Send {
    fn set_cursor(&mut self, col: u8, row: u8);

    fn write_text(&mut self, args: fmt::Arguments<'_>);

    /// Position the cursor and write in one step.
    ///
    /// Implementations shared between writers override this so the pair is
    /// atomic.
    fn write_at(&mut self, col: u8, row: u8, args: fmt::Arguments<'_>) {
        self.set_cursor(col, row);
        self.write_text(args);
    }
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn sample_inputs(&mut self) -> RawInputs {
        (**self).sample_inputs()
    }

    fn currently_active(&self, button: Button) -> bool {
        (**self).currently_active(button)
    }
}

impl<O: OutputActuator + ?Sized> OutputActuator for Box<O> {
    fn toggle_output(&mut self, id: SourceId) {
        (**self).toggle_output(id);
    }
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row);
    }

    fn write_text(&mut self, args: fmt::Arguments<'_>) {
        (**self).write_text(args);
    }

    fn write_at(&mut self, col: u8, row: u8, args: fmt::Arguments<'_>) {
        (**self).write_at(col, row, args);
    }
}
