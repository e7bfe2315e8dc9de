/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured configuration errors.
//!
//! Every variant is fatal: it is reported once at startup and the program
//! exits.  Each carries the offending values so the log line is enough to fix
//! the file.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `buffer.capacity` is zero.
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,

    /// Two tasks share a priority.
    #[error("tasks '{first}' and '{second}' both use priority {priority}")]
    DuplicatePriority {
        priority: u8,
        first: &'static str,
        second: &'static str,
    },

    /// A priority is outside the range tasks may use.
    #[error("task '{task}' priority {priority} is outside 0..={max}")]
    PriorityOutOfRange {
        task: &'static str,
        priority: u8,
        max: u8,
    },

    /// The sampler must preempt every other task.
    #[error("sampler priority {sampler} must be more urgent than '{other}' ({other_priority})")]
    SamplerNotHighest {
        sampler: u8,
        other: &'static str,
        other_priority: u8,
    },

    /// The renderer must yield to every other task.
    #[error("renderer priority {renderer} must be less urgent than '{other}' ({other_priority})")]
    RendererNotLowest {
        renderer: u8,
        other: &'static str,
        other_priority: u8,
    },

    /// A period is zero.
    #[error("'{field}' must be greater than zero")]
    ZeroPeriod { field: &'static str },

    /// A task stack is below the minimum.
    #[error("task '{task}' stack of {stack_kib} KiB is below the {min_kib} KiB minimum")]
    StackTooSmall {
        task: &'static str,
        stack_kib: usize,
        min_kib: usize,
    },

    /// A task stack is above the maximum.
    #[error("task '{task}' stack of {stack_kib} KiB is above the {max_kib} KiB maximum")]
    StackTooLarge {
        task: &'static str,
        stack_kib: usize,
        max_kib: usize,
    },

    /// An initial LED period is outside the adjustable range.
    #[error("'{task}' initial delay {delay_ms}ms is outside {min}..={max}ms")]
    DelayOutOfRange {
        task: &'static str,
        delay_ms: u16,
        min: u16,
        max: u16,
    },

    /// The display cannot hold the renderer's layout.
    #[error("display {cols}x{rows} is smaller than the required {min_cols}x{min_rows}")]
    DisplayTooSmall {
        cols: u8,
        rows: u8,
        min_cols: u8,
        min_rows: u8,
    },
}
