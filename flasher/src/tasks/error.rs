/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Errors raised while creating or stopping tasks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutiveError {
    /// Two tasks asked for the same static priority.
    #[error("task '{task}' requests priority {priority}, already taken by '{holder}'")]
    PriorityInUse {
        task: String,
        priority: u8,
        holder: String,
    },

    /// The requested stack size does not fit in a `usize` byte count.
    #[error("task '{task}' stack of {stack_kib} KiB is too large")]
    StackTooLarge { task: String, stack_kib: usize },

    /// The OS refused to create the thread backing a task.
    #[error("failed to spawn task '{task}'")]
    Spawn {
        task: String,
        #[source]
        source: std::io::Error,
    },

    /// A task body panicked; reported when the task is joined.
    #[error("task '{task}' panicked")]
    TaskPanicked { task: String },
}
