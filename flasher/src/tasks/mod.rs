/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task creation, stopping and the periodic task bodies.
//!
//! Each task role runs on its own named thread.  [`Executive`] plays the part
//! of the RTOS task API: it records a static priority per task (lower number
//! means more urgent, and no two tasks share one), sizes the stack, and hands
//! every task a [`StopToken`].
//!
//! Priorities are not pushed down to the host scheduler.  They decide
//! shutdown order instead: [`Executive::shutdown`] stops and joins tasks from
//! most to least urgent, so producers are gone before the renderer is asked
//! to drain the buffer and exit.
//!
//! ```text
//! prio  task       blocks on
//! ────  ─────────  ──────────────────────────
//!   4   sampler    tick sleep, SafeBuffer::put
//!   6   link       interval sleep
//!   8   connect    interval sleep
//!  10   renderer   SafeBuffer::get
//! ```

pub mod error;
pub mod flasher;
pub mod renderer;
pub mod sampler;

pub use error::ExecutiveError;
pub use flasher::LedFlasher;
pub use renderer::Renderer;
pub use sampler::{EdgeDetector, Sampler};

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

// ── StopToken ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct StopFlag {
    stopped: Mutex<bool>,
    cond: Condvar,
}

/// Cloneable stop request for one task.
///
/// Doubles as the task's sleep primitive so a stop request cuts a long
/// interval sleep short.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<StopFlag>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.flag.stopped.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stop(&self) {
        *self.lock() = true;
        self.flag.cond.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.lock()
    }

    /// Sleep for `duration` unless a stop is requested first.
    ///
    /// Returns `true` if the whole duration elapsed and the task should keep
    /// running.
    pub fn sleep(&self, duration: Duration) -> bool {
        let (stopped, _) = self
            .flag
            .cond
            .wait_timeout_while(self.lock(), duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        !*stopped
    }
}

// ── TaskSpec ──────────────────────────────────────────────────────────────────

/// Static parameters of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: String,
    /// Lower value = more urgent.
    pub priority: u8,
    pub stack_kib: usize,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, priority: u8, stack_kib: usize) -> Self {
        Self {
            name: name.into(),
            priority,
            stack_kib,
        }
    }
}

// ── Executive ─────────────────────────────────────────────────────────────────

struct TaskHandle {
    spec: TaskSpec,
    stop: StopToken,
    join: JoinHandle<()>,
}

/// Owns every running task.
#[derive(Default)]
pub struct Executive {
    tasks: Vec<TaskHandle>,
}

impl Executive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task running `body` on its own thread.
    ///
    /// # Errors
    /// * [`ExecutiveError::PriorityInUse`] if another task already has
    ///   `spec.priority`.
    /// * [`ExecutiveError::StackTooLarge`] if `spec.stack_kib` overflows a
    ///   byte count.
    /// * [`ExecutiveError::Spawn`] if the thread can't be created.
    pub fn spawn<F>(&mut self, spec: TaskSpec, body: F) -> Result<(), ExecutiveError>
    where
        F: FnOnce(StopToken) + Send + 'static,
    {
        if let Some(holder) = self.tasks.iter().find(|t| t.spec.priority == spec.priority) {
            return Err(ExecutiveError::PriorityInUse {
                task: spec.name,
                priority: spec.priority,
                holder: holder.spec.name.clone(),
            });
        }

        let stack_bytes = spec
            .stack_kib
            .checked_mul(1024)
            .ok_or_else(|| ExecutiveError::StackTooLarge {
                task: spec.name.clone(),
                stack_kib: spec.stack_kib,
            })?;

        let stop = StopToken::new();
        let task_stop = stop.clone();
        let name = spec.name.clone();

        let join = thread::Builder::new()
            .name(spec.name.clone())
            .stack_size(stack_bytes)
            .spawn(move || {
                debug!(task = %name, "task running");
                body(task_stop);
                debug!(task = %name, "task returned");
            })
            .map_err(|source| ExecutiveError::Spawn {
                task: spec.name.clone(),
                source,
            })?;

        info!(
            task = %spec.name,
            priority = spec.priority,
            stack_kib = spec.stack_kib,
            "task created"
        );
        self.tasks.push(TaskHandle { spec, stop, join });
        Ok(())
    }

    /// Specs of the running tasks, most urgent first.
    pub fn specs(&self) -> Vec<&TaskSpec> {
        let mut specs: Vec<_> = self.tasks.iter().map(|t| &t.spec).collect();
        specs.sort_by_key(|s| s.priority);
        specs
    }

    /// Stop and join every task, most urgent first.
    ///
    /// All tasks are joined even if one of them panicked.
    ///
    /// # Errors
    /// [`ExecutiveError::TaskPanicked`] for the first task found to have
    /// panicked.
    pub fn shutdown(self) -> Result<(), ExecutiveError> {
        self.shutdown_with(|_| {})
    }

    /// Like [`shutdown`](Self::shutdown), calling `on_stop` right after each
    /// task's stop request and before joining it.
    ///
    /// `on_stop` is how a task blocked somewhere other than its
    /// [`StopToken`] gets woken up.
    pub fn shutdown_with<F>(mut self, mut on_stop: F) -> Result<(), ExecutiveError>
    where
        F: FnMut(&TaskSpec),
    {
        self.tasks.sort_by_key(|t| t.spec.priority);

        let mut first_failure = None;
        for task in self.tasks {
            task.stop.stop();
            on_stop(&task.spec);
            if task.join.join().is_err() {
                error!(task = %task.spec.name, "task panicked");
                first_failure.get_or_insert(ExecutiveError::TaskPanicked {
                    task: task.spec.name.clone(),
                });
            } else {
                debug!(task = %task.spec.name, "task joined");
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
