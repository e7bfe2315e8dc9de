/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Wiring: builds the buffer and actuator state, hands each task exactly the
//! handles it needs, and starts the task set.
//!
//! ```text
//!                 ┌────────────┐ put  ┌────────────┐ get  ┌──────────┐
//!   InputSource ─►│  sampler   │─────►│ SafeBuffer │─────►│ renderer │─► DisplaySink
//!                 └─────┬──────┘      └────────────┘      └──────────┘
//!                writes │ ActuatorState (link, connect)
//!                       ▼
//!                 ┌────────────┐
//!                 │ link /     │─► OutputActuator
//!                 │ connect    │
//!                 └────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::actuator::ActuatorState;
use crate::buffer::SafeBuffer;
use crate::config::FlasherConfig;
use crate::io::{
    DisplaySink, InputSource, OutputActuator, ScriptedInput, SimulatedLed, TextLcd,
};
use crate::message::{Message, SourceId};
use crate::tasks::{Executive, ExecutiveError, LedFlasher, Renderer, Sampler, TaskSpec};

const RENDERER_TASK: &str = "renderer";

/// How long shutdown waits for room to put the renderer's wake-up message.
const RENDERER_WAKE_TIMEOUT: Duration = Duration::from_secs(1);

// ── Collaborators ─────────────────────────────────────────────────────────────

/// The I/O devices the tasks drive, each moved into the task that owns it.
pub struct Collaborators {
    pub input: Box<dyn InputSource>,
    pub link_led: Box<dyn OutputActuator>,
    pub connect_led: Box<dyn OutputActuator>,
    pub display: Box<dyn DisplaySink>,
}

impl Collaborators {
    /// Scripted buttons, simulated LEDs and an in-memory LCD, all from
    /// `config`.
    pub fn simulated(config: &FlasherConfig) -> Self {
        Self {
            input: Box::new(ScriptedInput::new(
                config.script.clone(),
                config.sampler.period_ms,
            )),
            link_led: Box::new(SimulatedLed::new()),
            connect_led: Box::new(SimulatedLed::new()),
            display: Box::new(TextLcd::new(config.display.cols, config.display.rows)),
        }
    }
}

// ── FlasherApp ────────────────────────────────────────────────────────────────

pub struct FlasherApp;

impl FlasherApp {
    /// Validate `config`, build shared state and start all four tasks.
    ///
    /// # Errors
    /// A [`ConfigError`](crate::config::ConfigError) for an invalid
    /// configuration, or an [`ExecutiveError`] if a task can't be created.
    /// Tasks already started are stopped before returning.
    pub fn start(config: &FlasherConfig, io: Collaborators) -> Result<RunningFlasher> {
        config.validate()?;

        let buffer = Arc::new(SafeBuffer::<Message>::new(config.buffer.capacity)?);
        let link = Arc::new(ActuatorState::new(
            SourceId::Link,
            config.link.enabled,
            config.link.initial_delay_ms,
        ));
        let connect = Arc::new(ActuatorState::new(
            SourceId::Connect,
            config.connect.enabled,
            config.connect.initial_delay_ms,
        ));

        info!(
            capacity = config.buffer.capacity,
            link_delay_ms = link.interval_ms(),
            connect_delay_ms = connect.interval_ms(),
            "Starting flasher"
        );

        let mut exec = Executive::new();
        if let Err(e) = Self::spawn_all(&mut exec, config, io, &buffer, &link, &connect) {
            // Don't leave half a task set running.
            if let Err(rollback) = exec.shutdown() {
                warn!("Stopping partially started tasks failed: {}", rollback);
            }
            return Err(e).context("Failed to start tasks");
        }

        Ok(RunningFlasher {
            exec,
            buffer,
            link,
            connect,
        })
    }

    fn spawn_all(
        exec: &mut Executive,
        config: &FlasherConfig,
        io: Collaborators,
        buffer: &Arc<SafeBuffer<Message>>,
        link: &Arc<ActuatorState>,
        connect: &Arc<ActuatorState>,
    ) -> Result<(), ExecutiveError> {
        let Collaborators {
            input,
            link_led,
            connect_led,
            display,
        } = io;

        let sampler = Sampler::new(
            input,
            Arc::clone(buffer),
            Arc::clone(link),
            Arc::clone(connect),
            Duration::from_millis(config.sampler.period_ms),
        );
        exec.spawn(
            TaskSpec::new("sampler", config.sampler.priority, config.sampler.stack_kib),
            move |stop| sampler.run(stop),
        )?;

        for (state, led, section) in [
            (link, link_led, &config.link),
            (connect, connect_led, &config.connect),
        ] {
            let flasher = LedFlasher::new(Arc::clone(state), led);
            exec.spawn(
                TaskSpec::new(state.id().name(), section.priority, section.stack_kib),
                move |stop| flasher.run(stop),
            )?;
        }

        // The renderer learns the starting state from these copies only.
        let initial = [link.snapshot(), connect.snapshot()];
        let renderer = Renderer::new(Arc::clone(buffer), display);
        exec.spawn(
            TaskSpec::new(RENDERER_TASK, config.renderer.priority, config.renderer.stack_kib),
            move |stop| renderer.run(&initial, stop),
        )?;

        Ok(())
    }
}

// ── RunningFlasher ────────────────────────────────────────────────────────────

/// Handle to a started task set.
pub struct RunningFlasher {
    exec: Executive,
    buffer: Arc<SafeBuffer<Message>>,
    link: Arc<ActuatorState>,
    connect: Arc<ActuatorState>,
}

impl RunningFlasher {
    pub fn buffer(&self) -> &SafeBuffer<Message> {
        &self.buffer
    }

    pub fn actuator(&self, id: SourceId) -> &ActuatorState {
        match id {
            SourceId::Link => &self.link,
            SourceId::Connect => &self.connect,
        }
    }

    /// Task specs, most urgent first.
    pub fn tasks(&self) -> Vec<&TaskSpec> {
        self.exec.specs()
    }

    /// Stop every task, producers first, and wait for them.
    ///
    /// The renderer is stopped last.  By then nothing else writes to the
    /// buffer, so one final link snapshot is put to wake its blocking `get`;
    /// it drains that and whatever was still queued, then exits.
    pub fn shutdown(self) -> Result<(), ExecutiveError> {
        let Self { exec, buffer, link, .. } = self;
        info!(pending = buffer.len(), "Stopping flasher");

        exec.shutdown_with(|task| {
            if task.name == RENDERER_TASK {
                let msg = link.snapshot();
                debug!(%msg, "waking renderer");
                // Only a renderer that already died leaves the buffer full now.
                if let Err(e) = buffer.put_timeout(msg, RENDERER_WAKE_TIMEOUT) {
                    warn!("Renderer did not take its wake-up message: {}", e);
                }
            }
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
