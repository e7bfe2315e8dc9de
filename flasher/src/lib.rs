/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Flasher – two periodically toggled LEDs, a button sampler and an LCD
//! renderer, decoupled by a bounded blocking message buffer.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── message     – fixed 4-byte Message record
//! ├── delay       – clamped period arithmetic
//! ├── buffer/     – ring store + semaphores → SafeBuffer
//! ├── actuator    – per-LED shared state (relaxed atomics)
//! ├── io/         – input / LED / display traits and simulations
//! ├── tasks/      – Executive, sampler, LED flashers, renderer
//! ├── config/     – YAML configuration and validation
//! └── app         – wires everything and starts the task set
//! ```

pub mod actuator;
pub mod app;
pub mod buffer;
pub mod config;
pub mod delay;
pub mod io;
pub mod message;
pub mod tasks;
