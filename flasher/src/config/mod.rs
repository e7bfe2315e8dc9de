/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Flasher configuration loading and validation.
//!
//! Every section is optional and anything left out takes the value the lab
//! board used.  Inside a `link` / `connect` section only `priority` is
//! required.  The expected YAML structure is:
//! ```yaml
//! buffer:
//!   capacity: 6
//! sampler:
//!   priority: 4
//!   period_ms: 10
//! link:
//!   priority: 6
//!   initial_delay_ms: 500
//!   enabled: false
//! connect:
//!   priority: 8
//!   initial_delay_ms: 500
//! renderer:
//!   priority: 10
//! display:
//!   cols: 20
//!   rows: 8
//! script:
//!   - { at_ms: 200, hold_ms: 30, button: button1 }
//!   - { at_ms: 600, button: joy_up }
//! ```

pub mod error;

pub use error::ConfigError;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::buffer::DEFAULT_CAPACITY;
use crate::delay::{self, DEFAULT_DELAY_MS, MAX_DELAY_MS, MIN_DELAY_MS};
use crate::io::ScriptEntry;
use crate::tasks::renderer::{MIN_DISPLAY_COLS, MIN_DISPLAY_ROWS};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Most urgent priority a task may use.
pub const HIGHEST_PRIORITY: u8 = 0;

/// Least urgent priority a task may use; 63 is the idle task's on the RTOS.
pub const LOWEST_PRIORITY: u8 = 62;

/// Smallest stack a task thread may be given.
pub const MIN_STACK_KIB: usize = 16;

/// Largest stack a task thread may be given.
pub const MAX_STACK_KIB: usize = 8 * 1024;

const DEFAULT_STACK_KIB: usize = 64;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferSection {
    pub capacity: usize,
}

impl Default for BufferSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerSection {
    pub priority: u8,
    pub period_ms: u64,
    pub stack_kib: usize,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            priority: 4,
            period_ms: 10,
            stack_kib: DEFAULT_STACK_KIB,
        }
    }
}

/// Settings for one LED flasher task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedSection {
    pub priority: u8,
    #[serde(default = "default_delay_ms")]
    pub initial_delay_ms: u16,
    /// Start flashing without waiting for a button press.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_stack_kib")]
    pub stack_kib: usize,
}

fn default_delay_ms() -> u16 {
    DEFAULT_DELAY_MS
}

fn default_stack_kib() -> usize {
    DEFAULT_STACK_KIB
}

impl LedSection {
    fn with_priority(priority: u8) -> Self {
        Self {
            priority,
            initial_delay_ms: DEFAULT_DELAY_MS,
            enabled: false,
            stack_kib: DEFAULT_STACK_KIB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererSection {
    pub priority: u8,
    pub stack_kib: usize,
}

impl Default for RendererSection {
    fn default() -> Self {
        Self {
            priority: 10,
            stack_kib: DEFAULT_STACK_KIB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub cols: u8,
    pub rows: u8,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { cols: 20, rows: 8 }
    }
}

// ── FlasherConfig ─────────────────────────────────────────────────────────────

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlasherConfig {
    pub buffer: BufferSection,
    pub sampler: SamplerSection,
    pub link: LedSection,
    pub connect: LedSection,
    pub renderer: RendererSection,
    pub display: DisplaySection,
    /// Scripted button presses fed to the simulated input.
    pub script: Vec<ScriptEntry>,
}

impl Default for FlasherConfig {
    fn default() -> Self {
        Self {
            buffer: BufferSection::default(),
            sampler: SamplerSection::default(),
            link: LedSection::with_priority(6),
            connect: LedSection::with_priority(8),
            renderer: RendererSection::default(),
            display: DisplaySection::default(),
            script: Vec::new(),
        }
    }
}

impl FlasherConfig {
    /// Parse and validate the YAML file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is invalid or
    /// names an unknown field, or the values fail [`validate`](Self::validate).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading flasher configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

        info!(
            capacity = config.buffer.capacity,
            script_len = config.script.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: FlasherConfig = serde_yaml::from_str(yaml).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Task names and priorities, in a fixed order.
    pub fn priorities(&self) -> [(&'static str, u8); 4] {
        [
            ("sampler", self.sampler.priority),
            ("link", self.link.priority),
            ("connect", self.connect.priority),
            ("renderer", self.renderer.priority),
        ]
    }

    /// Check every value the rest of the program relies on.
    ///
    /// # Errors
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        self.validate_priorities()?;

        if self.sampler.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod {
                field: "sampler.period_ms",
            });
        }

        for (task, stack_kib) in [
            ("sampler", self.sampler.stack_kib),
            ("link", self.link.stack_kib),
            ("connect", self.connect.stack_kib),
            ("renderer", self.renderer.stack_kib),
        ] {
            if stack_kib < MIN_STACK_KIB {
                return Err(ConfigError::StackTooSmall {
                    task,
                    stack_kib,
                    min_kib: MIN_STACK_KIB,
                });
            }
            if stack_kib > MAX_STACK_KIB {
                return Err(ConfigError::StackTooLarge {
                    task,
                    stack_kib,
                    max_kib: MAX_STACK_KIB,
                });
            }
        }

        for (task, led) in [("link", &self.link), ("connect", &self.connect)] {
            if !delay::in_range(led.initial_delay_ms) {
                return Err(ConfigError::DelayOutOfRange {
                    task,
                    delay_ms: led.initial_delay_ms,
                    min: MIN_DELAY_MS,
                    max: MAX_DELAY_MS,
                });
            }
        }

        if self.display.cols < MIN_DISPLAY_COLS || self.display.rows < MIN_DISPLAY_ROWS {
            return Err(ConfigError::DisplayTooSmall {
                cols: self.display.cols,
                rows: self.display.rows,
                min_cols: MIN_DISPLAY_COLS,
                min_rows: MIN_DISPLAY_ROWS,
            });
        }

        debug!("Configuration valid");
        Ok(())
    }

    fn validate_priorities(&self) -> Result<(), ConfigError> {
        let prios = self.priorities();

        for (task, priority) in prios {
            if !(HIGHEST_PRIORITY..=LOWEST_PRIORITY).contains(&priority) {
                return Err(ConfigError::PriorityOutOfRange {
                    task,
                    priority,
                    max: LOWEST_PRIORITY,
                });
            }
        }

        for (i, &(first, priority)) in prios.iter().enumerate() {
            if let Some(&(second, _)) = prios[i + 1..].iter().find(|(_, p)| *p == priority) {
                return Err(ConfigError::DuplicatePriority {
                    priority,
                    first,
                    second,
                });
            }
        }

        let sampler = self.sampler.priority;
        let renderer = self.renderer.priority;
        for &(other, other_priority) in &prios[1..] {
            if other_priority <= sampler {
                return Err(ConfigError::SamplerNotHighest {
                    sampler,
                    other,
                    other_priority,
                });
            }
        }
        for &(other, other_priority) in &prios[..3] {
            if other_priority >= renderer {
                return Err(ConfigError::RendererNotLowest {
                    renderer,
                    other,
                    other_priority,
                });
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
