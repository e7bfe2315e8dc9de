/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use flasher::app::{Collaborators, FlasherApp};
use flasher::config::FlasherConfig;

// ── CLI argument definition ───────────────────────────────────────────────────

/// LED flasher with a sampler → buffer → renderer pipeline (simulated board).
///
/// Example:
///   flasher -c config/flasher.yaml -t 5000
#[derive(Debug, Parser)]
#[command(
    name = "flasher",
    about = "LED flasher – simulated buttons, LEDs and LCD",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the message buffer capacity.
    #[arg(short = 'b', long = "capacity")]
    capacity: Option<usize>,

    /// Stop after this many milliseconds instead of waiting for Ctrl-C.
    #[arg(short = 't', long = "duration-ms")]
    duration_ms: Option<u64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .init();

    info!("Flasher starting up...");

    let cli = Cli::parse();

    info!(
        config      = ?cli.config,
        capacity    = ?cli.capacity,
        duration_ms = ?cli.duration_ms,
        "Command line"
    );

    // ── Load configuration ────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => match FlasherConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No configuration file provided, using default settings");
            FlasherConfig::default()
        }
    };

    if let Some(capacity) = cli.capacity {
        config.buffer.capacity = capacity;
    }

    // ── Start tasks ───────────────────────────────────────────────────────────
    let io = Collaborators::simulated(&config);
    let running = match FlasherApp::start(&config, io) {
        Ok(running) => running,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            process::exit(1);
        }
    };

    for task in running.tasks() {
        info!(
            "  [{name}]  priority={prio}  stack={stack}KiB",
            name = task.name,
            prio = task.priority,
            stack = task.stack_kib,
        );
    }

    // ── Run until Ctrl-C or the requested duration ────────────────────────────
    match cli.duration_ms {
        Some(ms) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(ms)) => {
                    info!(duration_ms = ms, "Run time elapsed");
                }
                res = tokio::signal::ctrl_c() => log_ctrl_c(res),
            }
        }
        None => log_ctrl_c(tokio::signal::ctrl_c().await),
    }

    // Joining threads blocks, so keep it off the async workers.
    match tokio::task::spawn_blocking(move || running.shutdown()).await {
        Ok(Ok(())) => info!("Flasher stopped"),
        Ok(Err(e)) => {
            error!("Shutdown failed: {:#}", e);
            process::exit(1);
        }
        Err(e) => {
            error!("Shutdown task failed: {}", e);
            process::exit(1);
        }
    }
}

fn log_ctrl_c(res: std::io::Result<()>) {
    match res {
        Ok(()) => info!("Ctrl-C received"),
        Err(e) => warn!("Cannot listen for Ctrl-C ({}), stopping now", e),
    }
}
