//! Logging setup: console (stderr) plus an appended plain-text log file.
//!
//! The level comes from `RUST_LOG` when set, otherwise `debug` with
//! `--verbose` and `warn` without it.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_INPUT};

/// Default filter directive for the given verbosity.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber. Call once, before the pipeline runs.
pub fn init(verbose: bool, log_file: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open log file '{}': {e}", log_file.display())))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to initialize logging: {e}")))
}
