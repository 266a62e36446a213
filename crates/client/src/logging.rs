//! Tracing subscriber setup for the client binary.
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `info`). With a log
/// directory, a daily rolling `battle.log` is written as well; keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "battle.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::info!(dir = %dir.display(), "file logging enabled");
    }
    Ok(guard)
}
