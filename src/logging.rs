//! Logging setup.
//!
//! The terminal belongs to the dashboard, so logs only go to a daily rolling
//! file. `DOCKSTAT_LOG` overrides the configured level with a full filter
//! directive (e.g. `dockstat=debug,bollard=info`).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "DOCKSTAT_LOG";
pub const LOG_FILE_PREFIX: &str = "dockstat.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the program; dropping it flushes buffered lines.
pub fn init_logging(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => default_filter(level)?,
    };

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialised: {}", e)))?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn default_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(format!("dockstat={}", level.to_lowercase()))
        .map_err(|e| Error::Config(format!("invalid log level '{}': {}", level, e)))
}
