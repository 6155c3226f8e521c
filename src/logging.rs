//! Tracing subscriber setup.
//!
//! Logs always go to stderr. When file logging is enabled each run writes to
//! `{log_dir}/{YYYY-MM-DD}/run_{YYYY-MM-DD_HH-MM-SS}.log`.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{config::Settings, Result};

pub const DEFAULT_FILTER: &str = "info,nfl_stats_hub=debug";

/// Path of the log file for a run started at `started`.
pub fn run_log_path(base: &Path, started: DateTime<Local>) -> PathBuf {
    base.join(started.format("%Y-%m-%d").to_string())
        .join(started.format("run_%Y-%m-%d_%H-%M-%S.log").to_string())
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the program.
pub fn init(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .boxed();

    let (file_layer, guard) = if settings.log_to_file {
        let path = run_log_path(&settings.resolved_log_dir(), Local::now());
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        std::fs::create_dir_all(&dir)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "run.log".to_string());

        let appender = tracing_appender::rolling::never(&dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
