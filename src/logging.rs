//! Logging setup for the application.
//!
//! The terminal belongs to the TUI, so tracing output goes to a single log
//! file only. Subsequent calls to `init` are no-ops.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::config::{LoggingSettings, default_state_dir};

const LOG_FILE_NAME: &str = "setlist.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Neither `logging.dir` nor a state directory could be resolved.
    #[error("No suitable directory available for logs")]
    NoLogDir,
    /// Failed to create the log directory.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to append to `setlist.log` in the configured directory.
///
/// Returns the log file path. Failures are returned so the caller can carry
/// on without logs.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf, LoggingError> {
    let log_dir = log_directory(settings)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }

    let file_appender = rolling::never(&log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);
    let subscriber = Registry::default()
        .with(build_env_filter(&settings.level))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(log_path)
}

fn log_directory(settings: &LoggingSettings) -> Result<PathBuf, LoggingError> {
    let dir = settings
        .dir
        .clone()
        .or_else(default_state_dir)
        .ok_or(LoggingError::NoLogDir)?;
    ensure_dir(&dir)?;
    Ok(dir)
}

fn ensure_dir(path: &Path) -> Result<(), LoggingError> {
    fs::create_dir_all(path).map_err(|source| LoggingError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// `RUST_LOG` wins; otherwise use the configured level, then `info`.
fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
