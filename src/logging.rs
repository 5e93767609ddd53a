//! File logging
//!
//! The terminal belongs to the TUI, so tracing output goes to a file through a
//! non-blocking appender. Keep the returned guard alive until exit or buffered
//! lines are lost.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::{APP_DIR_NAME, DEFAULT_LOG_FILTER, LOG_DIR_ENV, LOG_FILE_NAME};

/// Log directory: `$EAT_N_SPLIT_LOG_DIR`, else the platform data dir, else `.`
pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Create `dir` if needed and return the log file path inside it
pub fn prepare_log_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    Ok(dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init() -> Result<WorkerGuard> {
    let dir = log_dir();
    prepare_log_dir(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    tracing::info!(dir = %dir.display(), "Logging initialised");
    Ok(guard)
}
