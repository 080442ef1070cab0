//! File logging for hosts embedding the bridge.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "render-sync.log";

const DEFAULT_LEVEL: &str = "info";

/// Keeps the background log writer alive. Buffered lines are flushed on drop.
#[must_use = "dropping the guard stops the log writer"]
pub struct LoggingGuard {
    _worker: WorkerGuard,
    session_dir: PathBuf,
}

impl LoggingGuard {
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn log_file(&self) -> PathBuf {
        self.session_dir.join(LOG_FILE_NAME)
    }
}

/// Platform log directory.
///
/// - macOS: `~/Library/Caches/render-sync/logs`
/// - Linux: `~/.cache/render-sync/logs` (or `$XDG_CACHE_HOME/render-sync/logs`)
/// - Windows: `%LOCALAPPDATA%\render-sync\logs`
/// - Fallback: `/tmp/render-sync/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "render-sync")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/render-sync"))
        .join("logs")
}

/// Installs the global subscriber: an env filter plus a non-blocking file
/// layer writing to `<dir>/<session>/render-sync.log`.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`]. Fails if a
/// global subscriber is already installed.
pub fn setup_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_dir = config.directory.clone().unwrap_or_else(default_log_dir);
    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("Failed to create log directory: {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, LOG_FILE_NAME);
    let (non_blocking_file, worker) = tracing_appender::non_blocking(file_appender);

    let level = config.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log filter: {level}"))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}", session_dir.join(LOG_FILE_NAME).display());

    Ok(LoggingGuard {
        _worker: worker,
        session_dir,
    })
}
