//! Bridge and logging configuration loaded from the environment.
use std::env;
use std::path::{Path, PathBuf};

pub const RESYNC_ON_ATTACH_VAR: &str = "RENDER_SYNC_RESYNC_ON_ATTACH";
pub const QUIET_MAPPING_FAILURES_VAR: &str = "RENDER_SYNC_QUIET_MAPPING_FAILURES";
pub const LOG_DIR_VAR: &str = "RENDER_SYNC_LOG_DIR";
pub const SESSION_ID_VAR: &str = "RENDER_SYNC_SESSION_ID";
pub const LOG_LEVEL_VAR: &str = "RENDER_SYNC_LOG_LEVEL";

/// Behaviour switches for [`crate::SyncDispatcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Run a full pass against the latest snapshot as soon as a renderer
    /// attaches, instead of waiting for the next store notification.
    pub resync_on_attach: bool,
    /// Log mapping failures at `debug` instead of `warn`.
    pub quiet_mapping_failures: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            resync_on_attach: true,
            quiet_mapping_failures: false,
        }
    }
}

impl BridgeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `RENDER_SYNC_RESYNC_ON_ATTACH` (default: true)
    /// - `RENDER_SYNC_QUIET_MAPPING_FAILURES` (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(enable) = read_bool(&lookup, RESYNC_ON_ATTACH_VAR) {
            config.resync_on_attach = enable;
        }

        if let Some(quiet) = read_bool(&lookup, QUIET_MAPPING_FAILURES_VAR) {
            config.quiet_mapping_failures = quiet;
        }

        config
    }
}

/// Where and how verbosely [`crate::logging::setup_logging`] writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Root log directory (default: platform cache dir).
    pub directory: Option<PathBuf>,
    /// Session subdirectory name (default: timestamp-based).
    pub session_id: Option<String>,
    /// Filter directive used when `RUST_LOG` is unset (default: `info`).
    pub level: Option<String>,
}

impl LoggingConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `RENDER_SYNC_LOG_DIR`
    /// - `RENDER_SYNC_SESSION_ID`
    /// - `RENDER_SYNC_LOG_LEVEL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            directory: read_string(&lookup, LOG_DIR_VAR).map(PathBuf::from),
            session_id: read_string(&lookup, SESSION_ID_VAR),
            level: read_string(&lookup, LOG_LEVEL_VAR),
        }
    }
}

/// Loads the nearest `.env` into the process environment, returning its
/// path. A missing file is not an error.
///
/// Call before `from_env`. Variables already set in the environment win.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Loads a specific env file. Variables already set in the environment win.
pub fn load_dotenv_from(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

fn read_string(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        // Set without a value
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            tracing::warn!(key, value = other, "ignoring unrecognized boolean");
            None
        }
    }
}
