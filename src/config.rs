//! Runtime configuration.
//!
//! The command line (with environment fallbacks) is resolved once into an
//! immutable [`Config`] that is handed to the session at construction time.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::normalize_base_url;
use crate::dashboard::{DEFAULT_WINDOW, HISTORY_LIMIT};
use crate::error::Result;

/// Default controller address.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default upper bound of the window control.
pub const DEFAULT_MAX_WINDOW: usize = 100;

/// Log filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "debug,hyper=info,hyper_util=info,rustls=info";

/// Build the log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Create (or truncate) the log file at `path`.
pub fn open_log_file(path: &Path) -> Result<File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    Ok(file)
}

/// Resolved configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Controller base URL, trailing slash removed.
    pub api_url: String,
    /// Window size on start.
    pub initial_window: usize,
    /// Upper bound of the window control.
    pub max_window: usize,
    /// Graph polling interval; `None` disables polling.
    pub refresh: Option<Duration>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            initial_window: DEFAULT_WINDOW,
            max_window: DEFAULT_MAX_WINDOW,
            refresh: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Validate raw option values into a config.
    ///
    /// The URL must be http(s); `max_window` is clamped to the controller's
    /// history, `initial_window` to `[1, max_window]`. A zero refresh interval
    /// disables polling.
    pub fn new(
        api_url: &str,
        initial_window: usize,
        max_window: usize,
        refresh_secs: u64,
        timeout_secs: u64,
    ) -> Result<Self> {
        let api_url = normalize_base_url(api_url)?;
        let max_window = max_window.clamp(1, HISTORY_LIMIT);
        let initial_window = initial_window.clamp(1, max_window);
        let refresh = (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs));
        let timeout = Duration::from_secs(timeout_secs.max(1));

        Ok(Self {
            api_url,
            initial_window,
            max_window,
            refresh,
            timeout,
        })
    }

    /// Log the loaded configuration.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  api_url        : {}", self.api_url);
        tracing::info!("  initial_window : {}", self.initial_window);
        tracing::info!("  max_window     : {}", self.max_window);
        match self.refresh {
            Some(every) => tracing::info!("  refresh        : {}s", every.as_secs()),
            None => tracing::info!("  refresh        : off"),
        }
        tracing::info!("  timeout        : {}s", self.timeout.as_secs());
    }
}
