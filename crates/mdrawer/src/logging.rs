#![forbid(unsafe_code)]

//! Logging setup for drawer hosts.
//!
//! The engine reports every drawer transition through `tracing`; this module
//! installs a subscriber that prints them.
//!
//! # Filtering
//!
//! The filter is read from `MDRAWER_LOG`, then `RUST_LOG`, then falls back to
//! [`LoggingConfig::default_filter`]:
//!
//! - `MDRAWER_LOG=mdrawer_engine=debug` shows drags, snaps and settles
//! - `MDRAWER_LOG=mdrawer_engine=trace` adds per-move progress
//!
//! ```rust,ignore
//! mdrawer::logging::init(LoggingConfig::default().with_format(LogFormat::Json))?;
//! ```

use std::fmt;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "MDRAWER_LOG";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directive used when neither environment variable is set.
    pub default_filter: String,
    pub format: LogFormat,
    /// Include the event target (module path) in output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn,mdrawer_engine=info".to_owned(),
            format: LogFormat::Pretty,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Resolve the filter from the environment or the configured default.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
            return Ok(filter);
        }
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.default_filter)
            .map_err(|err| LoggingError::Filter(err.to_string()))
    }
}

/// Failure to install the logging pipeline.
#[derive(Debug)]
pub enum LoggingError {
    /// The default filter directive did not parse.
    Filter(String),
    /// A global subscriber was already installed.
    AlreadyInitialized(TryInitError),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInitialized(err) => write!(f, "subscriber already installed: {err}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(_) => None,
            Self::AlreadyInitialized(err) => Some(err),
        }
    }
}

/// Install the global subscriber.
pub fn init(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(tfmt::layer().with_target(config.with_target))
            .try_init(),
        LogFormat::Json => registry
            .with(tfmt::layer().json().with_target(config.with_target))
            .try_init(),
    };
    installed.map_err(LoggingError::AlreadyInitialized)?;

    tracing::debug!(format = ?config.format, "drawer logging initialized");
    Ok(())
}
