#![forbid(unsafe_code)]

//! Unified error type for drawer hosts.
//!
//! Each variant wraps the error of one layer so hosts can propagate any of
//! them with `?` and still match on what matters. [`Error::error_type`]
//! gives a stable label for log fields and metrics.

use std::fmt;

use mdrawer_core::layout::UnknownLayoutMode;
#[cfg(feature = "policy-config")]
use mdrawer_engine::ConfigError;
use mdrawer_engine::EngineError;

/// Top-level error for mdrawer hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid drawer tuning or detached render handle.
    Engine(EngineError),
    /// A layout mode name did not parse.
    Layout(UnknownLayoutMode),
    /// Policy file could not be loaded.
    #[cfg(feature = "policy-config")]
    Config(ConfigError),
    /// Logging pipeline could not be installed.
    #[cfg(feature = "logging")]
    Logging(crate::logging::LoggingError),
}

/// Standard result type for mdrawer APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for metrics and tracing.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Engine(EngineError::InvalidConfig { .. }) => "invalid_config",
            Self::Engine(EngineError::Detached { .. }) => "detached_handle",
            Self::Layout(_) => "layout",
            #[cfg(feature = "policy-config")]
            Self::Config(_) => "config",
            #[cfg(feature = "logging")]
            Self::Logging(_) => "logging",
        }
    }

    /// Whether the host can keep running after this error.
    ///
    /// Only a detached handle means the drawer state is gone.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Engine(EngineError::Detached { .. }))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "engine error: {err}"),
            Self::Layout(err) => write!(f, "layout error: {err}"),
            #[cfg(feature = "policy-config")]
            Self::Config(err) => write!(f, "config error: {err}"),
            #[cfg(feature = "logging")]
            Self::Logging(err) => write!(f, "logging error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Layout(err) => Some(err),
            #[cfg(feature = "policy-config")]
            Self::Config(err) => Some(err),
            #[cfg(feature = "logging")]
            Self::Logging(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<UnknownLayoutMode> for Error {
    fn from(err: UnknownLayoutMode) -> Self {
        Self::Layout(err)
    }
}

#[cfg(feature = "policy-config")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "logging")]
impl From<crate::logging::LoggingError> for Error {
    fn from(err: crate::logging::LoggingError) -> Self {
        Self::Logging(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
