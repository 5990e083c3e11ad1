//! Component loggers
//!
//! A [`Logger`] is a cheap, clonable handle bound to one component name. It
//! filters by its own [`LogLevel`] and forwards to `tracing`, tagging every
//! event with the component and the console location it reports to.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::domain::{DomainError, Location};

/// Log severity, ordered from most to least verbose.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    #[serde(alias = "warn")]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// Matching `tracing` filter; `Critical` maps to `ERROR`.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(DomainError::InvalidLogLevel(s.to_string())),
        }
    }
}

#[derive(Debug)]
struct LoggerInner {
    component: String,
    level: LogLevel,
    console: String,
}

/// Named logger handle. Clones share identity (see [`Logger::ptr_eq`]).
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    pub fn new(component: impl Into<String>, level: LogLevel, console_location: &Location) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                component: component.into(),
                level,
                console: console_location.uname(),
            }),
        }
    }

    pub fn component(&self) -> &str {
        &self.inner.component
    }

    pub fn level(&self) -> LogLevel {
        self.inner.level
    }

    /// Unique name of the console location this logger reports to.
    pub fn console(&self) -> &str {
        &self.inner.console
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.inner.level
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn trace(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Trace) {
            tracing::trace!(component = %self.component(), console = %self.console(), "{msg}");
        }
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Debug) {
            tracing::debug!(component = %self.component(), console = %self.console(), "{msg}");
        }
    }

    pub fn info(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Info) {
            tracing::info!(component = %self.component(), console = %self.console(), "{msg}");
        }
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Warning) {
            tracing::warn!(component = %self.component(), console = %self.console(), "{msg}");
        }
    }

    pub fn error(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Error) {
            tracing::error!(component = %self.component(), console = %self.console(), "{msg}");
        }
    }

    pub fn critical(&self, msg: impl fmt::Display) {
        if self.enabled(LogLevel::Critical) {
            tracing::error!(
                component = %self.component(),
                console = %self.console(),
                critical = true,
                "{msg}"
            );
        }
    }
}
