//! I/O boundary traits for testability
//!
//! These traits abstract the logging collaborators of the command tree,
//! allowing services to be tested with recording implementations.

use std::fs::OpenOptions;
use std::io::{self, Write};

use crate::domain::{Layout, Location, LogLevel, Logger};

/// Logger factory.
pub trait LoggerFactory: Send + Sync {
    /// Create a logger for `name` reporting to `console_location`.
    fn create_logger(&self, name: &str, level: LogLevel, console_location: &Location) -> Logger;
}

/// Runtime log setup for a command group.
pub trait RuntimeLog: Send + Sync {
    /// Prepare the log layout of `location` for the `label` group.
    ///
    /// Called once per group invocation.
    fn setup_log(&self, location: &Location, label: &str) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Loggers forwarding to the process-wide `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingLoggerFactory;

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, name: &str, level: LogLevel, console_location: &Location) -> Logger {
        tracing::trace!(logger = name, %level, console = %console_location, "create logger");
        Logger::new(name, level, console_location)
    }
}

/// Writes a session marker to `<log dir>/<label>.log` of the console location.
#[derive(Debug, Default)]
pub struct ConsoleRuntimeLog;

impl RuntimeLog for ConsoleRuntimeLog {
    fn setup_log(&self, location: &Location, label: &str) -> io::Result<()> {
        let dir = location.layout_dir(Layout::Log);
        std::fs::create_dir_all(&dir)?;

        let path = location.layout_file(Layout::Log, label);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".into());
        writeln!(
            file,
            "[{}] session start label={} host={} pid={}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            label,
            host,
            std::process::id()
        )?;

        tracing::debug!(path = %path.display(), "runtime log ready");
        Ok(())
    }
}
