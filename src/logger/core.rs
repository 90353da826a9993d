//! Logging primitives for the catalog graph loader.
//!
//! The surface is intentionally small: a `LogLevel`, a `Logger` trait that
//! only requires `log`, a no-op implementation for tests, and a console
//! logger that writes one JSON object per line to stderr. Stdout stays free
//! for data output (dry runs print N-Triples there).
//!
//! Implementors of `Logger` must be `Send + Sync + 'static` so they can sit
//! behind the global facade in `logger::mod`.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Logging interface used throughout the crate.
///
/// Only `log` is required; the per-level helpers delegate to it.
pub trait Logger: Send + Sync + 'static {
    /// Emit a log record at the given level.
    fn log(&self, level: LogLevel, message: &str);

    /// Flush any buffered records.
    fn flush(&self) {}

    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Writes `{"ts":"...","level":"INFO","msg":"..."}` lines to stderr.
///
/// Records below `min_level` are dropped.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

/// Renders one log record as a compact JSON object.
pub fn format_record(level: LogLevel, message: &str) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "level": level.as_str(),
        "msg": message,
    })
    .to_string()
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = format_record(level, message);
        let mut stderr = std::io::stderr().lock();
        // A closed stderr must not take the pipeline down with it.
        let _ = writeln!(stderr, "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
