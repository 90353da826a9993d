//! Top-level logger exports and a small global facade.
//!
//! - `Logger`: trait defining the logging surface
//! - `LogLevel`: enum of levels
//! - `NoopLogger`: drops everything (default until `init_logger` is called)
//! - `ConsoleLogger`: JSON lines on stderr, filtered by a minimum level
//!
//! ```rust,no_run
//! use catalog_graph::logger::{self, ConsoleLogger, LogLevel};
//! logger::init_logger(ConsoleLogger::new(LogLevel::Info));
//! logger::info("loader started");
//! ```

pub mod core;

pub use core::{ConsoleLogger, LogLevel, Logger, NoopLogger, format_record};

use std::sync::RwLock;

/// Process-wide logger used by the convenience helpers below.
///
/// Loggers are leaked on installation so the facade can hand out `'static`
/// references; `init_logger` is expected to run once early in `main` (tests
/// may install replacements).
static GLOBAL_LOGGER: RwLock<Option<&'static dyn Logger>> = RwLock::new(None);

/// Install `logger` as the global logger.
pub fn init_logger<L: Logger>(logger: L) {
    let leaked: &'static dyn Logger = Box::leak(Box::new(logger));
    let mut slot = match GLOBAL_LOGGER.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = Some(leaked);
}

fn current() -> Option<&'static dyn Logger> {
    match GLOBAL_LOGGER.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Log using the global logger if set, otherwise no-op.
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = current() {
        logger.log(level, message);
    }
}

pub fn flush() {
    if let Some(logger) = current() {
        logger.flush();
    }
}

pub fn debug(msg: &str) {
    log(LogLevel::Debug, msg);
}

pub fn info(msg: &str) {
    log(LogLevel::Info, msg);
}

pub fn warn(msg: &str) {
    log(LogLevel::Warn, msg);
}

pub fn error(msg: &str) {
    log(LogLevel::Error, msg);
}

#[cfg(test)]
pub(crate) mod tests;
