use crate::logger::{LogLevel, Logger};
use std::sync::{Arc, Mutex};

/// Serialises tests that swap the global logger.
pub(crate) static FACADE_LOCK: Mutex<()> = Mutex::new(());

/// Logger keeping every record in memory.
#[derive(Clone, Default)]
pub(crate) struct CapturingLogger {
    records: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl CapturingLogger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records whose message contains `needle`.
    ///
    /// Other tests log through the same facade concurrently, so callers
    /// filter on a marker of their own.
    pub(crate) fn matching(&self, needle: &str) -> Vec<(LogLevel, String)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, msg)| msg.contains(needle))
            .cloned()
            .collect()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
