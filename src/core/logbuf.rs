/// Bounded in-dashboard log sink backing the Logs view

use std::sync::{Arc, Mutex};

use chrono::Utc;

const MAX_LOG_ENTRIES: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: i64,
    pub level: LogLevel,
    pub message: String,
}

/// Shared sink for recoverable errors and notices. Everything pushed here
/// also goes out through tracing for the optional log file.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, message: String) {
        let mut entries = self.entries.lock().expect("log buffer lock poisoned");
        entries.push(LogEntry {
            timestamp: Utc::now().timestamp(),
            level,
            message,
        });
        if entries.len() > MAX_LOG_ENTRIES {
            let excess = entries.len() - MAX_LOG_ENTRIES;
            entries.drain(0..excess);
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(LogLevel::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push(LogLevel::Info, message);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .expect("log buffer lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("log buffer lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
