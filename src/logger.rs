//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to a bounded buffer displayed in the UI log panel.

use crate::error::AppResult;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of entries kept for the log panel.
///
const LOG_BUFFER_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Bounded, shareable store of formatted log lines. Oldest lines are dropped
/// first.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        LogBuffer::default()
    }

    /// Append a line, evicting the oldest one when full.
    ///
    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() == LOG_BUFFER_CAPACITY {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Return a copy of the buffered lines, oldest first.
    ///
    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Custom logger that captures logs through a callback
///
pub struct CustomLogger {
    log_callback: Arc<Mutex<Option<Box<dyn Fn(String) + Send + Sync>>>>,
}

impl CustomLogger {
    pub fn new() -> Self {
        CustomLogger {
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Box<dyn Fn(String) + Send + Sync>) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }

    /// Install a logger forwarding every record at or above the level into
    /// the buffer.
    ///
    pub fn init(buffer: LogBuffer, level: LevelFilter) -> AppResult<()> {
        let logger = CustomLogger::new();
        logger.set_log_callback(Box::new(move |entry| buffer.push(entry)));
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Default for CustomLogger {
    fn default() -> Self {
        CustomLogger::new()
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn log_buffer_evicts_oldest() {
        let buffer = LogBuffer::new();
        for i in 0..(LOG_BUFFER_CAPACITY + 3) {
            buffer.push(i.to_string());
        }
        let entries = buffer.snapshot();
        assert_eq!(entries.len(), LOG_BUFFER_CAPACITY);
        assert_eq!(entries[0], "3");
        assert_eq!(
            entries.last().unwrap(),
            &(LOG_BUFFER_CAPACITY + 2).to_string()
        );
    }

    #[test]
    fn logger_forwards_formatted_records() {
        let buffer = LogBuffer::new();
        let logger = CustomLogger::new();
        let sink = buffer.clone();
        logger.set_log_callback(Box::new(move |entry| sink.push(entry)));

        log::set_max_level(LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .args(format_args!("lists loaded"))
                .level(Level::Info)
                .build(),
        );

        let entries = buffer.snapshot();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("INFO lists loaded"));
    }

    #[test]
    fn init_installs_global_logger_once() {
        let buffer = LogBuffer::new();
        assert!(CustomLogger::init(buffer.clone(), LevelFilter::Trace).is_ok());
        log::info!("logger installed");
        assert!(buffer
            .snapshot()
            .iter()
            .any(|entry| entry.ends_with("INFO logger installed")));

        let again = CustomLogger::init(LogBuffer::new(), LevelFilter::Trace);
        assert!(matches!(again, Err(AppError::Logger(_))));
    }
}
