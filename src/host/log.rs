use std::fmt;
use std::sync::Mutex;

/// Severity levels exposed to addons, with the host's raw integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warning = 3,
    Error = 4,
    Severe = 5,
    Fatal = 6,
    None = 7,
}

impl LogLevel {
    /// Interpret a raw level integer as passed across the addon boundary.
    /// Anything outside the valid range falls back to `Notice`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Notice,
            3 => LogLevel::Warning,
            4 => LogLevel::Error,
            5 => LogLevel::Severe,
            6 => LogLevel::Fatal,
            7 => LogLevel::None,
            _ => LogLevel::Notice,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Severe => "SEVERE",
            LogLevel::Fatal => "FATAL",
            LogLevel::None => "NONE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The logging seam between addons and the host runtime.
pub trait HostLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    /// Raw-integer entry point for callers that carry the host's level
    /// constants instead of the enum.
    fn log_raw(&self, raw_level: i32, message: &str) {
        self.log(LogLevel::from_raw(raw_level), message);
    }
}

/// Forwards addon log calls into the tracing subscriber set up in `main`.
#[derive(Debug, Default)]
pub struct TracingLog;

impl HostLog for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "addon", "{message}"),
            LogLevel::Info => tracing::info!(target: "addon", "{message}"),
            LogLevel::Notice => tracing::info!(target: "addon", "NOTICE {message}"),
            LogLevel::Warning => tracing::warn!(target: "addon", "{message}"),
            LogLevel::Error | LogLevel::Severe | LogLevel::Fatal => {
                tracing::error!(target: "addon", "{} {message}", level.label())
            }
            LogLevel::None => {}
        }
    }
}

/// One recorded addon log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// In-memory sink for inspecting addon emissions.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("log buffer poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("log buffer poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HostLog for BufferedLog {
    fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::None {
            return;
        }
        self.entries.lock().expect("log buffer poisoned").push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_levels_round_trip() {
        for raw in 0..=7 {
            assert_eq!(LogLevel::from_raw(raw).as_raw(), raw);
        }
    }

    #[test]
    fn out_of_range_raw_level_falls_back_to_notice() {
        assert_eq!(LogLevel::from_raw(-1), LogLevel::Notice);
        assert_eq!(LogLevel::from_raw(8), LogLevel::Notice);
        assert_eq!(LogLevel::from_raw(i32::MAX), LogLevel::Notice);
    }

    #[test]
    fn buffered_log_records_entries_in_order() {
        let sink = BufferedLog::new();
        sink.log(LogLevel::Notice, "first");
        sink.log_raw(4, "second");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, LogLevel::Error);
    }

    #[test]
    fn none_level_is_dropped() {
        let sink = BufferedLog::new();
        sink.log(LogLevel::None, "silent");
        assert!(sink.is_empty());
    }
}
