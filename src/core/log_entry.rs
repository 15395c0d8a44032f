//! Log entry structure

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Dot-joined logger name, empty for the base logger
    pub logger_name: String,
    pub fields: Fields,
}

impl LogEntry {
    /// Sanitize record text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries. Applied to both
    /// the message and the logger name.
    fn sanitize(text: &str) -> String {
        text
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize(message.as_ref()),
            timestamp: Utc::now(),
            logger_name: String::new(),
            fields: Fields::new(),
        }
    }

    pub fn with_logger_name(mut self, name: impl AsRef<str>) -> Self {
        self.logger_name = Self::sanitize(name.as_ref());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}
