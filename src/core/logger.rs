//! Main logger implementation

use super::{
    encoding::Encoding,
    error::Result,
    fields::{FieldValue, Fields},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::sinks::{SharedSink, Sink};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Immutable, thread-safe logger handle.
///
/// Cloning is cheap and yields a handle to the same logger. Derived loggers
/// (`named`, `with_fields`) share sinks and metrics with their parent but
/// carry their own name and fields.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerCore>,
}

struct LoggerCore {
    min_level: LogLevel,
    encoding: Encoding,
    name: String,
    fields: Fields,
    outputs: Vec<SharedSink>,
    error_outputs: Vec<SharedSink>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_channel_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .encoding(Encoding::Json)
    ///     .build();
    /// assert!(logger.enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.inner.min_level
    }

    pub fn encoding(&self) -> Encoding {
        self.inner.encoding
    }

    /// Display label, empty for a base logger
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn fields(&self) -> &Fields {
        &self.inner.fields
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Number of output sinks (error outputs excluded)
    pub fn sink_count(&self) -> usize {
        self.inner.outputs.len()
    }

    /// Whether a record at `level` would be emitted
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.inner.min_level
    }

    /// Derive a logger with `name` appended to this logger's name.
    ///
    /// Segments are joined with a dot: `"http".named("router")` yields
    /// `http.router`.
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        let full = if self.inner.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.inner.name, name)
        };
        self.derive(full, self.inner.fields.clone())
    }

    /// Derive a logger carrying one extra field on every record
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields(&Fields::new().with_field(key, value))
    }

    /// Derive a logger carrying `fields` on every record
    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> Logger {
        let mut merged = self.inner.fields.clone();
        merged.extend(fields);
        self.derive(self.inner.name.clone(), merged)
    }

    fn derive(&self, name: String, fields: Fields) -> Logger {
        Logger {
            inner: Arc::new(LoggerCore {
                min_level: self.inner.min_level,
                encoding: self.inner.encoding,
                name,
                fields,
                outputs: self.inner.outputs.clone(),
                error_outputs: self.inner.error_outputs.clone(),
                metrics: Arc::clone(&self.inner.metrics),
            }),
        }
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_with_fields(level, message, &Fields::new());
    }

    /// Log with per-record structured fields
    pub fn log_with_fields(&self, level: LogLevel, message: impl AsRef<str>, fields: &Fields) {
        if !self.enabled(level) {
            self.inner.metrics.record_filtered();
            return;
        }

        let mut all = self.inner.fields.clone();
        all.extend(fields);

        let entry = LogEntry::new(level, message)
            .with_logger_name(&self.inner.name)
            .with_fields(all);
        self.write_entry(&entry);
    }

    fn write_entry(&self, entry: &LogEntry) {
        let mut plain: Option<String> = None;
        let mut colored: Option<String> = None;
        let mut failed = false;

        for sink in &self.inner.outputs {
            let mut guard = sink.lock();
            let line = if guard.is_terminal() {
                colored.get_or_insert_with(|| self.inner.encoding.encode(entry, true))
            } else {
                plain.get_or_insert_with(|| self.inner.encoding.encode(entry, false))
            };

            if let Err(e) = guard.write_line(line) {
                // Release before reporting: the error output may be this sink
                drop(guard);
                failed = true;
                self.inner.metrics.record_failed_write();
                self.report_internal_error(&format!("write error: {}", e));
            }
        }

        if !failed {
            self.inner.metrics.record_emitted();
        }
    }

    fn report_internal_error(&self, message: &str) {
        let line = format!(
            "{} {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message
        );
        for sink in &self.inner.error_outputs {
            let mut guard = sink.lock();
            if let Err(e) = guard.write_line(&line).and_then(|()| guard.flush()) {
                eprintln!("[LOGGER ERROR] Error output '{}' failed: {}", guard.name(), e);
            }
        }
        if self.inner.error_outputs.is_empty() {
            eprintln!("[LOGGER ERROR] {}", message);
        }
    }

    /// Flush every output and error output, returning the first failure.
    pub fn sync(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.inner.outputs.iter().chain(&self.inner.error_outputs) {
            if let Err(e) = sink.lock().flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at DPanic level. Records only; never panics.
    #[inline]
    pub fn dpanic(&self, message: impl AsRef<str>) {
        self.log(LogLevel::DPanic, message);
    }

    /// Log at Panic level. Records only; never panics.
    #[inline]
    pub fn panic(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Panic, message);
    }

    /// Log at Fatal level. Records only; the process keeps running.
    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.inner.min_level)
            .field("encoding", &self.inner.encoding)
            .field("name", &self.inner.name)
            .field("fields", &self.inner.fields)
            .field("outputs", &self.inner.outputs.len())
            .field("error_outputs", &self.inner.error_outputs.len())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_channel_logger::prelude::*;
/// use rust_channel_logger::sinks::{StreamSink, StreamTarget};
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Warn)
///     .name("db")
///     .field("version", "1.0")
///     .sink(StreamSink::new(StreamTarget::Stderr))
///     .build();
///
/// logger.warn("replica lagging");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    encoding: Encoding,
    name: String,
    fields: Fields,
    outputs: Vec<SharedSink>,
    error_outputs: Vec<SharedSink>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            encoding: Encoding::Console,
            name: String::new(),
            fields: Fields::new(),
            outputs: Vec::new(),
            error_outputs: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: &Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add an owned sink as an output
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(self, sink: S) -> Self {
        let boxed: Box<dyn Sink> = Box::new(sink);
        self.output(Arc::new(Mutex::new(boxed)))
    }

    /// Add a pooled sink as an output
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: SharedSink) -> Self {
        self.outputs.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn outputs(mut self, sinks: Vec<SharedSink>) -> Self {
        self.outputs.extend(sinks);
        self
    }

    /// Sinks receiving the logger's own write failures
    #[must_use = "builder methods return a new value"]
    pub fn error_outputs(mut self, sinks: Vec<SharedSink>) -> Self {
        self.error_outputs.extend(sinks);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            inner: Arc::new(LoggerCore {
                min_level: self.min_level,
                encoding: self.encoding,
                name: self.name,
                fields: self.fields,
                outputs: self.outputs,
                error_outputs: self.error_outputs,
                metrics: Arc::new(LoggerMetrics::new()),
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
