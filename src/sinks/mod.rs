//! Sink implementations
//!
//! A sink is a destination for encoded log lines. Sinks are addressed by
//! identifier (`stdout`, `stderr`, `file://<path>` or a bare path) and
//! shared between loggers through a [`SinkPool`].

pub mod file;
pub mod pool;
pub mod stream;

pub use file::FileSink;
pub use pool::{SharedSink, SinkPool};
pub use stream::{StreamSink, StreamTarget};

use crate::core::{ConfigError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Destination for encoded log lines
pub trait Sink: Send {
    /// Write one encoded record; the sink appends the line terminator
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether console output to this sink may carry ANSI colors
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Parsed sink identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SinkTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl SinkTarget {
    /// Open the underlying resource
    pub fn open(&self) -> std::result::Result<Box<dyn Sink>, ConfigError> {
        match self {
            SinkTarget::Stdout => Ok(Box::new(StreamSink::new(StreamTarget::Stdout))),
            SinkTarget::Stderr => Ok(Box::new(StreamSink::new(StreamTarget::Stderr))),
            SinkTarget::File(path) => Ok(Box::new(FileSink::open(path)?)),
        }
    }
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Stdout => write!(f, "stdout"),
            SinkTarget::Stderr => write!(f, "stderr"),
            SinkTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for SinkTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = s.trim();
        match id {
            "" => Err(ConfigError::invalid("sink", "empty sink identifier")),
            "stdout" => Ok(SinkTarget::Stdout),
            "stderr" => Ok(SinkTarget::Stderr),
            _ => {
                let path = id.strip_prefix("file://").unwrap_or(id);
                if path.is_empty() {
                    return Err(ConfigError::invalid(
                        "sink",
                        format!("'{}' names no file", s),
                    ));
                }
                Ok(SinkTarget::File(PathBuf::from(path)))
            }
        }
    }
}
