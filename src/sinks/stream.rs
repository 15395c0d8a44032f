//! Standard stream sinks

use super::Sink;
use crate::core::{LoggerError, Result};
use std::io::{IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

/// Writes lines to the process's stdout or stderr.
///
/// Each line is written while holding the stream lock, so lines from
/// different threads never interleave.
pub struct StreamSink {
    target: StreamTarget,
    terminal: bool,
}

impl StreamSink {
    pub fn new(target: StreamTarget) -> Self {
        let terminal = match target {
            StreamTarget::Stdout => std::io::stdout().is_terminal(),
            StreamTarget::Stderr => std::io::stderr().is_terminal(),
        };
        Self { target, terminal }
    }

    pub fn target(&self) -> StreamTarget {
        self.target
    }
}

impl Sink for StreamSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let result = match self.target {
            StreamTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            StreamTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
        result.map_err(|e| LoggerError::io_operation("writing log line", self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        let result = match self.target {
            StreamTarget::Stdout => std::io::stdout().flush(),
            StreamTarget::Stderr => std::io::stderr().flush(),
        };
        result.map_err(|e| LoggerError::io_operation("flushing", self.name(), e))
    }

    fn name(&self) -> &str {
        match self.target {
            StreamTarget::Stdout => "stdout",
            StreamTarget::Stderr => "stderr",
        }
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
