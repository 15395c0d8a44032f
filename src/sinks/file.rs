//! File sink implementation

use super::Sink;
use crate::core::{ConfigError, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered, append-only file sink.
///
/// Buffered lines reach the file on `flush` or when the sink is dropped.
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
    label: String,
}

impl FileSink {
    /// Open `path` for appending, creating the file if needed.
    ///
    /// Parent directories are not created; a missing directory is a
    /// configuration error.
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ConfigError::sink_open(label.clone(), e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            label,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| LoggerError::io_operation("writing log line", &self.label, e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .and_then(|()| self.writer.get_ref().sync_data())
            .map_err(|e| LoggerError::io_operation("syncing", &self.label, e))
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush '{}' on close: {}", self.label, e);
        }
    }
}
