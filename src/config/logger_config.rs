//! Base logger configuration: defaulting and construction

use super::sink_list;
use crate::core::{ConfigError, Encoding, LogLevel, Logger};
use crate::sinks::SinkPool;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT: &str = "stderr";
pub const DEFAULT_ERROR_OUTPUT: &str = "stderr";

/// Base logger configuration.
///
/// Fields are unset until [`LoggerConfig::init_default`] fills them; a
/// config must be defaulted before [`LoggerConfig::build_logger`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    #[serde(deserialize_with = "sink_list")]
    pub output: Vec<String>,

    #[serde(alias = "error_output", deserialize_with = "sink_list")]
    pub error_output: Vec<String>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the base configuration out of a `logs` section. Keys that are
    /// not base settings (such as `channels`) are ignored.
    pub fn from_section(section: &serde_json::Value) -> Result<Self, ConfigError> {
        Self::deserialize(section).map_err(|e| ConfigError::malformed("logs", e))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output.push(output.into());
        self
    }

    #[must_use]
    pub fn with_error_output(mut self, output: impl Into<String>) -> Self {
        self.error_output.push(output.into());
        self
    }

    /// Fill every unset field with its hard default. Idempotent.
    pub fn init_default(&mut self) {
        if self.level.is_none() {
            self.level = Some(LogLevel::Info);
        }
        if self.encoding.is_none() {
            self.encoding = Some(Encoding::Console);
        }
        if self.output.is_empty() {
            self.output = vec![DEFAULT_OUTPUT.to_string()];
        }
        if self.error_output.is_empty() {
            self.error_output = vec![DEFAULT_ERROR_OUTPUT.to_string()];
        }
    }

    pub fn is_defaulted(&self) -> bool {
        self.level.is_some()
            && self.encoding.is_some()
            && !self.output.is_empty()
            && !self.error_output.is_empty()
    }

    /// Build a logger owning freshly opened sinks.
    pub fn build_logger(&self) -> Result<Logger, ConfigError> {
        self.build_logger_in(&SinkPool::new())
    }

    /// Build a logger whose sinks come from `pool`.
    ///
    /// Outputs and error outputs are opened in one call, so a failure on
    /// any of them leaves nothing open.
    pub fn build_logger_in(&self, pool: &SinkPool) -> Result<Logger, ConfigError> {
        let level = self
            .level
            .ok_or_else(|| ConfigError::invalid("level", "unset; call init_default first"))?;
        let encoding = self
            .encoding
            .ok_or_else(|| ConfigError::invalid("encoding", "unset; call init_default first"))?;
        if self.output.is_empty() {
            return Err(ConfigError::invalid("output", "no sinks configured"));
        }

        let ids = [self.output.as_slice(), self.error_output.as_slice()].concat();
        let mut outputs = pool.open_all(&ids)?;
        let error_outputs = outputs.split_off(self.output.len());

        Ok(Logger::builder()
            .min_level(level)
            .encoding(encoding)
            .outputs(outputs)
            .error_outputs(error_outputs)
            .build())
    }
}
