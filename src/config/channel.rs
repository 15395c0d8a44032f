//! Channel overrides and their resolution against the base configuration

use super::logger_config::LoggerConfig;
use super::optional_sink_list;
use crate::core::{ConfigError, Encoding, LogLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-channel override. Every unset field inherits from the base config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_sink_list"
    )]
    pub output: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        alias = "error_output",
        deserialize_with = "optional_sink_list"
    )]
    pub error_output: Option<Vec<String>>,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
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
    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use]
    pub fn with_error_output(mut self, output: Vec<String>) -> Self {
        self.error_output = Some(output);
        self
    }

    /// Overlay this channel on `base`, field by field.
    ///
    /// An empty sink list counts as unset so a channel can never end up
    /// without outputs.
    pub fn merge_over(&self, base: &LoggerConfig) -> LoggerConfig {
        LoggerConfig {
            level: self.level.or(base.level),
            encoding: self.encoding.or(base.encoding),
            output: non_empty(&self.output).unwrap_or_else(|| base.output.clone()),
            error_output: non_empty(&self.error_output)
                .unwrap_or_else(|| base.error_output.clone()),
        }
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().filter(|l| !l.is_empty()).cloned()
}

/// Channel name to override mapping. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRegistry {
    channels: HashMap<String, ChannelConfig>,
}

#[derive(Deserialize)]
struct ChannelsSection {
    #[serde(default)]
    channels: Option<HashMap<String, ChannelConfig>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(name, config)` pairs.
    ///
    /// Fails on an empty or duplicated channel name.
    pub fn from_channels<I, S>(channels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, ChannelConfig)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (name, cfg) in channels {
            let name = name.into();
            if name.is_empty() {
                return Err(ConfigError::invalid(
                    "channels",
                    "channel name must not be empty",
                ));
            }
            if map.insert(name.clone(), cfg).is_some() {
                return Err(ConfigError::invalid(
                    "channels",
                    format!("channel '{}' defined twice", name),
                ));
            }
        }
        Ok(Self { channels: map })
    }

    /// Read the `channels` mapping out of a `logs` section. A missing or
    /// null mapping yields an empty registry.
    pub fn from_section(section: &serde_json::Value) -> Result<Self, ConfigError> {
        let parsed = ChannelsSection::deserialize(section)
            .map_err(|e| ConfigError::malformed("logs.channels", e))?;
        Self::from_channels(parsed.channels.unwrap_or_default())
    }

    /// Configuration that applies to `name`: the channel's override merged
    /// over `base`, or `base` itself for an unknown channel.
    ///
    /// Exact name match only; `db.replica` does not inherit from `db`.
    pub fn resolve(&self, name: &str, base: &LoggerConfig) -> LoggerConfig {
        match self.channels.get(name) {
            Some(channel) => channel.merge_over(base),
            None => base.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
