//! Logger configuration
//!
//! A `logs` section configures the base logger and, under `channels`,
//! per-subsystem overrides:
//!
//! ```json
//! {
//!   "logs": {
//!     "level": "info",
//!     "encoding": "console",
//!     "output": ["stderr"],
//!     "errorOutput": ["stderr"],
//!     "channels": {
//!       "db": { "level": "error" },
//!       "http": { "encoding": "json", "output": "/var/log/http.log" }
//!     }
//!   }
//! }
//! ```

pub mod channel;
pub mod logger_config;

pub use channel::{ChannelConfig, ChannelRegistry};
pub use logger_config::{LoggerConfig, DEFAULT_ERROR_OUTPUT, DEFAULT_OUTPUT};

use serde::{Deserialize, Deserializer};

/// Supplies raw configuration subtrees by top-level key.
///
/// The format the configuration was read from is irrelevant here; sources
/// hand out `serde_json::Value` trees.
pub trait ConfigSource {
    fn section(&self, key: &str) -> Option<serde_json::Value>;

    fn has(&self, key: &str) -> bool {
        self.section(key).is_some()
    }
}

impl ConfigSource for serde_json::Value {
    fn section(&self, key: &str) -> Option<serde_json::Value> {
        self.get(key).filter(|v| !v.is_null()).cloned()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn section(&self, key: &str) -> Option<serde_json::Value> {
        (**self).section(key)
    }
}

/// Sink lists may be written as a single string or a list of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

pub(crate) fn sink_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?
        .map(Vec::from)
        .unwrap_or_default())
}

pub(crate) fn optional_sink_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(Vec::from))
}
