//! Record encodings
//!
//! - Console: tab-separated, human-readable, colorized on terminals
//! - Json: one machine-readable object per line

use super::error::ConfigError;
use super::log_entry::LogEntry;
use super::render::{LevelRenderer, NameRenderer};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys owned by the JSON record itself. Fields using them are written
/// under a `fields.` prefix.
const RESERVED_JSON_KEYS: [&str; 4] = ["level", "ts", "logger", "msg"];

/// Output encoding for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08T10:30:45.123Z	INFO	db          	connected	{"version":"1.0","cmd":"serve"}`
    #[default]
    Console,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"info","ts":"2025-01-08T10:30:45.123Z","logger":"db","msg":"connected","version":"1.0"}`
    Json,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Console => "console",
            Encoding::Json => "json",
        }
    }

    /// Encode a record as a single line without trailing newline.
    ///
    /// `colorize` only affects the console encoding.
    pub fn encode(&self, entry: &LogEntry, colorize: bool) -> String {
        match self {
            Encoding::Console => self.encode_console(entry, colorize),
            Encoding::Json => self.encode_json(entry),
        }
    }

    fn encode_console(&self, entry: &LogEntry, colorize: bool) -> String {
        let timestamp = entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        let level = if colorize {
            LevelRenderer::render(entry.level).to_string()
        } else {
            LevelRenderer::plain(entry.level).to_string()
        };

        let mut parts = vec![timestamp, level];

        if !entry.logger_name.is_empty() {
            let name = if colorize {
                NameRenderer::render(&entry.logger_name).to_string()
            } else {
                NameRenderer::pad(&entry.logger_name)
            };
            parts.push(name);
        }

        parts.push(entry.message.clone());

        if !entry.fields.is_empty() {
            let object = serde_json::Value::Object(entry.fields.to_json_object());
            parts.push(object.to_string());
        }

        parts.join("\t")
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.as_lowercase().to_string()),
        );
        json_obj.insert(
            "ts".to_string(),
            serde_json::Value::String(
                entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        if !entry.logger_name.is_empty() {
            json_obj.insert(
                "logger".to_string(),
                serde_json::Value::String(entry.logger_name.clone()),
            );
        }
        json_obj.insert(
            "msg".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        for (key, value) in entry.fields.iter() {
            let key = if RESERVED_JSON_KEYS.contains(&key.as_str()) {
                format!("fields.{}", key)
            } else {
                key.clone()
            };
            json_obj.insert(key, value.to_json_value());
        }

        serde_json::Value::Object(json_obj).to_string()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(Encoding::Console),
            "json" => Ok(Encoding::Json),
            _ => Err(ConfigError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.as_str().to_string()
    }
}
