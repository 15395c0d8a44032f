//! # Rust Channel Logger
//!
//! Per-subsystem structured logging. A process keeps one base logger plus
//! named channels, each with its own level, encoding and sinks; unset
//! channel settings fall through to the base configuration.
//!
//! ## Features
//!
//! - **Channels**: field-level overrides layered on a shared base config
//! - **Process identity**: `version` and `cmd` fields on every logger
//! - **Encodings**: colorized console text or one JSON object per line
//! - **Thread Safe**: loggers and the factory are `Send + Sync`

pub mod config;
pub mod core;
pub mod factory;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{ChannelConfig, ChannelRegistry, ConfigSource, LoggerConfig};
    pub use crate::core::{
        ConfigError, Encoding, FieldValue, Fields, LevelRenderer, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, NameRenderer, Result,
    };
    pub use crate::factory::{LoggerFactory, Named, ProcessIdentity, PLUGIN_NAME};
}

pub use config::{ChannelConfig, ChannelRegistry, ConfigSource, LoggerConfig};
pub use core::{
    ConfigError, Encoding, FieldValue, Fields, LevelRenderer, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, NameRenderer, Result, NAME_COLUMN_WIDTH,
};
pub use factory::{LoggerFactory, Named, ProcessIdentity, PLUGIN_NAME};
