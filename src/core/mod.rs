//! Core logger types

pub mod encoding;
pub mod error;
pub mod fields;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod render;

pub use encoding::Encoding;
pub use error::{ConfigError, LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use render::{LevelRenderer, NameRenderer, NAME_COLUMN_WIDTH};
