//! Error types for the channel logger

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Malformed or unusable configuration value
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Level name not recognised
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Encoding name not recognised
    #[error("Unsupported encoding: '{0}'")]
    UnsupportedEncoding(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A sink identifier could not be opened
    #[error("Failed to open sink '{sink}': {source}")]
    SinkOpen {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration section did not deserialize
    #[error("Malformed configuration section '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(component: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink open error
    pub fn sink_open(sink: impl Into<String>, source: std::io::Error) -> Self {
        ConfigError::SinkOpen {
            sink: sink.into(),
            source,
        }
    }

    /// Create a malformed section error
    pub fn malformed(key: impl Into<String>, source: serde_json::Error) -> Self {
        ConfigError::Malformed {
            key: key.into(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Startup failed; the host must not proceed without a logger
    #[error("{op}: {source}")]
    Init {
        op: &'static str,
        #[source]
        source: ConfigError,
    },

    /// Configuration error outside of startup
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Factory method invoked outside its valid state
    #[error("{operation} called while the logger factory is {state}")]
    Lifecycle {
        operation: &'static str,
        state: &'static str,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    /// Wrap a configuration error raised during startup
    pub fn init(op: &'static str, source: ConfigError) -> Self {
        LoggerError::Init { op, source }
    }

    /// Create a lifecycle error
    pub fn lifecycle(operation: &'static str, state: &'static str) -> Self {
        LoggerError::Lifecycle { operation, state }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, LoggerError::Lifecycle { .. })
    }

    pub fn is_init(&self) -> bool {
        matches!(self, LoggerError::Init { .. })
    }
}
