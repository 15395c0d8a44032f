//! Logger factory: loads the `logs` section once, owns the base logger and
//! vends per-channel loggers on request.
//!
//! Lifecycle: `Uninitialized -> Initialized -> Stopped`.
//!
//! ```
//! use rust_channel_logger::{LoggerFactory, LogLevel, ProcessIdentity};
//! use serde_json::json;
//!
//! let factory = LoggerFactory::new();
//! factory
//!     .init(
//!         &json!({ "logs": { "channels": { "db": { "level": "error" } } } }),
//!         ProcessIdentity::new("1.0", "serve"),
//!     )
//!     .unwrap();
//!
//! let db = factory.service_logger("db").unwrap();
//! assert_eq!(db.level(), LogLevel::Error);
//! assert_eq!(db.name(), "db");
//!
//! factory.stop().unwrap();
//! assert!(factory.service_logger("db").is_err());
//! ```

use crate::config::{ChannelRegistry, ConfigSource, LoggerConfig};
use crate::core::{ConfigError, Fields, Logger, LoggerError, Result};
use crate::sinks::SinkPool;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;

/// Configuration key and display name of this component
pub const PLUGIN_NAME: &str = "logs";

const INIT_OP: &str = "logs plugin init";

/// Version and command of the running process, attached as `version` and
/// `cmd` fields to every logger the factory produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub version: String,
    pub cmd: String,
}

impl ProcessIdentity {
    pub fn new(version: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            cmd: cmd.into(),
        }
    }

    pub fn fields(&self) -> Fields {
        Fields::new()
            .with_field("version", self.version.as_str())
            .with_field("cmd", self.cmd.as_str())
    }
}

/// Anything that can name the channel it wants a logger for
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

struct Running {
    base_config: LoggerConfig,
    channels: ChannelRegistry,
    identity: Fields,
    base: Logger,
    pool: SinkPool,
    // Held so `serve` receivers stay connected until stop
    _serve_tx: Sender<LoggerError>,
    serve_rx: Receiver<LoggerError>,
}

enum State {
    Uninitialized,
    Initialized(Box<Running>),
    Stopped,
}

impl State {
    fn label(&self) -> &'static str {
        match self {
            State::Uninitialized => "uninitialized",
            State::Initialized(_) => "initialized",
            State::Stopped => "stopped",
        }
    }
}

/// Owns the base logger and hands out channel loggers.
///
/// All methods take `&self`; the factory can be shared across threads
/// (for example behind an `Arc`) and `service_logger` called concurrently.
pub struct LoggerFactory {
    state: RwLock<State>,
}

impl LoggerFactory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::Uninitialized),
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn is_initialized(&self) -> bool {
        matches!(*self.state.read(), State::Initialized(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(*self.state.read(), State::Stopped)
    }

    /// Load configuration, build the base logger and attach `identity`.
    ///
    /// When `source` has no `logs` section the base logger uses the hard
    /// defaults and no channel overrides exist.
    pub fn init(&self, source: &impl ConfigSource, identity: ProcessIdentity) -> Result<()> {
        let mut state = self.state.write();
        if !matches!(*state, State::Uninitialized) {
            return Err(LoggerError::lifecycle("init", state.label()));
        }

        let (mut base_config, channels) = match source.section(PLUGIN_NAME) {
            Some(section) => (
                LoggerConfig::from_section(&section).map_err(init_error)?,
                ChannelRegistry::from_section(&section).map_err(init_error)?,
            ),
            None => (LoggerConfig::default(), ChannelRegistry::new()),
        };

        base_config.init_default();

        let pool = SinkPool::new();
        let identity = identity.fields();
        let base = base_config
            .build_logger_in(&pool)
            .map_err(init_error)?
            .with_fields(&identity);

        let (serve_tx, serve_rx) = bounded(1);
        *state = State::Initialized(Box::new(Running {
            base_config,
            channels,
            identity,
            base,
            pool,
            _serve_tx: serve_tx,
            serve_rx,
        }));

        Ok(())
    }

    /// Long-running signal for the host. Nothing is ever sent during normal
    /// operation; the channel disconnects once the factory stops.
    pub fn serve(&self) -> Result<Receiver<LoggerError>> {
        match &*self.state.read() {
            State::Initialized(running) => Ok(running.serve_rx.clone()),
            other => Err(LoggerError::lifecycle("serve", other.label())),
        }
    }

    /// Flush the base logger and every sink the factory opened.
    ///
    /// Flush failures are reported on stderr and swallowed: shutdown of the
    /// host must never fail because of logging. Stopping a factory that is
    /// not running does nothing.
    pub fn stop(&self) -> Result<()> {
        let mut state = self.state.write();
        let running = match std::mem::replace(&mut *state, State::Stopped) {
            State::Initialized(running) => running,
            other => {
                *state = other;
                return Ok(());
            }
        };

        if let Err(e) = running.base.sync() {
            eprintln!("[LOGGER WARNING] Failed to sync base logger during stop: {}", e);
        }
        for e in running.pool.sync_all() {
            eprintln!("[LOGGER WARNING] Failed to sync sink during stop: {}", e);
        }
        running.pool.clear();

        Ok(())
    }

    /// Shared base logger carrying the process identity fields
    pub fn base_logger(&self) -> Result<Logger> {
        match &*self.state.read() {
            State::Initialized(running) => Ok(running.base.clone()),
            other => Err(LoggerError::lifecycle("base_logger", other.label())),
        }
    }

    /// Logger dedicated to `channel`.
    ///
    /// A configured channel gets its override merged over the base config;
    /// any other name gets the base logger's settings. Either way the
    /// logger is labelled with the channel name and carries the process
    /// identity fields.
    pub fn service_logger<N: Named + ?Sized>(&self, channel: &N) -> Result<Logger> {
        match &*self.state.read() {
            State::Initialized(running) => running.named_logger(channel.name()),
            other => Err(LoggerError::lifecycle("service_logger", other.label())),
        }
    }
}

impl Running {
    fn named_logger(&self, name: &str) -> Result<Logger> {
        if !self.channels.contains(name) {
            return Ok(self.base.named(name));
        }

        let resolved = self.channels.resolve(name, &self.base_config);
        let logger = resolved.build_logger_in(&self.pool)?;
        Ok(logger.named(name).with_fields(&self.identity))
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn init_error(source: ConfigError) -> LoggerError {
    LoggerError::init(INIT_OP, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Encoding, LogLevel};
    use serde_json::json;

    fn factory_with(raw: serde_json::Value) -> LoggerFactory {
        let factory = LoggerFactory::new();
        factory
            .init(&raw, ProcessIdentity::new("1.0", "serve"))
            .expect("init failed");
        factory
    }

    #[test]
    fn test_factory_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoggerFactory>();
    }

    #[test]
    fn test_defaults_without_section() {
        let factory = factory_with(json!({}));
        let base = factory.base_logger().unwrap();

        assert_eq!(base.level(), LogLevel::Info);
        assert_eq!(base.encoding(), Encoding::Console);
        assert_eq!(base.name(), "");
        assert_eq!(base.fields().format_fields(), "version=1.0 cmd=serve");
    }

    #[test]
    fn test_channel_override_and_inheritance() {
        let factory = factory_with(json!({
            "logs": {
                "level": "debug",
                "encoding": "json",
                "channels": { "db": { "level": "error" } }
            }
        }));

        let db = factory.service_logger("db").unwrap();
        assert_eq!(db.level(), LogLevel::Error);
        assert_eq!(db.encoding(), Encoding::Json);
        assert_eq!(db.name(), "db");
        assert_eq!(db.fields().format_fields(), "version=1.0 cmd=serve");

        let other = factory.service_logger(&"http".to_string()).unwrap();
        assert_eq!(other.level(), LogLevel::Debug);
        assert_eq!(other.name(), "http");
        assert_eq!(other.fields().format_fields(), "version=1.0 cmd=serve");
    }

    #[test]
    fn test_lifecycle_errors() {
        let factory = LoggerFactory::new();
        assert!(factory.service_logger("db").unwrap_err().is_lifecycle());
        assert!(factory.base_logger().unwrap_err().is_lifecycle());
        assert!(factory.serve().unwrap_err().is_lifecycle());

        factory
            .init(&json!({}), ProcessIdentity::new("1.0", "serve"))
            .unwrap();
        assert!(factory.is_initialized());
        let again = factory.init(&json!({}), ProcessIdentity::default());
        assert!(again.unwrap_err().is_lifecycle());

        factory.stop().unwrap();
        assert!(factory.is_stopped());
        assert!(factory.service_logger("db").unwrap_err().is_lifecycle());
        assert!(factory.init(&json!({}), ProcessIdentity::default()).is_err());
    }

    #[test]
    fn test_stop_is_safe_to_repeat() {
        let factory = LoggerFactory::new();
        factory.stop().unwrap();
        assert!(!factory.is_stopped());

        let factory = factory_with(json!({}));
        factory.stop().unwrap();
        factory.stop().unwrap();
        assert!(factory.is_stopped());
    }

    #[test]
    fn test_init_error_wraps_config_error() {
        let factory = LoggerFactory::new();
        let err = factory
            .init(
                &json!({ "logs": { "encoding": "yaml" } }),
                ProcessIdentity::default(),
            )
            .unwrap_err();

        assert!(err.is_init());
        assert!(err.to_string().contains("yaml"));
        assert!(!factory.is_initialized());
    }

    #[test]
    fn test_serve_disconnects_on_stop() {
        let factory = factory_with(json!({}));
        let signal = factory.serve().unwrap();
        assert!(matches!(
            signal.try_recv(),
            Err(crossbeam_channel::TryRecvError::Empty)
        ));

        factory.stop().unwrap();
        assert!(matches!(
            signal.try_recv(),
            Err(crossbeam_channel::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn test_name() {
        assert_eq!(LoggerFactory::new().name(), "logs");
    }
}
