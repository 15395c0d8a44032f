//! Formatting macros over a [`Logger`](crate::Logger).
//!
//! The message is only formatted when the logger would emit it.
//!
//! ```
//! use rust_channel_logger::prelude::*;
//! use rust_channel_logger::{info, warn};
//!
//! let logger = Logger::builder().build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! warn!(logger, "retry attempt {} of {}", 3, 5);
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use rust_channel_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_channel_logger::log;
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level = $level;
        if $logger.enabled(level) {
            $logger.log(level, format!($($arg)+));
        } else {
            $logger.metrics().record_filtered();
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
