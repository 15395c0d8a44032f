//! Channel logging example
//!
//! Demonstrates a base logger plus per-subsystem channels with their own
//! levels and encodings.
//!
//! Run with: cargo run --example channels

use rust_channel_logger::prelude::*;
use rust_channel_logger::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Rust Channel Logger - Channels Example ===\n");

    let config = json!({
        "logs": {
            "level": "debug",
            "encoding": "console",
            "output": ["stdout"],
            "channels": {
                "db": { "level": "error" },
                "http": { "encoding": "json" }
            }
        }
    });

    let factory = LoggerFactory::new();
    factory.init(&config, ProcessIdentity::new(env!("CARGO_PKG_VERSION"), "demo"))?;

    println!("1. Base logger:");
    let base = factory.base_logger()?;
    base.debug("base logger ready");

    println!("\n2. The db channel only emits errors:");
    let db = factory.service_logger("db")?;
    db.info("connection pool warmed (hidden)");
    db.error("replica unreachable");

    println!("\n3. The http channel inherits the level but encodes JSON:");
    let http = factory.service_logger("http")?;
    let port = 8080;
    info!(http, "listening on port {}", port);
    http.with_field("path", "/health").debug("probe");

    println!("\n4. Unknown channels use the base settings:");
    let jobs = factory.service_logger("jobs")?;
    warn!(jobs, "retry attempt {} of {}", 2, 5);

    factory.stop()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
