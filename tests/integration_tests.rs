//! Integration tests for the logger factory
//!
//! These tests verify:
//! - Channel overrides and inheritance end to end
//! - Process identity fields on every produced logger
//! - Lifecycle errors before init and after stop
//! - Init failures for unusable configuration
//! - Sink sharing and flushing on stop

use rust_channel_logger::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_json_lines(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("line is not JSON"))
        .collect()
}

#[test]
fn test_channel_level_override_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({
                "logs": {
                    "encoding": "json",
                    "output": [log_file.display().to_string()],
                    "channels": { "db": { "level": "error" } }
                }
            }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .expect("Failed to init");

    let db = factory.service_logger("db").expect("db logger");
    db.info("db info");
    db.warn("db warn");
    db.error("db error");

    let unknown = factory.service_logger("unknown").expect("unknown logger");
    unknown.debug("unknown debug");
    unknown.info("unknown info");

    factory.stop().expect("stop never fails");

    let records = read_json_lines(&log_file);
    assert_eq!(records.len(), 2, "records: {:?}", records);

    assert_eq!(records[0]["msg"], "db error");
    assert_eq!(records[0]["level"], "error");
    assert_eq!(records[0]["logger"], "db");
    assert_eq!(records[0]["version"], "1.0");
    assert_eq!(records[0]["cmd"], "serve");

    assert_eq!(records[1]["msg"], "unknown info");
    assert_eq!(records[1]["level"], "info");
    assert_eq!(records[1]["logger"], "unknown");
    assert_eq!(records[1]["version"], "1.0");
    assert_eq!(records[1]["cmd"], "serve");
}

#[test]
fn test_default_config_without_logs_section() {
    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({ "http": { "address": "127.0.0.1:8080" } }),
            ProcessIdentity::new("2.3.1", "worker"),
        )
        .expect("Failed to init");

    let unknown = factory.service_logger("unknown").unwrap();
    assert_eq!(unknown.level(), LogLevel::Info);
    assert_eq!(unknown.encoding(), Encoding::Console);
    assert_eq!(unknown.name(), "unknown");
    assert_eq!(unknown.fields().format_fields(), "version=2.3.1 cmd=worker");

    factory.stop().unwrap();
}

#[test]
fn test_channel_with_own_file_and_encoding() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base_file = temp_dir.path().join("base.log");
    let http_file = temp_dir.path().join("http.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({
                "logs": {
                    "level": "debug",
                    "output": base_file.display().to_string(),
                    "channels": {
                        "http": { "encoding": "json", "output": http_file.display().to_string() }
                    }
                }
            }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let base = factory.base_logger().unwrap();
    let http = factory.service_logger("http").unwrap();
    assert_eq!(http.level(), LogLevel::Debug, "level inherited from base");

    base.debug("base debug");
    http.debug("request received");

    factory.stop().unwrap();

    // Console lines in files carry no color codes
    let base_content = fs::read_to_string(&base_file).unwrap();
    assert!(!base_content.contains('\u{1b}'));
    let columns: Vec<&str> = base_content.trim_end().split('\t').collect();
    assert_eq!(columns[1], "DEBUG");
    assert_eq!(columns[2], "base debug");
    assert_eq!(columns[3], r#"{"version":"1.0","cmd":"serve"}"#);

    let http_records = read_json_lines(&http_file);
    assert_eq!(http_records.len(), 1);
    assert_eq!(http_records[0]["logger"], "http");
    assert_eq!(http_records[0]["msg"], "request received");
}

#[test]
fn test_same_channel_loggers_behave_alike() {
    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({ "logs": { "channels": { "db": { "level": "warn", "encoding": "json" } } } }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let first = factory.service_logger("db").unwrap();
    let second = factory.service_logger("db").unwrap();

    assert_eq!(first.level(), second.level());
    assert_eq!(first.encoding(), second.encoding());
    assert_eq!(first.name(), second.name());
    assert_eq!(first.fields(), second.fields());
    assert_eq!(first.sink_count(), second.sink_count());
}

#[test]
fn test_lifecycle_errors() {
    let factory = LoggerFactory::new();
    let err = factory.service_logger("db").unwrap_err();
    assert!(matches!(err, LoggerError::Lifecycle { state: "uninitialized", .. }));

    factory
        .init(&json!({}), ProcessIdentity::new("1.0", "serve"))
        .unwrap();
    factory.stop().unwrap();

    let err = factory.service_logger("db").unwrap_err();
    assert!(matches!(err, LoggerError::Lifecycle { state: "stopped", .. }));
}

#[test]
fn test_unopenable_sink_fails_init() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing").join("app.log");

    let factory = LoggerFactory::new();
    let err = factory
        .init(
            &json!({ "logs": { "output": missing.display().to_string() } }),
            ProcessIdentity::default(),
        )
        .unwrap_err();

    match err {
        LoggerError::Init { source, .. } => {
            assert!(matches!(source, ConfigError::SinkOpen { .. }))
        }
        other => panic!("expected init error, got {:?}", other),
    }
    assert!(!factory.is_initialized());
}

#[test]
fn test_unopenable_channel_sink_fails_request() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing").join("db.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({ "logs": { "channels": { "db": { "output": missing.display().to_string() } } } }),
            ProcessIdentity::default(),
        )
        .unwrap();

    let err = factory.service_logger("db").unwrap_err();
    assert!(matches!(err, LoggerError::Config(ConfigError::SinkOpen { .. })));

    // Other channels are unaffected
    assert!(factory.service_logger("http").is_ok());
}

#[test]
fn test_bad_channel_config_fails_init() {
    let factory = LoggerFactory::new();
    let err = factory
        .init(
            &json!({ "logs": { "channels": { "db": { "encoding": "xml" } } } }),
            ProcessIdentity::default(),
        )
        .unwrap_err();

    assert!(err.is_init());
    assert!(err.to_string().contains("logs plugin init"));
}

#[test]
fn test_stop_flushes_channel_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_file = temp_dir.path().join("db.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({ "logs": { "channels": { "db": { "output": [db_file.display().to_string()] } } } }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let db = factory.service_logger("db").unwrap();
    for i in 0..10 {
        db.info(format!("query {}", i));
    }

    factory.stop().unwrap();

    let content = fs::read_to_string(&db_file).unwrap();
    assert_eq!(content.lines().count(), 10);
}

#[test]
fn test_channels_naming_one_file_share_it() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let shared = temp_dir.path().join("shared.log").display().to_string();

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({
                "logs": {
                    "encoding": "json",
                    "channels": {
                        "db": { "output": shared },
                        "cache": { "output": [shared], "level": "debug" }
                    }
                }
            }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let db = factory.service_logger("db").unwrap();
    let cache = factory.service_logger("cache").unwrap();
    db.info("from db");
    cache.debug("from cache");
    db.info("from db again");

    factory.stop().unwrap();

    let records = read_json_lines(Path::new(&shared));
    let messages: Vec<&str> = records.iter().map(|r| r["msg"].as_str().unwrap()).collect();
    assert_eq!(messages, vec!["from db", "from cache", "from db again"]);
}

#[test]
fn test_channel_name_cannot_forge_console_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("console.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({ "logs": { "output": log_file.display().to_string() } }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let logger = factory
        .service_logger("x\n2026-01-01T00:00:00.000Z\tERROR\tforged")
        .unwrap();
    logger.info("hello");
    factory.stop().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(content.lines().next().unwrap().split('\t').nth(1), Some("INFO"));
}

#[test]
fn test_record_fields_cannot_replace_json_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("json.log");

    let factory = LoggerFactory::new();
    factory
        .init(
            &json!({
                "logs": {
                    "encoding": "json",
                    "output": log_file.display().to_string(),
                    "channels": { "db": { "level": "debug" } }
                }
            }),
            ProcessIdentity::new("1.0", "serve"),
        )
        .unwrap();

    let db = factory.service_logger("db").unwrap();
    db.log_with_fields(
        LogLevel::Error,
        "real message",
        &Fields::new()
            .with_field("msg", "forged")
            .with_field("level", "debug")
            .with_field("logger", "other"),
    );
    factory.stop().unwrap();

    let records = read_json_lines(&log_file);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "real message");
    assert_eq!(records[0]["level"], "error");
    assert_eq!(records[0]["logger"], "db");
    assert_eq!(records[0]["fields.msg"], "forged");
    assert_eq!(records[0]["version"], "1.0");
}
