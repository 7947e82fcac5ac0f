//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry construction, DefaultLogger output
//! paths and custom Logger implementations.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::Mutex;
use std::time::SystemTime;

fn entry(severity: LogSeverity, source: &str, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug_names() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_without_location() {
    let e = entry(LogSeverity::Trace, "xen::CameraStack", "push Camera3D (height 1)");

    assert_eq!(e.severity, LogSeverity::Trace);
    assert_eq!(e.source, "xen::CameraStack");
    assert!(e.file.is_none());
    assert!(e.line.is_none());
}

#[test]
fn test_log_entry_with_location() {
    let e = LogEntry {
        file: Some("camera_3d.rs"),
        line: Some(42),
        ..entry(LogSeverity::Error, "xen::Camera3D", "camera in use")
    };

    assert_eq!(e.file, Some("camera_3d.rs"));
    assert_eq!(e.line, Some(42));
    let copy = e.clone();
    assert_eq!(copy.message, "camera in use");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;

    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, "xen::test", "plain"));
        logger.log(&LogEntry {
            file: Some("test.rs"),
            line: Some(7),
            ..entry(severity, "xen::test", "with location")
        });
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    count: Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger { count: Mutex::new(0) };

    logger.log(&entry(LogSeverity::Info, "xen::test", "a"));
    logger.log(&entry(LogSeverity::Info, "xen::test", "b"));

    assert_eq!(*logger.count.lock().unwrap(), 2);
}

#[test]
fn test_logger_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<CountingLogger>();
}
