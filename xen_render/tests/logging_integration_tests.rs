//! Integration tests for the Engine logging system
//!
//! Verifies custom loggers, severities, and the entries the render core
//! emits for errors and camera stack transitions.
//!
//! Run with: cargo test --test logging_integration_tests

use xen_render::glam::{Vec2, Vec3};
use xen_render::xen::Engine;
use xen_render::xen::camera::{share_camera, Camera3D, ChangeIndexSource};
use xen_render::xen::draw::DrawState;
use xen_render::xen::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries.lock().unwrap().iter().filter(|e| e.source == source).cloned().collect()
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    let captured = from_source(&entries, "test::module");
    assert_eq!(captured.len(), 3);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].message, "Test info message");
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[2].severity, LogSeverity::Error);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let captured = from_source(&entries, "test::error");
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].file, Some("test_file.rs"));
    assert_eq!(captured[0].line, Some(42));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(from_source(&entries, "test").len(), 1);

    Engine::reset_logger();

    // Goes to the default logger, not captured
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(from_source(&entries, "test").len(), 1);
}

// ============================================================================
// RENDER CORE LOGGING
// ============================================================================

#[test]
#[serial]
fn test_integration_in_use_violation_logged_as_error() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let source = ChangeIndexSource::new();
    let camera = share_camera(Camera3D::new(&source));
    let mut state = DrawState::default();
    state.push_camera(camera.clone()).unwrap();

    let result = camera.lock().unwrap().set_position(Vec3::X);
    assert!(result.is_err());

    let errors = from_source(&entries, "xen::Camera3D");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);
    assert!(errors[0].message.contains("set_position"));
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());

    state.pop_camera().unwrap();
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_camera_stack_traces_push_and_pop() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let source = ChangeIndexSource::new();
    let mut state = DrawState::default();
    state.begin_pass_with_size(Vec2::new(800.0, 600.0)).unwrap();
    state.push_camera(share_camera(Camera3D::new(&source))).unwrap();
    state.pop_camera().unwrap();
    state.end_pass().unwrap();

    let stack = from_source(&entries, "xen::CameraStack");
    assert_eq!(stack.len(), 2);
    assert!(stack.iter().all(|e| e.severity == LogSeverity::Trace));
    assert_eq!(from_source(&entries, "xen::DrawState").len(), 2);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_underflow_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut state = DrawState::default();
    assert!(state.pop_camera().is_err());

    let errors = from_source(&entries, "xen::CameraStack");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);

    Engine::reset_logger();
}
