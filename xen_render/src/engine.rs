/// Xen engine facade - process-wide services
///
/// Holds the replaceable logger used by the `engine_*` macros and the
/// default change-index source shared by cameras that are not given an
/// explicit one. Both are created lazily on first use.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::camera::ChangeIndexSource;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Process-wide change-index source
static CHANGE_INDEX_SOURCE: OnceLock<ChangeIndexSource> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Process-wide services of the render core
///
/// # Example
///
/// ```no_run
/// use xen_render::xen::{Engine, camera::Camera3D};
///
/// // Every camera built from the shared source gets globally unique change indices
/// let camera = Camera3D::new(&Engine::change_index_source());
/// ```
pub struct Engine;

impl Engine {
    /// The process-wide change-index source
    ///
    /// Cameras and projections built from clones of this source never
    /// report the same change index for two distinct mutations. Tests and
    /// tools that want isolated numbering can create their own
    /// `ChangeIndexSource` instead.
    pub fn change_index_source() -> ChangeIndexSource {
        CHANGE_INDEX_SOURCE.get_or_init(ChangeIndexSource::new).clone()
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xen_render::xen::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct Silent;
    /// impl Logger for Silent {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// Engine::set_logger(Silent);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_trace!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and engine_err! to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
