//! crates/logging/src/thread_local.rs
//! Thread-local storage for logging configuration and event collection.

use super::config::LogConfig;
use super::levels::Level;
use std::cell::RefCell;

thread_local! {
    static CONFIG: RefCell<LogConfig> = RefCell::new(LogConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<LogEvent>> = RefCell::new(Vec::new());
}

/// Message captured on the current thread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEvent {
    /// Severity of the message.
    pub level: Level,
    /// Rendered message text.
    pub message: String,
}

/// Installs `config` for the current thread.
pub fn init(config: LogConfig) {
    CONFIG.with(|c| {
        *c.borrow_mut() = config;
    });
}

/// Returns a copy of the current thread's configuration.
pub fn config() -> LogConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Reports whether `level` passes the current thread's configuration.
pub fn enabled(level: Level) -> bool {
    CONFIG.with(|c| c.borrow().allows(level))
}

/// Reports whether verbose output is enabled on the current thread.
pub fn verbose() -> bool {
    CONFIG.with(|c| {
        let config = c.borrow();
        config.verbose && !config.disabled
    })
}

/// Records a message in the current thread's event buffer.
pub fn emit(level: Level, message: String) {
    EVENTS.with(|e| {
        e.borrow_mut().push(LogEvent { level, message });
    });
}

/// Drains all collected events, clearing the buffer.
pub fn drain_events() -> Vec<LogEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}
