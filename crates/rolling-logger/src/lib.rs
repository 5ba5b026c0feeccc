//! Rolling Logger
//!
//! `log` backend for extension contexts. Lines go to the browser console
//! (stderr off-wasm) and the most recent ones are kept in a bounded ring.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

/// Console logger with a circular buffer of recent lines
pub struct RollingLogger {
    /// Prefix identifying the context, e.g. "content" or "background"
    context: String,
    level: LevelFilter,
    capacity: usize,
    buffer: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(context: impl Into<String>, level: LevelFilter, capacity: usize) -> Self {
        Self {
            context: context.into(),
            level,
            capacity: capacity.max(1),
            buffer: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Recent lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn format(&self, record: &Record) -> String {
        format!(
            "[{}] [{}] {} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.context,
            record.level(),
            record.target(),
            record.args()
        )
    }

    fn push(&self, line: String) {
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(line);
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);
        write_console(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

static GLOBAL: OnceLock<&'static RollingLogger> = OnceLock::new();

/// Install the global logger. Call once per context.
pub fn init(context: &str, level: LevelFilter) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger: &'static RollingLogger =
        Box::leak(Box::new(RollingLogger::new(context, level, DEFAULT_CAPACITY)));
    log::set_logger(logger)?;
    log::set_max_level(level);
    let _ = GLOBAL.set(logger);
    Ok(logger)
}

/// Recent lines of the installed logger; empty before [`init`]
pub fn recent_lines() -> Vec<String> {
    GLOBAL.get().map(|logger| logger.recent()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(logger: &RollingLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", msg))
                .build(),
        );
    }

    #[test]
    fn test_buffer_rolls_over() {
        let logger = RollingLogger::new("content", LevelFilter::Debug, 2);
        emit(&logger, Level::Info, "one");
        emit(&logger, Level::Info, "two");
        emit(&logger, Level::Info, "three");

        let recent = logger.recent();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with("test: two"));
        assert!(recent[1].ends_with("test: three"));
        assert!(recent[1].contains("[content] INFO"));
    }

    #[test]
    fn test_installed_logger_keeps_recent_lines() {
        init("background", LevelFilter::Info).unwrap();
        log::debug!("below level");
        log::info!("relay ready");

        let lines = recent_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[background] INFO"));
        assert!(lines[0].ends_with("relay ready"));
        assert!(init("again", LevelFilter::Info).is_err());
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new("background", LevelFilter::Warn, 10);
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Error, "shown");
        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].contains("ERROR"));
    }
}
