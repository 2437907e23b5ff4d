//! Logger module
//!
//! Provides logging utilities for the file server:
//! - The startup announcement on stdout
//! - Leveled error, warning, info and debug lines
//! - Optional error log file

pub mod writer;

use crate::config::Config;
use chrono::Local;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a log line, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    /// Parse a configured level name; unknown names fall back to `Info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Info,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    MAX_LEVEL.store(Level::parse(&config.logging.level) as u8, Ordering::Relaxed);
    writer::init(config.logging.error_log_file.as_deref())
}

fn enabled(level: Level) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

fn format_line(level: Level, message: &str) -> String {
    format!(
        "[{}] {} {message}",
        level.label(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

fn write_line(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }

    let line = format_line(level, message);
    match level {
        Level::Error | Level::Warn => writer::write_error(&line),
        Level::Info | Level::Debug => writer::write_info(&line),
    }
}

/// Announce the listening port; always printed, whatever the level
pub fn log_server_start(port: u16) {
    writer::write_info(&format!("Serving on port {port}"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_line(Level::Debug, &format!("Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_line(Level::Error, message);
}

pub fn log_warning(message: &str) {
    write_line(Level::Warn, message);
}

pub fn log_info(message: &str) {
    write_line(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write_line(Level::Debug, message);
}
