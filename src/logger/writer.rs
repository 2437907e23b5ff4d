//! Log writer module
//!
//! Thread-safe log output: informational lines to stdout, errors to stderr
//! or an append-only error log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Error log output target
enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

/// Thread-safe log writer
pub struct LogWriter {
    error: LogTarget,
}

impl LogWriter {
    fn new(error_log_file: Option<&str>) -> io::Result<Self> {
        let error = match error_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };

        Ok(Self { error })
    }

    fn write_error(&self, message: &str) {
        match &self.error {
            LogTarget::Stderr => eprintln!("{message}"),
            LogTarget::File(file) => {
                let mut f = file.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(error_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Write an informational line to stdout
pub fn write_info(message: &str) {
    println!("{message}");
}

/// Write an error line; stderr until `init` has run
pub fn write_error(message: &str) {
    match LOG_WRITER.get() {
        Some(writer) => writer.write_error(message),
        None => eprintln!("{message}"),
    }
}
