//! FILENAME: app/chart-cli/src/logging.rs
// PURPOSE: Unified logging for the CLI and the engine crates.
// FORMAT: seq|level|category|message

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use once_cell::sync::Lazy;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Optional log file; lines always go to stderr as well
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static LOGGER: UnifiedLogger = UnifiedLogger;

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Installs the unified logger for the `log` facade and opens `log_file`
/// (truncated) when given.
pub fn init(max_level: log::LevelFilter, log_file: Option<&Path>) -> Result<(), String> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| format!("Failed to create log file {:?}: {}", path, e))?;
        let mut guard = LOG_FILE.lock().map_err(|e| format!("Lock error: {}", e))?;
        *guard = Some(file);
    }

    // a second init (tests) keeps the first logger
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
    Ok(())
}

/// One-letter level code used in the unified format
pub fn level_code(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
}

/// Category for a `log` target: its crate name, upper-cased.
/// `drill_engine::session` becomes `DRILL_ENGINE`.
pub fn category_for(target: &str) -> String {
    target.split("::").next().unwrap_or(target).to_uppercase()
}

/// Format one line in unified format
pub fn format_line(seq: u64, level: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level, category, message)
}

/// Write a log line in unified format
pub fn write_log(level: &str, category: &str, message: &str) {
    let line = format_line(next_seq(), level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    // stdout carries the command's JSON output
    eprintln!("{}", line);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: &str, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: &str, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// LOG FACADE BRIDGE
// ============================================================================

/// Routes records from the engine crates (`log::debug!` etc.) into the
/// unified format.
struct UnifiedLogger;

impl log::Log for UnifiedLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_log(
            level_code(record.level()),
            &category_for(record.target()),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

// The category macros respect the same max level as the facade.

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        if log::Level::Debug <= log::max_level() {
            $crate::logging::write_log("D", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        if log::Level::Info <= log::max_level() {
            $crate::logging::write_log("I", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        if log::Level::Warn <= log::max_level() {
            $crate::logging::write_log("W", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("E", $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for command tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        if log::Level::Debug <= log::max_level() {
            $crate::logging::write_log_enter("D", $cat, $func, "")
        }
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if log::Level::Debug <= log::max_level() {
            $crate::logging::write_log_enter("D", $cat, $func, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        if log::Level::Debug <= log::max_level() {
            $crate::logging::write_log_exit("D", $cat, $func, "")
        }
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if log::Level::Debug <= log::max_level() {
            $crate::logging::write_log_exit("D", $cat, $func, &format!($($arg)*))
        }
    };
}

pub use log_debug;
pub use log_info;
pub use log_warn;
pub use log_error;
pub use log_enter;
pub use log_exit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unified_line_format() {
        assert_eq!(format_line(7, "I", "CMD", "opened"), "7|I|CMD|opened");
    }

    #[test]
    fn categories_come_from_crate_name() {
        assert_eq!(category_for("drill_engine::session"), "DRILL_ENGINE");
        assert_eq!(category_for("engine"), "ENGINE");
    }

    #[test]
    fn sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn level_codes() {
        assert_eq!(level_code(log::Level::Warn), "W");
        assert_eq!(level_code(log::Level::Debug), "D");
    }
}
