#![deny(missing_docs)]
//! Shared logging utilities for the netscope workspace.
//!
//! This crate provides the `ns_*` logging macros used across the codebase,
//! the logger initialisation used by the desktop app, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log;
pub use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! ns_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! ns_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! ns_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! ns_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! ns_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the configured log file only.
    File,
    /// Write to the terminal only.
    Terminal,
    /// Write to both the log file and the terminal.
    #[default]
    Both,
}

/// Everything [`initialize`] needs to build the global logger.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Most verbose level that is emitted.
    pub level: LevelFilter,
    /// Where records go.
    pub destination: LogDestination,
    /// Log file path, truncated on start-up. Ignored for `Terminal`.
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            destination: LogDestination::default(),
            file: PathBuf::from("./netscope.log"),
        }
    }
}

/// Initializes the global logger from `settings`.
///
/// A log file that cannot be created is reported on stderr and skipped; the
/// terminal logger (if requested) is still installed. Calling this more than
/// once keeps the first logger.
pub fn initialize(settings: &LogSettings) {
    let config = build_config();
    let level = settings.level;

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(
        settings.destination,
        LogDestination::Terminal | LogDestination::Both
    ) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(
        settings.destination,
        LogDestination::File | LogDestination::Both
    ) {
        if let Some(file_logger) = create_file_logger(&settings.file, level, config) {
            loggers.push(file_logger);
        }
    }

    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
