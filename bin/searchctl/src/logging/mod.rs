//! Process logging for searchctl.
use anyhow::Result;
use clap::Args;
use clap::ValueEnum;
use slog::Level;
use slog::Logger;

mod logger;

/// Verbosity levels accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warning => Level::Warning,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
        }
    }
}

/// Logging-related options.
#[derive(Args, Debug)]
pub struct LogOpt {
    /// Write JSON encoded logs to this file instead of stderr.
    #[arg(long = "log-file", global = true)]
    file: Option<String>,

    /// Minimum level of emitted log events.
    #[arg(long = "log-level", global = true, value_enum, default_value = "warning")]
    level: LogLevel,
}

/// Initialise a logger based on the given CLI arguments.
pub fn configure(opt: &LogOpt) -> Result<Logger> {
    let level = Level::from(opt.level);
    match &opt.file {
        Some(path) => self::logger::file(path, level),
        None => Ok(self::logger::terminal(level)),
    }
}
