use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use anyhow::Result;
use slog::o;
use slog::Drain;
use slog::FnValue;
use slog::IgnoreResult;
use slog::Level;
use slog::Logger;
use slog::Record;

/// Logger writing JSON encoded events to a file, one per line.
pub fn file(path: &str, level: Level) -> Result<Logger> {
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Unable to open log file at {}", path))?;
    let drain = slog_json::Json::new(writer)
        .set_newlines(true)
        .set_flush(true)
        .add_default_keys()
        .build();
    let drain = Mutex::new(drain)
        .map(IgnoreResult::new)
        .filter_level(level)
        .fuse();
    let module = FnValue(|record: &Record| record.module());
    Ok(Logger::root(drain, o!("module" => module)))
}

/// Logger writing human readable events to stderr.
pub fn terminal(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .build()
        .filter_level(level)
        .fuse();
    Logger::root(drain, o!())
}
