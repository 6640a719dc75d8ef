//! Leveled logging capability used by the store
//!
//! The store never consults the logger for control flow; it only emits
//! debug diagnostics. Callers inject their own [`Logger`] through
//! [`StoreConfig`](crate::storage::StoreConfig) at construction time.

use std::fmt;

/// Log severity, from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink for leveled, formatted messages
///
/// Implementors only provide [`Logger::log`]; the per-level methods are
/// provided. Messages are built with `format_args!`:
///
/// ```
/// use jsondb::logging::{Logger, NullLogger};
///
/// let logger = NullLogger;
/// logger.debug(format_args!("creating database at '{}'", "data"));
/// ```
pub trait Logger: Send + Sync {
    /// Records a message at the given level
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    /// Records a message and terminates the process
    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(Level::Fatal, args);
        std::process::exit(1)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }
}

/// Default logger, forwards to the `tracing` macros under the `jsondb` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match level {
            // tracing has no fatal level
            Level::Fatal | Level::Error => tracing::error!(target: "jsondb", "{}", args),
            Level::Warn => tracing::warn!(target: "jsondb", "{}", args),
            Level::Info => tracing::info!(target: "jsondb", "{}", args),
            Level::Debug => tracing::debug!(target: "jsondb", "{}", args),
            Level::Trace => tracing::trace!(target: "jsondb", "{}", args),
        }
    }
}

/// Logger that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}
