//! Integration with the `log` crate.
//!
//! [`ConsoleLogger`] implements [`log::Log`], so records from `log::info!` and friends end up in
//! the browser console. Structured key-values attached to a record are used as the interpolation
//! context:
//!
//! ```rust
//! use browser_console::{BrowserConsole, ConsoleLogger};
//! use log::Log;
//!
//! let logger = ConsoleLogger::new(BrowserConsole::with_output(true, Vec::new()));
//! let key_values: &[(&str, &str)] = &[("user", "alice")];
//! logger.log(
//!     &log::Record::builder()
//!         .level(log::Level::Warn)
//!         .args(format_args!("{{user}} logged in"))
//!         .key_values(&key_values)
//!         .build(),
//! );
//!
//! let console = logger.into_inner();
//! assert_eq!(
//!     String::from_utf8_lossy(console.output()),
//!     "\n<script>console.warning(\"alice logged in\")</script>",
//! );
//! ```

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::kv::{self, Source, VisitSource};
use log::{LevelFilter, Log, Metadata, Record};

use crate::config::Config;
use crate::console::BrowserConsole;
use crate::context::Context;
use crate::level::Level;
use crate::logger::Logger;

/// A [`log::Log`] implementation writing to a [`BrowserConsole`].
///
/// The console is guarded by a mutex, which makes the logger usable from any thread.
#[derive(Debug)]
pub struct ConsoleLogger<W = io::Stdout> {
    console: Mutex<BrowserConsole<W>>,
    max_level: LevelFilter,
}

impl<W> ConsoleLogger<W>
where
    W: Write + Send,
{
    /// Wraps `console`, accepting records of every level.
    pub fn new(console: BrowserConsole<W>) -> Self {
        Self {
            console: Mutex::new(console),
            max_level: LevelFilter::Trace,
        }
    }

    /// Only accepts records at or above `max_level` in severity.
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// The most verbose level this logger accepts.
    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Enables or disables the wrapped console.
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().set_enabled(enabled);
    }

    /// Returns whether the wrapped console is enabled.
    pub fn is_enabled(&self) -> bool {
        self.lock().is_enabled()
    }

    /// Returns the wrapped console.
    pub fn into_inner(self) -> BrowserConsole<W> {
        self.console
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, BrowserConsole<W>> {
        // Poisoned only by a panicking writer; the flag itself is always consistent.
        self.console.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Log for ConsoleLogger<W>
where
    W: Write + Send,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // This crate's own `tracing` events may be forwarded to `log` while the console is locked.
        metadata.level() <= self.max_level
            && !is_own_target(metadata.target())
            && self.is_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut context = Context::new();
        if let Err(error) = record
            .key_values()
            .visit(&mut ContextCollector(&mut context))
        {
            tracing::warn!(%error, "failed to collect log record key-values");
        }

        let level = Level::from(record.level());
        let result = self.lock().log(level.as_str(), record.args(), &context);
        if let Err(error) = result {
            tracing::warn!(
                %error,
                log_target = record.target(),
                "failed to write log record to browser console"
            );
        }
    }

    fn flush(&self) {
        let result = self.lock().flush();
        if let Err(error) = result {
            tracing::warn!(%error, "failed to flush browser console");
        }
    }
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

struct ContextCollector<'a>(&'a mut Context);

impl<'kvs> VisitSource<'kvs> for ContextCollector<'_> {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.0.insert(key.as_str(), value.to_string());
        Ok(())
    }
}

/// Installs a [`ConsoleLogger`] on standard output as the global `log` logger.
///
/// The console starts enabled or disabled according to `config`.
///
/// # Errors
///
/// Fails if a global logger has already been set.
pub fn init(config: &Config) -> Result<(), log::SetLoggerError> {
    let logger = ConsoleLogger::new(config.console());
    let max_level = logger.max_level();

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);

    Ok(())
}
