//! The leveled logging interface.
//!
//! [`Logger`] has a single required method, [`Logger::log`], which accepts any requested level.
//! The eight severity methods are provided on top of it, so an implementor never repeats the
//! per-level plumbing.
//!
//! # Severity Levels
//!
//! - [`Logger::emergency`] - System is unusable
//! - [`Logger::alert`] - Action must be taken immediately
//! - [`Logger::critical`] - Critical conditions
//! - [`Logger::error`] - Runtime errors
//! - [`Logger::warning`] - Exceptional occurrences that are not errors
//! - [`Logger::notice`] - Normal but significant events
//! - [`Logger::info`] - Interesting events
//! - [`Logger::debug`] - Detailed debug information

use core::fmt::Display;

use crate::context::Context;
use crate::error::Error;
use crate::level::Level;

macro_rules! leveled {
    ($($(#[$attr:meta])* $method:ident => $level:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            fn $method(&mut self, message: impl Display, context: &Context) -> Result<(), Error>
            where
                Self: Sized,
            {
                self.log(Level::$level.as_str(), &message, context)
            }
        )*
    };
}

/// A logger with a fixed set of severity levels.
///
/// # Examples
///
/// ```rust
/// use browser_console::{BrowserConsole, Context, Logger, context};
///
/// # fn main() -> Result<(), browser_console::Error> {
/// let mut console = BrowserConsole::with_output(true, Vec::new());
///
/// console.error("Achtung!", &Context::new())?;
/// console.log("custom", &"Request {id} failed", &context!(id = 7))?;
///
/// let output = String::from_utf8_lossy(console.output());
/// assert!(output.contains(r#"console.error("Achtung!")"#));
/// assert!(output.contains(r#"console.info("Request 7 failed")"#));
/// # Ok(())
/// # }
/// ```
pub trait Logger {
    /// Logs `message` at the requested level.
    ///
    /// `context` values are interpolated into `{key}` placeholders of the message. Levels outside
    /// the recognized set are logged as [`Level::Info`].
    fn log(&mut self, level: &str, message: &dyn Display, context: &Context) -> Result<(), Error>;

    leveled! {
        /// System is unusable.
        emergency => Emergency,
        /// Action must be taken immediately.
        alert => Alert,
        /// Critical conditions.
        critical => Critical,
        /// Runtime errors that do not require immediate action but should be monitored.
        error => Error,
        /// Exceptional occurrences that are not errors.
        warning => Warning,
        /// Normal but significant events.
        notice => Notice,
        /// Interesting events.
        info => Info,
        /// Detailed debug information.
        debug => Debug,
    }
}
