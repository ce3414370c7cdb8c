//! Console severity levels.
//!
//! The browser console exposes one method per level, so a [`Level`] is both the severity of an
//! entry and the name of the `console.<level>(...)` call it is rendered as.
//!
//! Requested levels arrive as free-form strings (see [`Logger::log`][crate::Logger::log]) and are
//! resolved with [`Level::resolve`], which maps anything outside the closed set to
//! [`Level::Info`].

use core::fmt;
use core::str::FromStr;

/// A severity level recognized by the console emitter.
///
/// Parsing is exact and case-sensitive: `"error"` is [`Level::Error`], `"ERROR"` is not a level.
///
/// # Examples
///
/// ```rust
/// use browser_console::Level;
///
/// assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
/// assert_eq!(Level::resolve("Warning"), Level::Info);
/// assert_eq!(Level::Critical.as_str(), "critical");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    /// Plain `console.log`, used for value dumps.
    Log,
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information.
    Debug,
}

impl Level {
    /// Every recognized level, in declaration order.
    pub const ALL: [Level; 9] = [
        Level::Log,
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// The token used both for parsing and as the console method name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Log => "log",
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// Resolves a requested level, falling back to [`Level::Info`] for anything unrecognized.
    pub fn resolve(requested: &str) -> Level {
        match requested.parse() {
            Ok(level) => level,
            Err(UnknownLevelError(_)) => {
                tracing::debug!(requested, "unrecognized console level, using info");
                Level::Info
            }
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Level {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// The error returned when parsing a string that is not one of the [`Level`] tokens.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown console level {0:?}")]
pub struct UnknownLevelError(pub String);

impl FromStr for Level {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLevelError(s.to_owned()))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}
