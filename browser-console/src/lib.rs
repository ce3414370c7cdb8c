//! # `browser-console`
//!
//! Emits server-side log messages into a web page as inline `<script>` tags, so the browser's
//! developer console shows them next to client-side output.
//!
//! Every call produces exactly one line of the form
//! `\n<script>console.<level>(<json>)</script>` on the configured output, or nothing when the
//! console is disabled.
//!
//! ## Features
//!
//! - **Leveled logging**: the [`Logger`] trait with eight severity methods plus a generic `log`
//! - **Interpolation**: `{key}` placeholders filled from a [`Context`]
//! - **Value dumping**: [`show`] encodes any [`Value`] (mappings, sequences, numbers, ...) as JSON
//! - **`log` integration**: [`ConsoleLogger`] forwards `log` records to the browser console
//! - **Configuration**: [`Config`] seeds the enabled flag from TOML and `BROWSER_CONSOLE_ENABLED`
//!
//! ## Basic Usage
//!
//! ```rust
//! use browser_console::{BrowserConsole, Logger, context};
//!
//! # fn main() -> Result<(), browser_console::Error> {
//! let mut console = BrowserConsole::with_output(true, Vec::new());
//! console.info("Hello {user}", &context!(user = "Mustermann"))?;
//!
//! assert_eq!(
//!     String::from_utf8_lossy(console.output()),
//!     "\n<script>console.info(\"Hello Mustermann\")</script>",
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Dumping structured values keeps their shape:
//!
//! ```rust
//! use browser_console::{Context, Value, show_to};
//!
//! # fn main() -> Result<(), browser_console::Error> {
//! let mut output = Vec::new();
//! let user = Value::from_iter([("name", Value::from("John")), ("age", Value::from(30))]);
//! show_to(&mut output, user, &Context::new(), false)?;
//!
//! assert_eq!(
//!     String::from_utf8_lossy(&output),
//!     "\n<script>console.log({\"name\":\"John\",\"age\":30})</script>",
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod bridge;
mod config;
mod console;
mod context;
mod encode;
mod error;
mod interpolate;
mod level;
mod logger;
mod macros;
#[doc(hidden)]
pub mod test_helpers;
mod time;
mod value;

pub use bridge::{ConsoleLogger, init};
pub use config::{Config, ENABLED_ENV_VAR, parse_flag};
pub use console::{BrowserConsole, show, show_to};
pub use context::Context;
pub use encode::encode;
pub use error::{ConfigError, EncodingError, Error};
pub use interpolate::interpolate;
pub use level::{Level, UnknownLevelError};
pub use logger::Logger;
pub use time::DATE_FORMAT;
pub use value::{Mapping, MAX_DEPTH, ToMapping, Value};
