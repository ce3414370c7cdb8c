//! The script-tag emitter.

use core::fmt::Display;
use std::io::{self, Stdout, Write};

use crate::context::Context;
use crate::encode::encode;
use crate::error::Error;
use crate::interpolate::interpolate;
use crate::level::Level;
use crate::logger::Logger;
use crate::time::date_prefixed;
use crate::value::{Value, render};

/// Writes log entries as `<script>console.<level>(...)</script>` tags.
///
/// Each entry is a single write of `\n<script>console.<level>(<json>)</script>` to the output,
/// followed by a flush. While disabled, nothing is written.
///
/// The console is not synchronized; share it between threads through
/// [`ConsoleLogger`][crate::ConsoleLogger] or another lock.
///
/// # Examples
///
/// ```rust
/// use browser_console::{BrowserConsole, Context, Logger};
///
/// # fn main() -> Result<(), browser_console::Error> {
/// let mut console = BrowserConsole::with_output(true, Vec::new());
/// console.warning("disk almost full", &Context::new())?;
///
/// console.set_enabled(false);
/// console.warning("not written", &Context::new())?;
///
/// assert_eq!(
///     String::from_utf8_lossy(&console.into_output()),
///     "\n<script>console.warning(\"disk almost full\")</script>",
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BrowserConsole<W = Stdout> {
    enabled: bool,
    output: W,
}

impl BrowserConsole {
    /// Creates a console writing to the process's standard output.
    pub fn new(enabled: bool) -> Self {
        Self::with_output(enabled, io::stdout())
    }
}

impl Default for BrowserConsole {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<W> BrowserConsole<W>
where
    W: Write,
{
    /// Creates a console writing to `output`.
    pub fn with_output(enabled: bool, output: W) -> Self {
        Self { enabled, output }
    }

    /// Enables or disables output.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Returns whether output is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Flushes the output stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    /// Dumps any value at the `log` level.
    ///
    /// Convertible values become mappings and stringable values become strings before encoding.
    /// For string messages, `context` is interpolated and, with `show_date`, the current local
    /// time is prepended as `[YYYY-MM-DD HH:MM:SS] `. Other shapes are encoded as they are.
    pub fn show(
        &mut self,
        message: impl Into<Value>,
        context: &Context,
        show_date: bool,
    ) -> Result<(), Error> {
        let prepared = match message.into().prepare()? {
            Value::String(text) => {
                let text = if context.is_empty() {
                    text
                } else {
                    interpolate(&text, context)
                };

                Value::String(if show_date {
                    date_prefixed(&text)
                } else {
                    text
                })
            }
            other => other,
        };

        self.emit(Level::Log.as_str(), &prepared)
    }

    fn emit(&mut self, level: &str, value: &Value) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }

        let json = encode(value)?;
        let level = Level::resolve(level);
        tracing::trace!(%level, bytes = json.len(), "emitting console entry");

        let entry = format!("\n<script>console.{level}({json})</script>");
        self.output.write_all(entry.as_bytes())?;
        self.output.flush()?;

        Ok(())
    }
}

impl<W> Logger for BrowserConsole<W>
where
    W: Write,
{
    fn log(&mut self, level: &str, message: &dyn Display, context: &Context) -> Result<(), Error> {
        let mut text = render(message)?;

        if !context.is_empty() {
            text = interpolate(&text, context);
        }

        self.emit(level, &Value::String(text))
    }
}

/// Dumps a value to the browser console through standard output.
///
/// A fresh, enabled [`BrowserConsole`] is created for every call; see [`BrowserConsole::show`]
/// for how the value is prepared.
pub fn show(message: impl Into<Value>, context: &Context, show_date: bool) -> Result<(), Error> {
    show_to(io::stdout(), message, context, show_date)
}

/// Like [`show`], writing to `output` instead of standard output.
pub fn show_to<W>(
    output: W,
    message: impl Into<Value>,
    context: &Context,
    show_date: bool,
) -> Result<(), Error>
where
    W: Write,
{
    BrowserConsole::with_output(true, output).show(message, context, show_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use crate::error::EncodingError;
    use pretty_assertions::assert_eq;

    /// A writer that rejects everything.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn console() -> BrowserConsole<Vec<u8>> {
        BrowserConsole::with_output(true, Vec::new())
    }

    fn written(console: BrowserConsole<Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn entry_format_is_exact() {
        let mut console = console();
        console.info("Test", &Context::new()).unwrap();
        console.error("Second", &Context::new()).unwrap();

        assert_eq!(
            written(console),
            "\n<script>console.info(\"Test\")</script>\n<script>console.error(\"Second\")</script>"
        );
    }

    #[test]
    fn enabled_by_default_and_toggleable() {
        assert!(BrowserConsole::default().is_enabled());
        assert!(!BrowserConsole::new(false).is_enabled());

        let mut console = console();
        assert!(!console.set_enabled(false).is_enabled());
        assert!(console.set_enabled(true).is_enabled());
    }

    #[test]
    fn disabled_console_skips_encoding() {
        let mut console = BrowserConsole::with_output(false, Vec::new());
        console.show(f64::NAN, &Context::new(), false).unwrap();
        console.show(Value::Bytes(vec![0xff]), &Context::new(), false).unwrap();

        assert!(written(console).is_empty());
    }

    #[test]
    fn encoding_errors_propagate() {
        let mut console = console();
        let error = console
            .show(Value::Bytes(vec![0xff]), &Context::new(), false)
            .unwrap_err();

        assert!(matches!(error, Error::Encoding(EncodingError::MalformedUtf8(_))));
        assert!(written(console).is_empty());
    }

    #[test]
    fn output_errors_propagate() {
        let mut console = BrowserConsole::with_output(true, Closed);
        let error = console.notice("lost", &Context::new()).unwrap_err();

        assert!(matches!(error, Error::Output(_)));
    }

    #[test]
    fn show_interpolates_only_strings() {
        let mut console = console();
        console
            .show("Hello {user}", &context!(user = "Mustermann"), false)
            .unwrap();
        console
            .show(vec!["{user}"], &context!(user = "Mustermann"), false)
            .unwrap();

        assert_eq!(
            written(console),
            "\n<script>console.log(\"Hello Mustermann\")</script>\n<script>console.log([\"{user}\"])</script>"
        );
    }

    #[test]
    fn show_to_writes_once() {
        let mut output = Vec::new();
        show_to(&mut output, -100500, &Context::new(), true).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "\n<script>console.log(-100500)</script>"
        );
    }
}
