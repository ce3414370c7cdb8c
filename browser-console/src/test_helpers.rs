//! Helpers for inspecting console output in tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// An in-memory output stream whose clones share one buffer.
///
/// Useful where the console is moved somewhere out of reach, e.g. into a
/// [`ConsoleLogger`][crate::ConsoleLogger] installed as the global logger.
///
/// # Examples
///
/// ```rust
/// use browser_console::test_helpers::SharedBuffer;
/// use browser_console::{Context, show_to};
///
/// let buffer = SharedBuffer::new();
/// show_to(buffer.clone(), "hi", &Context::new(), false).unwrap();
///
/// assert_eq!(buffer.lines(), [r#"<script>console.log("hi")</script>"#]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, replacing malformed UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap_or_else(PoisonError::into_inner))
            .into_owned()
    }

    /// Returns the written entries, one per line, without the leading newline.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Discards everything written so far, returning it.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock().unwrap_or_else(PoisonError::into_inner));
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
