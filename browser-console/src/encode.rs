//! JSON encoding for script-embedded payloads.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::EncodingError;
use crate::value::Value;

/// Encodes a value as compact JSON suitable for embedding in a `<script>` tag.
///
/// Non-ASCII text is kept as is. Forward slashes are escaped as `\/`, so a payload can never
/// contain a literal `</script>`, and U+2028/U+2029 are escaped because older JavaScript engines
/// treat them as line terminators inside string literals.
///
/// # Examples
///
/// ```rust
/// use browser_console::{Value, encode};
///
/// assert_eq!(encode(&Value::from("Grüße </b>")).unwrap(), r#""Grüße <\/b>""#);
/// assert_eq!(encode(&Value::from_iter([("n", 1)])).unwrap(), r#"{"n":1}"#);
/// assert!(encode(&Value::from(f64::NAN)).is_err());
/// ```
pub fn encode(value: &Value) -> Result<String, EncodingError> {
    let json = value.to_json()?;

    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, ScriptFormatter);
    json.serialize(&mut serializer).map_err(EncodingError::Json)?;

    String::from_utf8(buffer).map_err(|error| EncodingError::MalformedUtf8(error.utf8_error()))
}

/// Compact output with the extra escapes needed inside a `<script>` element.
#[derive(Debug)]
struct ScriptFormatter;

impl Formatter for ScriptFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;

        for (index, character) in fragment.char_indices() {
            let escaped = match character {
                '/' => "\\/",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };

            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + character.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}
