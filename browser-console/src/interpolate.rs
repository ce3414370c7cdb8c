//! `{key}` placeholder substitution.

use crate::context::Context;

/// Replaces `{key}` placeholders in `template` with values from `context`.
///
/// Only scalar and stringable values are substituted; placeholders for sequences, mappings and
/// convertibles, as well as for keys missing from the context, are left as they are.
///
/// All placeholders are replaced in one pass over the original template, so text inserted by a
/// replacement is never scanned again. Where two placeholders start at the same position the
/// longer one wins.
///
/// # Examples
///
/// ```rust
/// use browser_console::{context, interpolate};
///
/// assert_eq!(interpolate("{a} {b}", &context!(a = "X", b = "Y")), "X Y");
/// assert_eq!(interpolate("{a} {c}", &context!(a = "X")), "X {c}");
/// assert_eq!(interpolate("{a}", &context!(a = "{b}", b = "Y")), "{b}");
/// ```
pub fn interpolate(template: &str, context: &Context) -> String {
    let mut replacements: Vec<(String, String)> = context
        .iter()
        .filter_map(|(key, value)| match value.placeholder_text() {
            Some(text) => Some((format!("{{{key}}}"), text)),
            None => {
                tracing::debug!(
                    key = key.as_str(),
                    "context value has no string form, placeholder kept"
                );
                None
            }
        })
        .collect();

    if replacements.is_empty() {
        return template.to_owned();
    }

    // Longest first, so the first match at a position is the longest one.
    replacements.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        match replacements
            .iter()
            .find(|(placeholder, _)| rest.starts_with(placeholder.as_str()))
        {
            Some((placeholder, text)) => {
                output.push_str(text);
                rest = &rest[placeholder.len()..];
            }
            None => {
                output.push('{');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}
