//! Interpolation context.

use crate::value::{Mapping, Value};

/// Ordered placeholder values for a single logging call.
///
/// Keys are placeholder names without braces: the entry `user` fills `{user}`.
/// Insertion order is kept, and inserting an existing key replaces its value in place.
///
/// # Examples
///
/// ```rust
/// use browser_console::{Context, context};
///
/// let built = Context::new().with("user", "alice").with("attempt", 3);
/// let from_macro = context!(user = "alice", attempt = 3);
///
/// assert_eq!(built.len(), from_macro.len());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Context {
    entries: Mapping,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the context for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds an entry, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl From<Mapping> for Context {
    fn from(entries: Mapping) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order_and_replaces_in_place() {
        let mut context = Context::from_iter([("b", 1), ("a", 2), ("c", 3)]);
        context.insert("a", 20);

        let keys: Vec<_> = context.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert!(matches!(context.get("a"), Some(Value::Int(20))));
    }
}
