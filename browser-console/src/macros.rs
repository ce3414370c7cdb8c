//! Macros for building interpolation contexts.

/// Builds a [`Context`][crate::Context] from `key = value` pairs.
///
/// Keys are either identifiers or string literals, values are any expression convertible into a
/// [`Value`][crate::Value].
///
/// # Examples
///
/// ```rust
/// use browser_console::context;
///
/// let user = "alice";
/// let context = context!(user = user, "retry-count" = 3, admin = false);
///
/// assert_eq!(context.len(), 3);
/// assert!(context.get("retry-count").is_some());
/// ```
///
/// ```rust
/// use browser_console::context;
///
/// assert!(context!().is_empty());
/// ```
#[macro_export]
macro_rules! context {
    (@key $key:ident) => {
        stringify!($key)
    };
    (@key $key:literal) => {
        $key
    };
    ($($key:tt = $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut context = $crate::Context::new();
        $(
            context.insert($crate::context!(@key $key), $value);
        )*
        context
    }};
}
