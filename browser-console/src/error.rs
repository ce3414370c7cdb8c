//! Error types.

/// Errors surfaced by logging calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The message could not be encoded as JSON.
    #[error("failed to encode console message")]
    Encoding(#[from] EncodingError),
    /// Writing to the output stream failed.
    #[error("failed to write console message")]
    Output(#[from] std::io::Error),
}

/// Reasons a value cannot be encoded as JSON.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// A byte string is not valid UTF-8.
    #[error("malformed UTF-8 in byte string")]
    MalformedUtf8(#[source] core::str::Utf8Error),
    /// JSON has no representation for `NaN` or infinities.
    #[error("non-finite number {0} cannot be encoded")]
    NonFiniteNumber(f64),
    /// Sequences and mappings are nested deeper than the limit.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),
    /// A [`Display`][core::fmt::Display] implementation returned an error.
    #[error("stringable value failed to format")]
    Stringable,
    /// `serde_json` rejected the value.
    #[error("json serialization failed")]
    Json(#[source] serde_json::Error),
}

/// Errors loading a [`Config`][crate::Config].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML source is malformed or has unknown keys.
    #[error("invalid browser console configuration")]
    Toml(#[from] toml::de::Error),
    /// A flag value is not a recognized boolean spelling.
    #[error("invalid value {value:?} for {name}, expected a boolean")]
    InvalidFlag {
        /// Where the value came from.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}
