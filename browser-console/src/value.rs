//! Values that can be logged or dumped to the browser console.
//!
//! [`Value`] is the closed set of shapes the console understands. Plain data (scalars, strings,
//! sequences and mappings) is encoded directly; two capability variants cover host types:
//!
//! - [`Value::Stringable`] wraps anything implementing [`Display`], and is rendered as its
//!   string form.
//! - [`Value::Convertible`] wraps anything implementing [`ToMapping`], and is rendered as the
//!   mapping it converts to.
//!
//! # Examples
//!
//! ```rust
//! use browser_console::{Mapping, ToMapping, Value};
//!
//! struct User {
//!     id: i64,
//!     name: &'static str,
//! }
//!
//! impl ToMapping for User {
//!     fn to_mapping(&self) -> Mapping {
//!         Mapping::from_iter([
//!             ("id".to_owned(), Value::from(self.id)),
//!             ("name".to_owned(), Value::from(self.name)),
//!         ])
//!     }
//! }
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//! let user = Value::convertible(User { id: 1, name: "Test" });
//! let uri = Value::stringable(std::net::Ipv4Addr::LOCALHOST);
//! ```

use core::fmt::{self, Display, Write as _};
use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as Json;

use crate::error::EncodingError;

/// An ordered mapping from keys to values, encoded as a JSON object.
pub type Mapping = IndexMap<String, Value>;

/// Maximum number of nested sequences and mappings accepted by the encoder.
pub const MAX_DEPTH: usize = 512;

/// Capability of converting a value into plain structured data.
///
/// Types implementing this trait are dumped as the mapping they return rather than as an
/// opaque string.
pub trait ToMapping {
    /// Converts `self` into an ordered mapping.
    fn to_mapping(&self) -> Mapping;
}

/// A value that can be logged to the browser console.
#[derive(Clone)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer that may exceed [`i64::MAX`].
    UInt(u64),
    /// A floating-point number; non-finite values cannot be encoded.
    Float(f64),
    /// UTF-8 text.
    String(String),
    /// A raw byte string, which only encodes if it is valid UTF-8.
    Bytes(Vec<u8>),
    /// An ordered sequence, encoded as a JSON array.
    Sequence(Vec<Value>),
    /// An ordered mapping, encoded as a JSON object.
    Mapping(Mapping),
    /// A value rendered through its [`Display`] implementation.
    Stringable(Arc<dyn Display + Send + Sync>),
    /// A value rendered through its [`ToMapping`] implementation.
    Convertible(Arc<dyn ToMapping + Send + Sync>),
}

impl Value {
    /// Wraps a [`Display`] type.
    pub fn stringable<T>(value: T) -> Self
    where
        T: Display + Send + Sync + 'static,
    {
        Value::Stringable(Arc::new(value))
    }

    /// Wraps a [`ToMapping`] type.
    pub fn convertible<T>(value: T) -> Self
    where
        T: ToMapping + Send + Sync + 'static,
    {
        Value::Convertible(Arc::new(value))
    }

    /// Converts any serializable type, keeping struct field and map insertion order.
    ///
    /// Fails when `serde_json` rejects the value, e.g. for maps with non-string keys.
    pub fn from_serialize<T>(value: &T) -> Result<Self, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(EncodingError::Json)
    }

    /// Returns the text if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Resolves the capability variants at the top level.
    ///
    /// Convertibles become mappings, stringables become strings, and byte strings that are valid
    /// UTF-8 become strings. Everything else is returned unchanged.
    pub(crate) fn prepare(self) -> Result<Self, EncodingError> {
        Ok(match self {
            Value::Convertible(value) => Value::Mapping(value.to_mapping()),
            Value::Stringable(value) => Value::String(render(&*value)?),
            Value::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(error) => Value::Bytes(error.into_bytes()),
            },
            other => other,
        })
    }

    /// The text substituted for a `{key}` placeholder, if this value has one.
    ///
    /// Sequences, mappings and convertibles have no placeholder text.
    pub(crate) fn placeholder_text(&self) -> Option<String> {
        match self {
            Value::Null | Value::Bool(false) => Some(String::new()),
            Value::Bool(true) => Some("1".to_owned()),
            Value::Int(value) => Some(value.to_string()),
            Value::UInt(value) => Some(value.to_string()),
            Value::Float(value) => Some(float_text(*value)),
            Value::String(text) => Some(text.clone()),
            Value::Bytes(bytes) => str::from_utf8(bytes).ok().map(str::to_owned),
            Value::Stringable(value) => render(&**value).ok(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Convertible(_) => None,
        }
    }

    /// Converts into a `serde_json` tree, resolving capability variants at every depth.
    ///
    /// The walk keeps its own stack on the heap, so [`MAX_DEPTH`] bounds memory rather than the
    /// call stack. Every mapping produced by a convertible counts as a level, which also stops
    /// self-referential conversions.
    pub(crate) fn to_json(&self) -> Result<Json, EncodingError> {
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let mut next = Cow::Borrowed(self);

        loop {
            let mut finished = match Frame::open(next, stack.len())? {
                Opened::Leaf(json) => Some(json),
                Opened::Container(frame) => {
                    stack.push(frame);
                    None
                }
            };

            // Ascend until a container has another child to descend into.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return Ok(finished.unwrap_or(Json::Null));
                };
                if let Some(json) = finished.take() {
                    frame.accept(json);
                }
                if let Some(child) = frame.next_child() {
                    next = child;
                    break;
                }
                finished = stack.pop().map(Frame::finish);
            }
        }
    }

    fn scalar_json(&self) -> Result<Json, EncodingError> {
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(value) => Json::Bool(*value),
            Value::Int(value) => Json::from(*value),
            Value::UInt(value) => Json::from(*value),
            Value::Float(value) => serde_json::Number::from_f64(*value)
                .map(Json::Number)
                .ok_or(EncodingError::NonFiniteNumber(*value))?,
            Value::String(text) => Json::String(text.clone()),
            Value::Bytes(bytes) => Json::String(
                str::from_utf8(bytes)
                    .map_err(EncodingError::MalformedUtf8)?
                    .to_owned(),
            ),
            Value::Stringable(value) => Json::String(render(&**value)?),
            Value::Sequence(_) | Value::Mapping(_) | Value::Convertible(_) => {
                unreachable!("containers are converted through frames")
            }
        })
    }
}

enum Opened<'a> {
    Leaf(Json),
    Container(Frame<'a>),
}

enum Items<'a> {
    Borrowed(core::slice::Iter<'a, Value>),
    Owned(std::vec::IntoIter<Value>),
}

enum Entries<'a> {
    Borrowed(indexmap::map::Iter<'a, String, Value>),
    Owned(indexmap::map::IntoIter<String, Value>),
}

/// A container whose children are being converted.
enum Frame<'a> {
    Sequence {
        items: Items<'a>,
        output: Vec<Json>,
    },
    Mapping {
        entries: Entries<'a>,
        key: Option<String>,
        output: serde_json::Map<String, Json>,
    },
}

impl<'a> Frame<'a> {
    fn open(value: Cow<'a, Value>, depth: usize) -> Result<Opened<'a>, EncodingError> {
        let frame = match value {
            Cow::Borrowed(Value::Sequence(items)) => Frame::sequence(Items::Borrowed(items.iter())),
            Cow::Owned(Value::Sequence(items)) => Frame::sequence(Items::Owned(items.into_iter())),
            Cow::Borrowed(Value::Mapping(entries)) => {
                Frame::mapping(Entries::Borrowed(entries.iter()))
            }
            Cow::Owned(Value::Mapping(entries)) => Frame::mapping(Entries::Owned(entries.into_iter())),
            Cow::Borrowed(Value::Convertible(value)) => {
                Frame::mapping(Entries::Owned(value.to_mapping().into_iter()))
            }
            Cow::Owned(Value::Convertible(value)) => {
                Frame::mapping(Entries::Owned(value.to_mapping().into_iter()))
            }
            scalar => return scalar.scalar_json().map(Opened::Leaf),
        };

        check_depth(depth)?;
        Ok(Opened::Container(frame))
    }

    fn sequence(items: Items<'a>) -> Self {
        Frame::Sequence {
            items,
            output: Vec::new(),
        }
    }

    fn mapping(entries: Entries<'a>) -> Self {
        Frame::Mapping {
            entries,
            key: None,
            output: serde_json::Map::new(),
        }
    }

    fn next_child(&mut self) -> Option<Cow<'a, Value>> {
        match self {
            Frame::Sequence { items, .. } => match items {
                Items::Borrowed(items) => items.next().map(Cow::Borrowed),
                Items::Owned(items) => items.next().map(Cow::Owned),
            },
            Frame::Mapping { entries, key, .. } => {
                let (next_key, value) = match entries {
                    Entries::Borrowed(entries) => entries
                        .next()
                        .map(|(name, value)| (name.clone(), Cow::Borrowed(value)))?,
                    Entries::Owned(entries) => entries
                        .next()
                        .map(|(name, value)| (name, Cow::Owned(value)))?,
                };
                *key = Some(next_key);
                Some(value)
            }
        }
    }

    fn accept(&mut self, json: Json) {
        match self {
            Frame::Sequence { output, .. } => output.push(json),
            Frame::Mapping { key, output, .. } => {
                if let Some(key) = key.take() {
                    output.insert(key, json);
                }
            }
        }
    }

    fn finish(self) -> Json {
        match self {
            Frame::Sequence { output, .. } => Json::Array(output),
            Frame::Mapping { output, .. } => Json::Object(output),
        }
    }
}

fn check_depth(depth: usize) -> Result<(), EncodingError> {
    if depth >= MAX_DEPTH {
        return Err(EncodingError::DepthExceeded(MAX_DEPTH));
    }
    Ok(())
}

/// Renders a [`Display`] value without panicking on a failing implementation.
pub(crate) fn render(value: &(impl Display + ?Sized)) -> Result<String, EncodingError> {
    let mut text = String::new();
    write!(text, "{value}").map_err(|fmt::Error| EncodingError::Stringable)?;
    Ok(text)
}

/// Significant digits of a float's placeholder text.
const FLOAT_PRECISION: usize = 14;

/// Formats a float like a PHP string cast: up to [`FLOAT_PRECISION`] significant digits, with
/// exponent notation such as `1.0E+20` for exponents below -4 or from the precision up.
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "INF" } else { "-INF" }.to_owned();
    }
    if value == 0.0 {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(mantissa) => ("-", mantissa),
        None => ("", mantissa),
    };
    let digits = mantissa.replace('.', "");
    let digits = digits.trim_end_matches('0');

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{head}.{tail}E{exponent_sign}{}", exponent.unsigned_abs())
    } else if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        format!("{sign}0.{zeros}{digits}")
    } else {
        let point = exponent as usize + 1;
        if digits.len() <= point {
            format!("{sign}{digits}{}", "0".repeat(point - digits.len()))
        } else {
            format!("{sign}{}.{}", &digits[..point], &digits[point..])
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::UInt(value) => f.debug_tuple("UInt").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::String(value) => f.debug_tuple("String").field(value).finish(),
            Value::Bytes(value) => f.debug_tuple("Bytes").field(value).finish(),
            Value::Sequence(value) => f.debug_tuple("Sequence").field(value).finish(),
            Value::Mapping(value) => f.debug_tuple("Mapping").field(value).finish(),
            Value::Stringable(value) => f
                .debug_tuple("Stringable")
                .field(&render(&**value).unwrap_or_default())
                .finish(),
            Value::Convertible(_) => f.write_str("Convertible(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

from_integer!(Int as i64: i8, i16, i32, i64);
from_integer!(UInt as u64: u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl<K, V> FromIterator<(K, V)> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Mapping(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            Json::Null => Value::Null,
            Json::Bool(value) => Value::Bool(value),
            Json::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Value::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Value::UInt(value)
                } else {
                    number.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            Json::String(text) => Value::String(text),
            Json::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Json::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
