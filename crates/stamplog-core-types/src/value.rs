//! Closed value type for messages and structured fields
//!
//! Every argument handed to the facade is converted into a [`Value`] up front.
//! Types without a dedicated variant go through [`Value::display`],
//! [`Value::debug`] or [`Value::serialize`].

use serde::Serialize;
use std::fmt::{self, Write as _};
use std::time::Duration;

/// A loggable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Encoded as floating-point seconds
    Duration(Duration),
    /// Structured maps and arrays
    Json(serde_json::Value),
    /// Stringified fallback for types with no native mapping
    Opaque(String),
}

impl Value {
    /// Stringify any `Display` type
    pub fn display(value: &impl fmt::Display) -> Self {
        Value::Opaque(value.to_string())
    }

    /// Stringify any `Debug` type
    pub fn debug(value: &impl fmt::Debug) -> Self {
        Value::Opaque(format!("{value:?}"))
    }

    /// Encode any `Serialize` type as structured JSON
    pub fn serialize(value: &impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::Json(json),
            Err(err) => Value::Opaque(format!("<unserializable: {err}>")),
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// JSON representation used by the line encoder
    ///
    /// Non-finite floats become the strings `NaN`, `+Inf` and `-Inf`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Uint(u) => Json::from(*u),
            Value::Float(f) => float_to_json(*f),
            Value::Str(s) => Json::String(s.clone()),
            Value::Duration(d) => float_to_json(d.as_secs_f64()),
            Value::Json(json) => json.clone(),
            Value::Opaque(s) => Json::String(s.clone()),
        }
    }

    /// Concatenate values into a message
    ///
    /// A space separates two adjacent operands when neither is a string.
    pub fn concat(values: &[Value]) -> String {
        let mut out = String::new();
        for (i, value) in values.iter().enumerate() {
            if i > 0 && !value.is_str() && !values[i - 1].is_str() {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = write!(out, "{value}");
        }
        out
    }
}

fn float_to_json(f: f64) -> serde_json::Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => serde_json::Value::Number(n),
        None if f.is_nan() => serde_json::Value::String("NaN".to_string()),
        None if f.is_sign_positive() => serde_json::Value::String("+Inf".to_string()),
        None => serde_json::Value::String("-Inf".to_string()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Duration(d) => write!(f, "{d:?}"),
            Value::Json(json) => write!(f, "{json}"),
            Value::Opaque(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Uint(u64::from(v))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Uint(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
