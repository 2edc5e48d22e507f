//! A lenient JSON value model and recursive-descent parser, together with an XML-to-JSON
//! structural converter, for consuming the payloads returned by a subscription billing API.
//!
//! ```
//! use billing_json::accessors::get_as_or;
//! use billing_json::parser::parse_object;
//!
//! let customer = parse_object(r#"{"id": 4, "email": "jo@example.com"}"#).unwrap();
//! assert_eq!(get_as_or(Some(&customer), "email", String::new()), "jo@example.com");
//! assert_eq!(get_as_or(Some(&customer), "organization", String::from("none")), "none");
//! ```
use std::fmt::{Display, Formatter};

pub mod accessors;
pub mod array;
pub mod coords;
pub mod decoders;
pub mod errors;
pub mod object;
pub mod parser;
pub mod scanner;
pub mod sniff;
mod writer;
pub mod xml;
#[cfg(test)]
mod test_macros;

pub use crate::array::JsonArray;
pub use crate::errors::{Error, ParserResult};
pub use crate::object::JsonObject;

/// Basic enumeration of different Json values. A JSON `null` has no variant of its own; it is
/// represented by the absence of a value, see [JsonArray] and [JsonObject].
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// Decoded string value
    String(String),
    /// Numeric value, always held as a double
    Number(f64),
    /// Canonical boolean value
    Boolean(bool),
    /// Map of values
    Object(JsonObject),
    /// Array of values
    Array(JsonArray),
}

/// The kinds of [JsonValue], used when reporting type mismatches
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        };
        write!(f, "{}", name)
    }
}

impl JsonValue {
    /// The [ValueKind] of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Object(_) => ValueKind::Object,
            JsonValue::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The stored double, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer projection of a number. This is a truncating cast of the stored double, the
    /// original text is never re-parsed
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64().map(|n| n as i32)
    }

    /// Long projection of a number, truncating in the same way as [JsonValue::as_i32]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(value as f64)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(value: JsonArray) -> Self {
        JsonValue::Array(value)
    }
}
