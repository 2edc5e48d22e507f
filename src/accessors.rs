//! Typed field extraction over parsed objects.
//!
//! There are two surfaces here. The lenient one ([get_as] and friends) never fails: a missing
//! object, a missing key or a value of the wrong kind all give [None] or a fallback, and
//! numbers, booleans and dates which arrive as strings are parsed out of those strings. The
//! strict one ([validate_field]) raises a validation error for a missing key or a value of the
//! wrong kind, and is meant for consistency checks rather than general field mapping.
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::{Details, ParserResult};
use crate::{validation_error, JsonArray, JsonObject, JsonValue, ValueKind};

/// Naive timestamp layouts tried after RFC 3339, all taken to be UTC
const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Types which can be pulled leniently out of a [JsonValue]
pub trait FromJson: Sized {
    /// Convert a value, giving [None] if it's of an incompatible kind or can't be parsed
    fn from_json(value: &JsonValue) -> Option<Self>;

    /// The value used when nothing better is available
    fn zero() -> Self;
}

#[cfg(feature = "mixed_numerics")]
fn parse_integer<T: lexical::FromLexical>(text: &str) -> Option<T> {
    lexical::parse::<T, _>(text.trim()).ok()
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integer<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.trim().parse::<T>().ok()
}

impl FromJson for String {
    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn zero() -> Self {
        String::new()
    }
}

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Boolean(b) => Some(*b),
            JsonValue::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn zero() -> Self {
        false
    }
}

impl FromJson for i32 {
    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(_) => value.as_i32(),
            JsonValue::String(s) => parse_integer::<i32>(s),
            _ => None,
        }
    }

    fn zero() -> Self {
        0
    }
}

impl FromJson for i64 {
    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(_) => value.as_i64(),
            JsonValue::String(s) => parse_integer::<i64>(s),
            _ => None,
        }
    }

    fn zero() -> Self {
        0
    }
}

impl FromJson for f64 {
    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => Some(*n),
            JsonValue::String(s) => fast_float::parse::<f64, _>(s.trim()).ok(),
            _ => None,
        }
    }

    fn zero() -> Self {
        0.0
    }
}

impl FromJson for DateTime<Utc> {
    fn from_json(value: &JsonValue) -> Option<Self> {
        let text = value.as_str()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.with_timezone(&Utc));
        }
        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    fn zero() -> Self {
        DateTime::<Utc>::MIN_UTC
    }
}

/// Pull a typed value out of an object. Gives [None] if there's no object, no such key, or the
/// value can't be converted
pub fn get_as<T: FromJson>(object: Option<&JsonObject>, key: &str) -> Option<T> {
    object?.try_get(key).and_then(T::from_json)
}

/// As [get_as], falling back to `default`
pub fn get_as_or<T: FromJson>(object: Option<&JsonObject>, key: &str, default: T) -> T {
    get_as(object, key).unwrap_or(default)
}

/// As [get_as], falling back to the type's [FromJson::zero]
pub fn get_as_or_zero<T: FromJson>(object: Option<&JsonObject>, key: &str) -> T {
    get_as(object, key).unwrap_or_else(T::zero)
}

/// Get a nested object
pub fn get_object<'a>(object: Option<&'a JsonObject>, key: &str) -> Option<&'a JsonObject> {
    object?.try_get(key).and_then(JsonValue::as_object)
}

/// Get a nested array
pub fn get_array<'a>(object: Option<&'a JsonObject>, key: &str) -> Option<&'a JsonArray> {
    object?.try_get(key).and_then(JsonValue::as_array)
}

/// Enumerations which can be read from their wire names. Every implementation has a sentinel
/// member used for anything it doesn't recognise
pub trait JsonEnum: Sized {
    /// The sentinel member
    fn unknown() -> Self;

    /// Case-insensitive lookup of a member by wire name
    fn from_name(name: &str) -> Option<Self>;
}

/// Declare an enumeration along with its wire names and an implementation of [JsonEnum]. An
/// `Unknown` member is added automatically
///
/// ```
/// use billing_json::json_enum;
///
/// json_enum! {
///     pub enum IntervalUnit {
///         Day = "day",
///         Month = "month",
///     }
/// }
/// ```
#[macro_export]
macro_rules! json_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident = $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        $vis enum $name {
            $($variant,)+
            Unknown,
        }

        impl $crate::accessors::JsonEnum for $name {
            fn unknown() -> Self {
                $name::Unknown
            }

            fn from_name(name: &str) -> Option<Self> {
                $(
                    if name.eq_ignore_ascii_case($wire) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }
    };
}

/// Read an enumeration member, giving the unknown member if the key is missing, isn't a string
/// or doesn't name a member
pub fn get_enum<E: JsonEnum>(object: Option<&JsonObject>, key: &str) -> E {
    get_as::<String>(object, key)
        .and_then(|name| E::from_name(&name))
        .unwrap_or_else(E::unknown)
}

/// As [get_enum], but with any `-` in the wire value read as `_` first
pub fn get_enum_dashed<E: JsonEnum>(object: Option<&JsonObject>, key: &str) -> E {
    get_as::<String>(object, key)
        .and_then(|name| E::from_name(&name.replace('-', "_")))
        .unwrap_or_else(E::unknown)
}

/// Strictly check that a key is present and holds the expected kind of value
pub fn validate_field<'a>(
    object: Option<&'a JsonObject>,
    key: &str,
    expected: ValueKind,
) -> ParserResult<&'a JsonValue> {
    let value = match object.and_then(|o| o.try_get(key)) {
        Some(value) => value,
        None => return validation_error!(Details::KeyNotFound(key.to_string())),
    };
    if value.kind() != expected {
        return validation_error!(Details::TypeMismatch {
            key: key.to_string(),
            expected,
            found: value.kind(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_object;

    json_enum! {
        enum State {
            Active = "active",
            PastDue = "past_due",
        }
    }

    #[test]
    fn missing_object_should_give_defaults() {
        assert_eq!(get_as::<i32>(None, "id"), None);
        assert_eq!(get_as_or_zero::<String>(None, "id"), "");
        assert_eq!(get_enum::<State>(None, "state"), State::Unknown);
    }

    #[test]
    fn integers_should_truncate_numbers_and_parse_strings() {
        let object = parse_object(r#"{"a": 7.9, "b": " 42 ", "c": "4.5", "d": true}"#).unwrap();
        assert_eq!(get_as::<i32>(Some(&object), "a"), Some(7));
        assert_eq!(get_as::<i64>(Some(&object), "b"), Some(42));
        assert_eq!(get_as::<i32>(Some(&object), "c"), None);
        assert_eq!(get_as_or::<i32>(Some(&object), "d", -1), -1);
    }

    #[test]
    fn dashed_enum_values_should_match_underscored_names() {
        let object = parse_object(r#"{"state": "Past-Due"}"#).unwrap();
        assert_eq!(get_enum_dashed::<State>(Some(&object), "state"), State::PastDue);
        assert_eq!(get_enum::<State>(Some(&object), "state"), State::Unknown);
    }

    #[test]
    fn strict_validation_should_report_mismatches() {
        let object = parse_object(r#"{"id": "12"}"#).unwrap();
        let err = validate_field(Some(&object), "id", ValueKind::Number).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.details,
            Details::TypeMismatch {
                key: "id".to_string(),
                expected: ValueKind::Number,
                found: ValueKind::String,
            }
        );
        assert!(validate_field(Some(&object), "id", ValueKind::String).is_ok());
    }
}
