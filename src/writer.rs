//! Compact JSON rendering of the value model, used for logging and for handing trees back to
//! callers as text.
//!
//! Re-parsing rendered text gives back an equal tree, with one exception: JSON can't spell a
//! non-finite number, so infinities (which is what an out-of-range literal such as `1e400`
//! parses to) and `NaN` are written as `null`. Read back, such a number becomes a gap in an
//! array or a missing member in an object.
use std::fmt::{Display, Formatter, Write};

use crate::{JsonArray, JsonObject, JsonValue};

/// Write a string literal, quotes included
fn write_escaped(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() && (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl Display for JsonValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonValue::String(s) => write_escaped(f, s),
            JsonValue::Number(n) if n.is_finite() => write!(f, "{}", n),
            JsonValue::Number(_) => f.write_str("null"),
            JsonValue::Boolean(b) => write!(f, "{}", b),
            JsonValue::Object(o) => o.fmt(f),
            JsonValue::Array(a) => a.fmt(f),
        }
    }
}

impl Display for JsonObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_char(',')?;
            }
            write_escaped(f, key)?;
            f.write_char(':')?;
            value.fmt(f)?;
        }
        f.write_char('}')
    }
}

impl Display for JsonArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        for (index, slot) in self.slots().enumerate() {
            if index > 0 {
                f.write_char(',')?;
            }
            match slot {
                Some(value) => value.fmt(f)?,
                None => f.write_str("null")?,
            }
        }
        f.write_char(']')
    }
}
