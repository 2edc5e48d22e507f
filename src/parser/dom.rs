//! The DOM parser
//!
//! A recursive-descent parser with one routine per kind of value, dispatched on a single
//! character of lookahead. Each routine takes a [Cursor] and leaves it just past whatever it
//! consumed. Parsing is all-or-nothing: the first structural problem aborts the whole parse.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, trace};

use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, ParserResult};
use crate::parser_error;
use crate::scanner::Cursor;
use crate::{JsonArray, JsonObject, JsonValue};

/// Characters which may appear within a number. No attempt is made to check the ordering of
/// these, malformed runs are picked up when the run is converted
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
}

/// Log the error behind a failed parse before handing it back
fn traced<T>(result: ParserResult<T>) -> ParserResult<T> {
    if let Err(err) = &result {
        trace!(%err, "parse failed");
    }
    result
}

/// How deeply objects and arrays may nest before a parse is abandoned
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Main JSON parser struct
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_encoding(Encoding::default())
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            decoders: Default::default(),
            encoding,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth. Input nested any deeper fails with
    /// [Details::NestingTooDeep]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// Read, decode and parse the contents of a file
    pub fn parse_file<PathLike: AsRef<Path>>(
        &self,
        path: PathLike,
    ) -> ParserResult<Option<JsonValue>> {
        debug!(path = %path.as_ref().display(), encoding = ?self.encoding, "parsing file");
        match File::open(&path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                let text = self.decoders.decode_all(&mut reader, self.encoding)?;
                self.parse_str(&text)
            }
            Err(_) => {
                parser_error!(Details::InvalidFile)
            }
        }
    }

    /// Decode and parse a buffer of bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Option<JsonValue>> {
        let mut reader = BufReader::new(bytes);
        let text = traced(self.decoders.decode_all(&mut reader, self.encoding))?;
        self.parse_str(&text)
    }

    /// Parse a top-level object or array. Blank input has no value. Anything after the
    /// closing brace or bracket of the top-level value is ignored
    pub fn parse_str(&self, text: &str) -> ParserResult<Option<JsonValue>> {
        debug!(length = text.len(), "parsing json");
        let mut cursor = Cursor::new(text);
        cursor.skip_whitespace();
        traced(match cursor.peek() {
            None => Ok(None),
            Some('{') => self
                .parse_object_at(&mut cursor)
                .map(|o| o.map(JsonValue::Object)),
            Some('[') => self
                .parse_array_at(&mut cursor)
                .map(|a| Some(JsonValue::Array(a))),
            Some(c) => parser_error!(Details::UnexpectedCharacter(c), cursor),
        })
    }

    /// Parse a complete object. The trimmed input must finish with a closing brace
    pub fn parse_object(&self, text: &str) -> ParserResult<JsonObject> {
        debug!(length = text.len(), "parsing json object");
        if !text.trim().ends_with('}') {
            trace!("input is not terminated by a closing brace");
            return parser_error!(Details::NotAnObject);
        }
        let mut cursor = Cursor::new(text);
        traced(
            self.parse_object_at(&mut cursor)
                .and_then(|object| match object {
                    Some(object) => Ok(object),
                    None => parser_error!(Details::NotAnObject),
                }),
        )
    }

    /// Parse a complete array. The trimmed input must finish with a closing bracket
    pub fn parse_array(&self, text: &str) -> ParserResult<JsonArray> {
        debug!(length = text.len(), "parsing json array");
        if !text.trim().ends_with(']') {
            trace!("input is not terminated by a closing bracket");
            return parser_error!(Details::NotAnArray);
        }
        let mut cursor = Cursor::new(text);
        traced(self.parse_array_at(&mut cursor))
    }

    /// Parse an object starting at the cursor. A cursor sitting at the end of the input gives
    /// [None]. A `null` member is left out of the object altogether
    pub fn parse_object_at(&self, cursor: &mut Cursor) -> ParserResult<Option<JsonObject>> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Ok(None),
            Some('{') => (),
            Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
        }
        cursor.descend(self.max_depth)?;
        cursor.advance(1);
        let object = self.parse_members(cursor);
        cursor.ascend();
        object.map(Some)
    }

    /// Parse the members of an object, up to and including the closing brace
    fn parse_members(&self, cursor: &mut Cursor) -> ParserResult<JsonObject> {
        let mut object = JsonObject::new();
        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                Some('}') => {
                    cursor.advance(1);
                    break;
                }
                None => return parser_error!(Details::UnexpectedEndOfString),
                Some(_) => (),
            }

            let key_start = cursor.clone();
            let key = self.parse_string_at(cursor)?;
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(':') => cursor.advance(1),
                Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
                None => return parser_error!(Details::UnexpectedEndOfString),
            }

            if let Some(value) = self.parse_value_at(cursor)? {
                if !object.insert(key.clone(), value) {
                    return parser_error!(Details::DuplicateKey(key), key_start);
                }
            }

            cursor.skip_whitespace();
            match cursor.peek() {
                Some('}') => {
                    cursor.advance(1);
                    break;
                }
                Some(',') => cursor.advance(1),
                Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
                None => return parser_error!(Details::UnexpectedEndOfString),
            }
        }
        Ok(object)
    }

    /// Parse an array starting at the cursor. `null` elements are kept as empty slots
    pub fn parse_array_at(&self, cursor: &mut Cursor) -> ParserResult<JsonArray> {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some('[') => (),
            Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
            None => return parser_error!(Details::UnexpectedEndOfString),
        }
        cursor.descend(self.max_depth)?;
        cursor.advance(1);
        let array = self.parse_elements(cursor);
        cursor.ascend();
        array
    }

    /// Parse the elements of an array, up to and including the closing bracket
    fn parse_elements(&self, cursor: &mut Cursor) -> ParserResult<JsonArray> {
        let mut array = JsonArray::new();
        cursor.skip_whitespace();
        if cursor.peek() == Some(']') {
            cursor.advance(1);
            return Ok(array);
        }

        while !cursor.at_end() {
            array.push(self.parse_value_at(cursor)?);
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(']') => {
                    cursor.advance(1);
                    return Ok(array);
                }
                Some(',') => cursor.advance(1),
                Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
                None => break,
            }
        }
        parser_error!(Details::UnexpectedEndOfString)
    }

    /// Parse a quoted string starting at the cursor, resolving any escape sequences. Unknown
    /// escapes are copied through as the escaped character. A string which is never closed
    /// takes the remainder of the input
    pub fn parse_string_at(&self, cursor: &mut Cursor) -> ParserResult<String> {
        match cursor.peek() {
            Some('"') => cursor.advance(1),
            Some(c) => return parser_error!(Details::UnexpectedCharacter(c), cursor),
            None => return parser_error!(Details::UnexpectedEndOfString),
        }

        let mut buffer = String::new();
        loop {
            let remaining = cursor.remaining();
            match cursor.find_either(b'"', b'\\') {
                None => {
                    buffer.push_str(remaining);
                    cursor.advance(remaining.len());
                    return Ok(buffer);
                }
                Some(offset) => {
                    buffer.push_str(&remaining[..offset]);
                    cursor.advance(offset);
                    match cursor.next_char() {
                        Some('"') => return Ok(buffer),
                        _ => self.parse_escape_sequence(cursor, &mut buffer)?,
                    }
                }
            }
        }
    }

    /// Decode the escape sequence following a backslash
    fn parse_escape_sequence(&self, cursor: &mut Cursor, buffer: &mut String) -> ParserResult<()> {
        match cursor.next_char() {
            Some('b') => buffer.push('\u{08}'),
            Some('t') => buffer.push('\t'),
            Some('n') => buffer.push('\n'),
            Some('f') => buffer.push('\u{0c}'),
            Some('r') => buffer.push('\r'),
            Some('u') => {
                let unit = self.parse_code_unit(cursor)?;
                buffer.push(self.decode_code_unit(cursor, unit));
            }
            Some(c) => buffer.push(c),
            None => (),
        }
        Ok(())
    }

    /// Read the four hex digits of a `\u` escape as a single UTF-16 code unit
    fn parse_code_unit(&self, cursor: &mut Cursor) -> ParserResult<u16> {
        let remaining = cursor.remaining();
        let digits = match remaining.get(..4) {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => digits,
            _ => {
                let found: String = remaining.chars().take(4).collect();
                return parser_error!(Details::InvalidUnicodeEscapeSequence(found));
            }
        };
        match u16::from_str_radix(digits, 16) {
            Ok(unit) => {
                cursor.advance(4);
                Ok(unit)
            }
            Err(_) => parser_error!(Details::InvalidUnicodeEscapeSequence(digits.to_string())),
        }
    }

    /// Turn a code unit into a char. A high surrogate immediately followed by an escaped low
    /// surrogate is combined into a single char, any other surrogate becomes U+FFFD
    fn decode_code_unit(&self, cursor: &mut Cursor, unit: u16) -> char {
        if (0xD800..=0xDBFF).contains(&unit) && cursor.starts_with("\\u") {
            let mut lookahead = cursor.clone();
            lookahead.advance(2);
            if let Ok(low) = self.parse_code_unit(&mut lookahead) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    if let Some(c) = char::from_u32(combined) {
                        *cursor = lookahead;
                        return c;
                    }
                }
            }
        }
        char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Parse the maximal run of numeric characters starting at the cursor as a double
    pub fn parse_number_at(&self, cursor: &mut Cursor) -> ParserResult<f64> {
        let remaining = cursor.remaining();
        let run = remaining
            .bytes()
            .take_while(|b| is_numeric_char(char::from(*b)))
            .count();
        let digits = &remaining[..run];
        cursor.advance(run);
        match fast_float::parse::<f64, _>(digits) {
            Ok(n) => Ok(n),
            Err(_) => parser_error!(Details::InvalidNumericRepresentation(digits.to_string())),
        }
    }

    /// Parse any value, dispatching on the next non-space character. A `null` literal gives
    /// [None]. Literals are matched without regard to case
    pub fn parse_value_at(&self, cursor: &mut Cursor) -> ParserResult<Option<JsonValue>> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => parser_error!(Details::UnexpectedEndOfString),
            Some('"') => Ok(Some(JsonValue::String(self.parse_string_at(cursor)?))),
            Some('{') => Ok(self.parse_object_at(cursor)?.map(JsonValue::Object)),
            Some('[') => Ok(Some(JsonValue::Array(self.parse_array_at(cursor)?))),
            Some(c) if is_numeric_char(c) => {
                Ok(Some(JsonValue::Number(self.parse_number_at(cursor)?)))
            }
            Some('n' | 'N') => self.match_literal(cursor, "null", None),
            Some('t' | 'T') => self.match_literal(cursor, "true", Some(JsonValue::Boolean(true))),
            Some('f' | 'F') => {
                self.match_literal(cursor, "false", Some(JsonValue::Boolean(false)))
            }
            Some(c) => parser_error!(Details::UnexpectedCharacter(c), cursor),
        }
    }

    /// Match a literal, consuming it and producing `value` if it's found
    fn match_literal(
        &self,
        cursor: &mut Cursor,
        literal: &str,
        value: Option<JsonValue>,
    ) -> ParserResult<Option<JsonValue>> {
        let remaining = cursor.remaining();
        if remaining.len() < literal.len() {
            return parser_error!(Details::InvalidLiteral);
        }
        match remaining.get(..literal.len()) {
            Some(candidate) if candidate.eq_ignore_ascii_case(literal) => {
                cursor.advance(literal.len());
                Ok(value)
            }
            _ => {
                let c = cursor.peek().unwrap_or_default();
                parser_error!(Details::UnexpectedCharacter(c), cursor)
            }
        }
    }
}
