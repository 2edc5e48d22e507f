//! JSON parsing. The [dom::Parser] does the work; the functions in this module are shortcuts
//! which parse with a default (UTF-8) parser.

/// The DOM-based parser
pub mod dom;

pub use dom::Parser;

use crate::errors::ParserResult;
use crate::{JsonArray, JsonObject, JsonValue};

/// Parse a top-level object or array, see [Parser::parse_str]
pub fn parse(text: &str) -> ParserResult<Option<JsonValue>> {
    Parser::default().parse_str(text)
}

/// Parse a complete object, see [Parser::parse_object]
pub fn parse_object(text: &str) -> ParserResult<JsonObject> {
    Parser::default().parse_object(text)
}

/// Parse a complete array, see [Parser::parse_array]
pub fn parse_array(text: &str) -> ParserResult<JsonArray> {
    Parser::default().parse_array(text)
}
