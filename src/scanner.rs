//! Scanner primitives shared by the JSON parser and the markup reader.  A [Cursor] is just the
//! input text together with the current byte position within it; every parse routine takes
//! the cursor by mutable reference and leaves it positioned after whatever it consumed.
//!
//! Only spaces and newlines count as whitespace between tokens, so tabs
//! and carriage returns between tokens are treated as unexpected characters.

use crate::coords::Coords;
use crate::errors::{Details, ParserResult};
use crate::parser_error;

/// Advance `position` past any run of spaces and newlines within `text`
pub fn skip_whitespace(text: &str, position: &mut usize) {
    let bytes = text.as_bytes();
    while *position < bytes.len() && matches!(bytes[*position], b' ' | b'\n') {
        *position += 1;
    }
}

/// Parser state: the input and a position within it
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The complete input
    text: &'a str,
    /// Byte offset of the next unconsumed character
    position: usize,
    /// Number of enclosing structures the cursor is currently inside
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor positioned at the start of the input
    pub fn new(text: &'a str) -> Self {
        Cursor {
            text,
            position: 0,
            depth: 0,
        }
    }

    /// Create a new cursor at a given byte offset
    pub fn at(text: &'a str, position: usize) -> Self {
        Cursor {
            text,
            position,
            depth: 0,
        }
    }

    /// The complete input
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The current byte offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// The [Coords] of the current position
    pub fn coords(&self) -> Coords {
        Coords::from_offset(self.text, self.position)
    }

    /// Everything from the current position onwards
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.position..).unwrap_or("")
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Look at the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume the next character
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Move forward a number of bytes, never beyond the end of the input
    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.text.len());
    }

    /// Skip spaces and newlines. Running this twice in a row is the same as running it once
    pub fn skip_whitespace(&mut self) {
        skip_whitespace(self.text, &mut self.position)
    }

    /// The current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested structure, failing if that takes the depth beyond `limit`
    pub fn descend(&mut self, limit: usize) -> ParserResult<()> {
        if self.depth >= limit {
            return parser_error!(Details::NestingTooDeep(limit), self);
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a nested structure entered through [Cursor::descend]
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Does the remaining input start with `prefix`?
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Find the byte offset (from the current position) of the next occurrence of either of
    /// two ASCII characters
    pub fn find_either(&self, a: u8, b: u8) -> Option<usize> {
        self.remaining()
            .as_bytes()
            .iter()
            .position(|&byte| byte == a || byte == b)
    }
}
