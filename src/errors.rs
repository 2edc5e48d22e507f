//! General error types for the parser, the accessors and the markup reader

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::ValueKind;

/// Global result type used throughout the crate
pub type ParserResult<T> = Result<T, Error>;

/// Enumeration of the different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Structural errors raised whilst parsing JSON or reading markup
    Parser,
    /// Errors raised by the strict field validator on otherwise well-formed input
    Validator,
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    /// A character which isn't valid at the current position
    UnexpectedCharacter(char),
    /// The input ran out before a structure was closed
    UnexpectedEndOfString,
    /// The input isn't terminated by a closing brace
    NotAnObject,
    /// The input isn't terminated by a closing bracket
    NotAnArray,
    /// An object key occurred more than once
    DuplicateKey(String),
    /// A run of numeric characters that doesn't form a valid number
    InvalidNumericRepresentation(String),
    /// A `\u` escape without four hex digits behind it
    InvalidUnicodeEscapeSequence(String),
    /// Fewer characters remain than the literal being matched needs
    InvalidLiteral,
    /// Objects, arrays or elements nested deeper than the given limit
    NestingTooDeep(usize),
    /// The markup reader found something it couldn't make sense of
    InvalidMarkup(String),
    /// Raw input that isn't valid for the chosen encoding, at the given byte offset
    InvalidEncoding(usize),
    /// A file couldn't be opened
    InvalidFile,
    /// A required key wasn't present
    KeyNotFound(String),
    /// A key was present but held a different kind of value
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
    /// The input being parsed when the error occurred, if the error is positional
    pub input: Option<String>,
}

impl Error {
    /// Is this a syntax error raised whilst parsing?
    pub fn is_structural(&self) -> bool {
        self.stage == Stage::Parser
    }

    /// Is this a strict accessor error raised against well-formed input?
    pub fn is_validation(&self) -> bool {
        self.stage == Stage::Validator
    }

    /// The absolute position of the error in UTF-16 code units, if it has one
    pub fn position(&self) -> Option<usize> {
        self.coords.map(|c| c.absolute)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.details, self.coords, &self.input) {
            (Details::UnexpectedCharacter(c), Some(coords), Some(input)) => write!(
                f,
                "unexpected character '{}' at position {}, input: '{}'",
                c, coords.absolute, input
            ),
            (Details::DuplicateKey(key), Some(coords), Some(input)) => write!(
                f,
                "duplicate key '{}' at position {}, input: '{}'",
                key, coords.absolute, input
            ),
            (details, Some(coords), _) => {
                write!(f, "{} at position {}", details, coords.absolute)
            }
            (details, None, _) => write!(f, "{}", details),
        }
    }
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
            Details::UnexpectedEndOfString => write!(f, "unexpected end of string"),
            Details::NotAnObject => write!(f, "input is not a JSON object"),
            Details::NotAnArray => write!(f, "input is not a JSON array"),
            Details::DuplicateKey(key) => write!(f, "duplicate key '{}'", key),
            Details::InvalidNumericRepresentation(s) => {
                write!(f, "invalid numeric representation '{}'", s)
            }
            Details::InvalidUnicodeEscapeSequence(s) => {
                write!(f, "invalid unicode escape sequence '\\u{}'", s)
            }
            Details::InvalidLiteral => write!(f, "input too short for literal"),
            Details::NestingTooDeep(limit) => {
                write!(f, "nesting exceeds the maximum depth of {}", limit)
            }
            Details::InvalidMarkup(reason) => write!(f, "invalid markup: {}", reason),
            Details::InvalidEncoding(offset) => {
                write!(f, "invalid byte sequence at byte offset {}", offset)
            }
            Details::InvalidFile => write!(f, "unable to open input file"),
            Details::KeyNotFound(key) => write!(f, "key not found: '{}'", key),
            Details::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "type mismatch for key '{}': expected {}, found {}",
                key, expected, found
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Build a structural error, optionally positioned at the current location of a
/// [crate::scanner::Cursor]
#[macro_export]
macro_rules! parser_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
            input: None,
        })
    };
    ($details: expr, $cursor: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($cursor.coords()),
            input: Some($cursor.text().to_string()),
        })
    };
}

/// Build a strict accessor error
#[macro_export]
macro_rules! validation_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Validator,
            details: $details,
            coords: None,
            input: None,
        })
    };
}

#[cfg(test)]
mod tests {
    use super::{Details, Error, ParserResult, Stage};
    use crate::coords::Coords;

    #[test]
    fn positional_errors_should_render_offending_input() {
        let err = Error {
            stage: Stage::Parser,
            details: Details::UnexpectedCharacter('}'),
            coords: Some(Coords::from_offset("{\"a\":}", 5)),
            input: Some("{\"a\":}".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unexpected character '}' at position 5, input: '{\"a\":}'"
        );
        assert!(err.is_structural());
        assert_eq!(err.position(), Some(5));
    }

    #[test]
    fn message_only_errors_should_render_plainly() {
        let result: ParserResult<()> = parser_error!(Details::UnexpectedEndOfString);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unexpected end of string");
        assert_eq!(err.position(), None);
    }

    #[test]
    fn validation_errors_should_be_distinguishable() {
        let result: ParserResult<()> = validation_error!(Details::KeyNotFound("id".into()));
        let err = result.unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_structural());
        assert_eq!(err.to_string(), "key not found: 'id'");
    }
}
