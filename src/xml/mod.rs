//! Markup support. Some endpoints answer (particularly with error bodies) in markup rather than
//! JSON; the [convert] module turns such a document into JSON text which can then go through
//! the regular parser.
//!
//! ```
//! use billing_json::parser::parse_object;
//! use billing_json::xml::convert_str;
//!
//! let json = convert_str("<errors><error>Card expired</error></errors>").unwrap();
//! assert_eq!(json, r#"{"errors": {"error": "Card expired"}}"#);
//! assert!(parse_object(&json).is_ok());
//! ```

/// Structural markup to JSON conversion
pub mod convert;
/// The in-memory markup tree
pub mod markup;
/// Markup text to tree
pub mod reader;

pub use convert::{convert, convert_str};
pub use markup::{Element, Node};
pub use reader::read_document;
