//! Cheap checks for deciding how a response body should be parsed.

use crate::xml::read_document;

/// Does the text look like a JSON object or array? Only the outermost characters are checked,
/// so a `true` here doesn't guarantee a successful parse
pub fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Is the text a well-formed markup document?
pub fn looks_like_xml(text: &str) -> bool {
    text.trim_start().starts_with('<') && read_document(text).is_ok()
}
