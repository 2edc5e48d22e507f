//! Reads well-formed markup text into an [Element] tree.
//!
//! This isn't a validating reader. It understands elements, attributes, text, CDATA sections
//! and the predefined and numeric character entities, and skips the prolog, comments,
//! processing instructions and any document type declaration. Text between elements which is
//! nothing but whitespace is dropped.
use tracing::debug;

use crate::errors::{Details, ParserResult};
use crate::parser_error;
use crate::scanner::Cursor;
use crate::xml::markup::{Element, Node};

/// Byte order mark, skipped if it starts the document
const BOM: char = '\u{feff}';

/// How deeply elements may nest before a read is abandoned
pub const MAX_DEPTH: usize = 128;

fn invalid<T>(cursor: &Cursor, reason: &str) -> ParserResult<T> {
    parser_error!(Details::InvalidMarkup(reason.to_string()), cursor)
}

/// Markup whitespace is wider than the JSON scanner's
fn skip_whitespace(cursor: &mut Cursor) {
    while let Some(c) = cursor.peek() {
        if !c.is_whitespace() {
            break;
        }
        cursor.advance(c.len_utf8());
    }
}

/// Move past the next occurrence of `terminator`, returning everything before it
fn take_until<'a>(cursor: &mut Cursor<'a>, terminator: &str) -> ParserResult<&'a str> {
    let remaining = cursor.remaining();
    match remaining.find(terminator) {
        Some(index) => {
            cursor.advance(index + terminator.len());
            Ok(&remaining[..index])
        }
        None => invalid(cursor, &format!("expected '{}'", terminator)),
    }
}

/// Read an element or attribute name
fn read_name<'a>(cursor: &mut Cursor<'a>) -> ParserResult<&'a str> {
    let remaining = cursor.remaining();
    let length = remaining
        .find(|c: char| c.is_whitespace() || matches!(c, '/' | '>' | '=' | '<'))
        .unwrap_or(remaining.len());
    if length == 0 {
        return invalid(cursor, "expected a name");
    }
    cursor.advance(length);
    Ok(&remaining[..length])
}

/// Decode the code point of a `&#N;` or `&#xH;` reference
fn numeric_entity(code: &str) -> Option<char> {
    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

/// Replace character entity references with the characters they stand for
pub fn decode_entities(raw: &str) -> ParserResult<String> {
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let end = match rest[start..].find(';') {
            Some(end) => start + end,
            None => return parser_error!(Details::InvalidMarkup("unterminated entity".into())),
        };
        let entity = &rest[start + 1..end];
        let c = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity.strip_prefix('#').and_then(numeric_entity),
        };
        match c {
            Some(c) => decoded.push(c),
            None => {
                return parser_error!(Details::InvalidMarkup(format!(
                    "unknown entity '&{};'",
                    entity
                )))
            }
        }
        rest = &rest[end + 1..];
    }
    decoded.push_str(rest);
    Ok(decoded)
}

/// Skip anything which can appear outside of the root element
fn skip_miscellany(cursor: &mut Cursor) -> ParserResult<()> {
    loop {
        skip_whitespace(cursor);
        if cursor.starts_with("<?") {
            take_until(cursor, "?>")?;
        } else if cursor.starts_with("<!--") {
            take_until(cursor, "-->")?;
        } else if cursor.starts_with("<!DOCTYPE") {
            skip_doctype(cursor)?;
        } else {
            return Ok(());
        }
    }
}

/// Skip a document type declaration, including any internal subset
fn skip_doctype(cursor: &mut Cursor) -> ParserResult<()> {
    let mut depth = 0usize;
    while let Some(c) = cursor.next_char() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => return Ok(()),
            _ => (),
        }
    }
    invalid(cursor, "unterminated document type declaration")
}

/// Read a quoted attribute value, consuming the quotes
fn read_attribute_value(cursor: &mut Cursor) -> ParserResult<String> {
    let quote = match cursor.peek() {
        Some(c @ ('"' | '\'')) => c,
        _ => return invalid(cursor, "expected a quoted attribute value"),
    };
    cursor.advance(1);
    let raw = match quote {
        '"' => take_until(cursor, "\"")?,
        _ => take_until(cursor, "'")?,
    };
    decode_entities(raw)
}

/// Move any buffered text into the children of an element
fn flush_text(text: &mut String, children: &mut Vec<Node>) {
    if !text.trim().is_empty() {
        children.push(Node::Text(std::mem::take(text)));
    } else {
        text.clear();
    }
}

/// Read an element, its attributes and its content
fn read_element(cursor: &mut Cursor) -> ParserResult<Element> {
    cursor.descend(MAX_DEPTH)?;
    let element = read_element_body(cursor);
    cursor.ascend();
    element
}

fn read_element_body(cursor: &mut Cursor) -> ParserResult<Element> {
    match cursor.peek() {
        Some('<') => cursor.advance(1),
        _ => return invalid(cursor, "expected an element"),
    }
    let mut element = Element::new(read_name(cursor)?);

    loop {
        skip_whitespace(cursor);
        if cursor.starts_with("/>") {
            cursor.advance(2);
            return Ok(element);
        }
        if cursor.starts_with(">") {
            cursor.advance(1);
            break;
        }
        if cursor.at_end() {
            return invalid(cursor, "unterminated start tag");
        }
        let name = read_name(cursor)?;
        skip_whitespace(cursor);
        match cursor.peek() {
            Some('=') => cursor.advance(1),
            _ => return invalid(cursor, "expected '=' after an attribute name"),
        }
        skip_whitespace(cursor);
        let value = read_attribute_value(cursor)?;
        element.attributes.push((name.to_string(), value));
    }

    let mut text = String::new();
    loop {
        if cursor.at_end() {
            return invalid(cursor, &format!("element '{}' is never closed", element.name));
        }
        if cursor.starts_with("</") {
            let close = cursor.clone();
            cursor.advance(2);
            let name = read_name(cursor)?;
            if name != element.name {
                return invalid(
                    &close,
                    &format!("expected '</{}>', found '</{}>'", element.name, name),
                );
            }
            skip_whitespace(cursor);
            match cursor.peek() {
                Some('>') => cursor.advance(1),
                _ => return invalid(cursor, "unterminated end tag"),
            }
            flush_text(&mut text, &mut element.children);
            return Ok(element);
        }
        if cursor.starts_with("<!--") {
            take_until(cursor, "-->")?;
        } else if cursor.starts_with("<![CDATA[") {
            cursor.advance("<![CDATA[".len());
            text.push_str(take_until(cursor, "]]>")?);
        } else if cursor.starts_with("<?") {
            take_until(cursor, "?>")?;
        } else if cursor.starts_with("<") {
            flush_text(&mut text, &mut element.children);
            let child = read_element(cursor)?;
            element.children.push(Node::Element(child));
        } else {
            let remaining = cursor.remaining();
            let length = remaining.find('<').unwrap_or(remaining.len());
            text.push_str(&decode_entities(&remaining[..length])?);
            cursor.advance(length);
        }
    }
}

/// Read a complete document, returning its root element
pub fn read_document(text: &str) -> ParserResult<Element> {
    debug!(length = text.len(), "reading markup");
    let mut cursor = Cursor::new(text);
    if cursor.peek() == Some(BOM) {
        cursor.advance(BOM.len_utf8());
    }
    skip_miscellany(&mut cursor)?;
    let root = read_element(&mut cursor)?;
    skip_miscellany(&mut cursor)?;
    if !cursor.at_end() {
        return invalid(&cursor, "content after the root element");
    }
    Ok(root)
}
