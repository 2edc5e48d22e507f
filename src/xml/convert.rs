//! Structural conversion of a markup tree into JSON text.
//!
//! The attributes and child elements of each element are gathered into one map keyed by local
//! name, each key collecting every value found under it. Attribute values are strings, an
//! element holding nothing but text becomes that text, and an element with no attributes and
//! no children becomes `null`. Text sitting alongside child elements is stored under a
//! `"value"` key. Keys are written in sorted order.
//!
//! There is no schema to say what should be an array, so a key is written as an array only
//! when it collected more than one value and its elements really do repeat among their
//! siblings. Anything else is written as a single field holding the first value collected.
use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::debug;

use crate::errors::ParserResult;
use crate::xml::markup::{local_name, Element, Node};
use crate::xml::reader::read_document;

/// Key used for text found alongside child elements
const TEXT_KEY: &str = "value";

/// A single value collected under a key
#[derive(Debug, Clone, Copy, PartialEq)]
enum Entry<'a> {
    Null,
    Text(&'a str),
    Element(&'a Element),
}

/// Collapse a child element into the simplest entry that represents it
fn collapse(element: &Element) -> Entry<'_> {
    if element.attributes.is_empty() {
        match element.children.as_slice() {
            [] => return Entry::Null,
            [Node::Text(text)] => return Entry::Text(text),
            _ => (),
        }
    }
    Entry::Element(element)
}

/// Gather attributes and children by local name
fn collect_entries(element: &Element) -> BTreeMap<&str, Vec<Entry<'_>>> {
    let mut entries: BTreeMap<&str, Vec<Entry>> = BTreeMap::new();
    for (name, value) in &element.attributes {
        entries
            .entry(local_name(name))
            .or_default()
            .push(Entry::Text(value));
    }
    for child in &element.children {
        match child {
            Node::Text(text) => entries.entry(TEXT_KEY).or_default().push(Entry::Text(text)),
            Node::Element(e) => entries.entry(e.local_name()).or_default().push(collapse(e)),
        }
    }
    entries
}

/// Does `parent` hold more than one child element called `name`?
fn has_repeated_siblings(parent: &Element, name: &str) -> bool {
    parent
        .child_elements()
        .filter(|child| child.local_name() == name)
        .nth(1)
        .is_some()
}

/// Escape a string for inclusion within a JSON string literal
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_control() || c == '\'' {
            let _ = write!(escaped, "\\u{:04x}", c as u32);
            continue;
        }
        if matches!(c, '"' | '\\' | '/') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn write_key(out: &mut String, name: &str) {
    out.push('"');
    out.push_str(&escape(name));
    out.push_str("\": ");
}

fn write_entry(out: &mut String, name: &str, entry: &Entry, show_name: bool) {
    match entry {
        Entry::Element(element) => write_element(out, element, show_name),
        Entry::Null => {
            if show_name {
                write_key(out, name);
            }
            out.push_str("null");
        }
        Entry::Text(text) => {
            if show_name {
                write_key(out, name);
            }
            out.push('"');
            out.push_str(&escape(text.trim()));
            out.push('"');
        }
    }
}

fn write_element(out: &mut String, element: &Element, show_name: bool) {
    if show_name {
        write_key(out, element.local_name());
    }
    out.push('{');
    for (index, (name, values)) in collect_entries(element).iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        if values.len() > 1 && has_repeated_siblings(element, name) {
            write_key(out, name);
            out.push('[');
            for (position, value) in values.iter().enumerate() {
                if position > 0 {
                    out.push_str(", ");
                }
                write_entry(out, name, value, false);
            }
            out.push(']');
        } else if let Some(value) = values.first() {
            write_entry(out, name, value, true);
        }
    }
    out.push('}');
}

/// Convert a markup tree into JSON text. The result is an object with a single key, the local
/// name of the root element
pub fn convert(root: &Element) -> String {
    debug!(root = root.local_name(), "converting markup to json");
    let mut out = String::from("{");
    write_element(&mut out, root, true);
    out.push('}');
    out
}

/// Read markup text and convert it into JSON text
pub fn convert_str(text: &str) -> ParserResult<String> {
    read_document(text).map(|root| convert(&root))
}
