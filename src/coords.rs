//! Coordinate structure used to reference specific locations within parser input

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coords {
    /// The absolute position, counted in UTF-16 code units
    pub absolute: usize,
    /// The row position
    pub line: usize,
    /// The column position, counted in UTF-16 code units
    pub column: usize,
}

impl Coords {
    /// Compute the [Coords] of a given byte offset within some text. Positions count UTF-16
    /// code units, so a character outside the basic multilingual plane counts twice. Offsets
    /// which fall beyond the end of the text are clamped to the end, and offsets which fall
    /// inside a multi-byte character are attributed to that character.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut coords = Coords::default();
        for (index, c) in text.char_indices() {
            if index >= offset {
                break;
            }
            if index + c.len_utf8() > offset {
                break;
            }
            coords.absolute += c.len_utf16();
            if c == '\n' {
                coords.line += 1;
                coords.column = 0;
            } else {
                coords.column += c.len_utf16();
            }
        }
        coords
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Eq for Coords {}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::Coords;

    #[test]
    fn offsets_should_map_to_character_positions() {
        let coords = Coords::from_offset("{\"a\":}", 5);
        assert_eq!(coords.absolute, 5);
        assert_eq!(coords.line, 0);
        assert_eq!(coords.column, 5);
    }

    #[test]
    fn multibyte_characters_should_count_once() {
        // 'é' is two bytes wide
        let coords = Coords::from_offset("é}", 2);
        assert_eq!(coords.absolute, 1);
    }

    #[test]
    fn astral_characters_should_count_as_surrogate_pairs() {
        // '😀' is four bytes wide and two UTF-16 units
        let coords = Coords::from_offset("\u{1F600}}", 4);
        assert_eq!(coords.absolute, 2);
        assert_eq!(coords.column, 2);
    }

    #[test]
    fn newlines_should_reset_columns() {
        let coords = Coords::from_offset("{\n  \"a\"", 4);
        assert_eq!(coords.line, 1);
        assert_eq!(coords.column, 2);
        assert_eq!(coords.absolute, 4);
    }

    #[test]
    fn coords_should_order_by_absolute_position() {
        let a = Coords::from_offset("abc", 1);
        let b = Coords::from_offset("abc", 2);
        assert!(a < b);
        assert_eq!(format!("{}", a), "[abs: 1, line: 0, column: 1]");
    }
}
