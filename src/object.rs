//! JSON objects. Keys are unique and kept in the order they were parsed, although equality
//! between two objects ignores that order.
use indexmap::map::{Iter, Keys};
use indexmap::IndexMap;

use crate::errors::{Details, ParserResult};
use crate::{validation_error, JsonValue};

/// A parsed JSON object. There is no public mutation API, values only ever get into an object
/// through the parser or through [JsonObject::from_pairs].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    entries: IndexMap<String, JsonValue>,
}

impl JsonObject {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build an object from a sequence of pairs, rejecting duplicate keys in the same way the
    /// parser does
    pub fn from_pairs<K, I>(pairs: I) -> ParserResult<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, JsonValue)>,
    {
        let mut object = JsonObject::new();
        for (key, value) in pairs {
            let key = key.into();
            if !object.insert(key.clone(), value) {
                return crate::parser_error!(Details::DuplicateKey(key));
            }
        }
        Ok(object)
    }

    /// Add a new pair. Returns false, leaving the object untouched, if the key already exists
    pub(crate) fn insert(&mut self, key: String, value: JsonValue) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Look up a key, treating an absent key as an error
    pub fn get(&self, key: &str) -> ParserResult<&JsonValue> {
        match self.entries.get(key) {
            Some(value) => Ok(value),
            None => validation_error!(Details::KeyNotFound(key.to_string())),
        }
    }

    /// Look up a key, returning [None] if it's absent
    pub fn try_get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The keys of the object
    pub fn keys(&self) -> Keys<'_, String, JsonValue> {
        self.entries.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, JsonValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::JsonObject;
    use crate::errors::Details;
    use crate::JsonValue;

    #[test]
    fn duplicate_pairs_should_be_rejected() {
        let result = JsonObject::from_pairs(vec![
            ("a", JsonValue::from(1.0)),
            ("a", JsonValue::from(2.0)),
        ]);
        assert_eq!(
            result.unwrap_err().details,
            Details::DuplicateKey("a".to_string())
        );
    }

    #[test]
    fn absent_keys_should_fail_unless_tried() {
        let object = JsonObject::from_pairs(vec![("a", JsonValue::from(true))]).unwrap();
        assert!(object.get("b").unwrap_err().is_validation());
        assert!(object.try_get("b").is_none());
        assert_eq!(object.get("a").unwrap(), &JsonValue::Boolean(true));
    }

    #[test]
    fn equality_should_ignore_key_order() {
        let lhs = JsonObject::from_pairs(vec![
            ("a", JsonValue::from(1.0)),
            ("b", JsonValue::from("x")),
        ])
        .unwrap();
        let rhs = JsonObject::from_pairs(vec![
            ("b", JsonValue::from("x")),
            ("a", JsonValue::from(1.0)),
        ])
        .unwrap();
        assert_eq!(lhs, rhs);
        assert_eq!(lhs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
