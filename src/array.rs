//! JSON arrays. A `null` element occupies a slot with no value in it, so the length of an
//! array always matches the number of elements in the source text.
use std::slice::Iter;

use crate::JsonValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    slots: Vec<Option<JsonValue>>,
}

impl JsonArray {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build an array from a sequence of slots, [None] standing in for `null`
    pub fn from_slots<I: IntoIterator<Item = Option<JsonValue>>>(slots: I) -> Self {
        JsonArray {
            slots: slots.into_iter().collect(),
        }
    }

    /// Build an array without any `null` gaps
    pub fn from_values<I: IntoIterator<Item = JsonValue>>(values: I) -> Self {
        Self::from_slots(values.into_iter().map(Some))
    }

    pub(crate) fn push(&mut self, slot: Option<JsonValue>) {
        self.slots.push(slot)
    }

    /// The number of elements, `null` gaps included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the value at a given index. Both gaps and out of range indexes give [None]
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Get the slot at a given index, so that a `null` element (`Some(None)`) can be told apart
    /// from an index past the end (`None`)
    pub fn slot(&self, index: usize) -> Option<Option<&JsonValue>> {
        self.slots.get(index).map(|slot| slot.as_ref())
    }

    /// Iterate over every slot
    pub fn iter(&self) -> impl Iterator<Item = Option<&JsonValue>> {
        self.slots.iter().map(|slot| slot.as_ref())
    }

    /// Iterate over the values only, skipping `null` gaps
    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.slots.iter().flatten()
    }

    pub(crate) fn slots(&self) -> Iter<'_, Option<JsonValue>> {
        self.slots.iter()
    }
}
