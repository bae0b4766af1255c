//! Attribute Snapshot
//!
//! Attributes of every element whose position was prefix-compatible with the
//! query pattern, keyed by rendered position.

use crate::matcher::is_exact_match;
use crate::path::{PathPattern, TraversalPosition};
use std::collections::btree_map::{self, BTreeMap};

/// Attribute name → value for one element
pub type Attributes = BTreeMap<String, String>;

/// Rendered position → attributes, write-once per position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSnapshot {
    entries: BTreeMap<String, Attributes>,
}

impl AttributeSnapshot {
    pub fn new() -> Self {
        AttributeSnapshot {
            entries: BTreeMap::new(),
        }
    }

    /// Insert attributes for `position` unless it already has an entry
    ///
    /// Returns `false` (leaving the first entry in place) on a repeat.
    pub(crate) fn insert_once(&mut self, position: String, attributes: Attributes) -> bool {
        match self.entries.entry(position) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(attributes);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Attributes recorded for a rendered position
    pub fn get(&self, position: &str) -> Option<&Attributes> {
        self.entries.get(position)
    }

    /// Value of one attribute at a rendered position
    pub fn value(&self, position: &str, name: &str) -> Option<&str> {
        self.entries
            .get(position)
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    /// Entries whose position exactly matches `pattern`, in key order
    ///
    /// An empty pattern selects everything.
    pub fn select(&self, pattern: &PathPattern) -> Vec<(&str, &Attributes)> {
        if pattern.is_empty() {
            return self.iter().collect();
        }
        self.entries
            .iter()
            .filter(|(key, _)| {
                key.parse::<TraversalPosition>()
                    .map(|position| is_exact_match(&position, pattern))
                    .unwrap_or(false)
            })
            .map(|(key, attrs)| (key.as_str(), attrs))
            .collect()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attributes)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, position: &str) -> bool {
        self.entries.contains_key(position)
    }

    pub fn into_inner(self) -> BTreeMap<String, Attributes> {
        self.entries
    }
}
