//! Shallow patches applied over a filter state.

use super::FilterValue;

/// An ordered set of replacements for [`FilterState::merged`](super::FilterState::merged).
///
/// `Some(value)` replaces the key, `None` deletes it. Setting the same key
/// twice keeps only the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    entries: Vec<(String, Option<FilterValue>)>,
}

impl FilterPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `key` with `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Delete `key`.
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Insert an entry, replacing an earlier entry for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<FilterValue>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FilterValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
