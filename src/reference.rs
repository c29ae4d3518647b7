//! Link reference definitions.

use rustc_hash::FxHashMap;

/// A link reference definition (URL + optional title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub url: String,
    pub title: Option<String>,
}

/// Definitions of one top-level parse, keyed by lowercased label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    by_label: FxHashMap<String, Definition>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. The last definition of a label wins.
    pub fn insert(&mut self, label: &str, def: Definition) {
        self.by_label.insert(normalize_label(label), def);
    }

    pub fn get(&self, label: &str) -> Option<&Definition> {
        self.by_label.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_label.clear();
    }
}

/// Case-fold a label for lookup.
#[inline]
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}
