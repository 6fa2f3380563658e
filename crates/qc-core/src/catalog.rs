//! Ordered, id-indexed collections of definitions.
//!
//! Quest and item datasets are loaded from files whose order matters for
//! display (the quest board lists quests in file order), so a catalog keeps
//! insertion order alongside a hash index.

use std::collections::HashMap;
use std::hash::Hash;

/// A definition that can be stored in a [`Catalog`].
pub trait Keyed {
    /// The id type used as the catalog key.
    type Key: Clone + Eq + Hash + std::fmt::Debug + std::borrow::Borrow<str>;

    /// The definition's unique key.
    fn key(&self) -> &Self::Key;
}

/// Definitions in insertion order, addressable by id.
#[derive(Debug, Clone)]
pub struct Catalog<T: Keyed> {
    entries: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> Catalog<T> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append a definition. Ids are unique: if the key is already taken the
    /// catalog is left unchanged and the rejected definition is handed back.
    pub fn insert(&mut self, entry: T) -> Result<(), T> {
        if self.index.contains_key::<T::Key>(entry.key()) {
            return Err(entry);
        }
        self.index.insert(entry.key().clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// Returns true if a definition with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate definitions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Keyed> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            // First definition of an id wins.
            let _ = catalog.insert(entry);
        }
        catalog
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::QuestId;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: QuestId,
        value: u32,
    }

    impl Keyed for Entry {
        type Key = QuestId;
        fn key(&self) -> &QuestId {
            &self.id
        }
    }

    fn entry(id: &str, value: u32) -> Entry {
        Entry {
            id: QuestId::new(id),
            value,
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog: Catalog<Entry> = [entry("c", 1), entry("a", 2), entry("b", 3)]
            .into_iter()
            .collect();
        let ids: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut catalog: Catalog<Entry> = [entry("a", 1), entry("b", 2)].into_iter().collect();
        assert_eq!(catalog.insert(entry("a", 9)), Err(entry("a", 9)));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().value, 1);
        assert_eq!(catalog.insert(entry("c", 3)), Ok(()));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn collect_keeps_first_duplicate() {
        let catalog: Catalog<Entry> = [entry("a", 1), entry("b", 2), entry("a", 3)]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().value, 1);
    }

    #[test]
    fn lookup() {
        let catalog: Catalog<Entry> = [entry("a", 1)].into_iter().collect();
        assert!(catalog.contains("a"));
        assert_eq!(catalog.get("a").unwrap().value, 1);
        assert!(catalog.get("z").is_none());
        assert!(Catalog::<Entry>::new().is_empty());
    }
}
