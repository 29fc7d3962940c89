//! Name index for mention lookup
//!
//! The `NameIndex` maps a normalized `name_id` to the summary of the record
//! that owns it. It is rebuilt from the record store for every write and
//! iterated in key order, so cumulative article rewriting is reproducible.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Deref;

use lore_types::{IndexRow, RecordId, RecordType};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// A single record summary in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: RecordId,

    /// Raw identifier, used as the link target
    pub name_id: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Another record normalized to the same key; this entry was seen first
    /// and remains the link target
    #[serde(default)]
    pub multi: bool,
}

impl IndexEntry {
    pub fn is_person(&self) -> bool {
        self.record_type == RecordType::Person
    }
}

impl From<IndexRow> for IndexEntry {
    fn from(row: IndexRow) -> Self {
        Self {
            id: row.id,
            name_id: row.name_id,
            record_type: row.record_type,
            names: row.names,
            last_name: row.last_name,
            multi: false,
        }
    }
}

/// Normalized key -> record summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from store projections.
    ///
    /// Rows are keyed by `normalize(name_id)`. When a key is already taken
    /// the first entry stays and is flagged `multi`.
    pub fn build(rows: impl IntoIterator<Item = IndexRow>) -> Self {
        let mut index = Self::new();
        for row in rows {
            let key = normalize(&row.name_id);
            match index.entries.entry(key) {
                Entry::Occupied(mut slot) => {
                    tracing::debug!(
                        key = %slot.key(),
                        kept = %slot.get().name_id,
                        dropped = %row.name_id,
                        "Name index collision"
                    );
                    slot.get_mut().multi = true;
                }
                Entry::Vacant(slot) => {
                    slot.insert(IndexEntry::from(row));
                }
            }
        }
        tracing::debug!(entries = index.len(), "Name index built");
        index
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: IndexEntry) -> Option<IndexEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn remove(&mut self, key: &str) -> Option<IndexEntry> {
        self.entries.remove(key)
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Temporarily take `key` out of the index.
    ///
    /// The entry is put back when the returned guard is dropped, on every
    /// exit path.
    pub fn exclude(&mut self, key: impl Into<String>) -> Excluded<'_> {
        let key = key.into();
        let removed = self.entries.remove(&key);
        Excluded {
            index: self,
            key,
            removed,
        }
    }
}

impl FromIterator<IndexRow> for NameIndex {
    fn from_iter<T: IntoIterator<Item = IndexRow>>(iter: T) -> Self {
        Self::build(iter)
    }
}

/// Index view with one key held out; restores it on drop
pub struct Excluded<'a> {
    index: &'a mut NameIndex,
    key: String,
    removed: Option<IndexEntry>,
}

impl Excluded<'_> {
    /// The entry that was held out, if the key was present
    pub fn removed(&self) -> Option<&IndexEntry> {
        self.removed.as_ref()
    }
}

impl Deref for Excluded<'_> {
    type Target = NameIndex;

    fn deref(&self) -> &NameIndex {
        &*self.index
    }
}

impl Drop for Excluded<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.removed.take() {
            self.index.entries.insert(std::mem::take(&mut self.key), entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(name_id: &str, record_type: RecordType) -> IndexRow {
        IndexRow {
            id: Uuid::new_v4(),
            name_id: name_id.to_string(),
            record_type,
            names: vec![],
            last_name: None,
        }
    }

    #[test]
    fn test_build_keys_by_normalized_name() {
        let index = NameIndex::build(vec![
            row("umaron", RecordType::Location),
            row("nolen2", RecordType::Person),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("nolen").unwrap().name_id, "nolen2");
        assert!(!index.get("umaron").unwrap().multi);
    }

    #[test]
    fn test_collision_keeps_first_and_flags_multi() {
        let first = row("nolen", RecordType::Person);
        let first_id = first.id;
        let index = NameIndex::build(vec![first, row("nolen2", RecordType::Item)]);

        assert_eq!(index.len(), 1);
        let entry = index.get("nolen").unwrap();
        assert_eq!(entry.id, first_id);
        assert_eq!(entry.record_type, RecordType::Person);
        assert!(entry.multi);
    }

    #[test]
    fn test_build_empty() {
        let index = NameIndex::build(Vec::new());
        assert!(index.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let index: NameIndex = vec![
            row("zeta", RecordType::Item),
            row("alpha", RecordType::Item),
            row("mu", RecordType::Item),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = index.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_exclude_restores_on_drop() {
        let mut index = NameIndex::build(vec![
            row("umaron", RecordType::Location),
            row("garrett", RecordType::Person),
        ]);
        let before = index.clone();

        {
            let view = index.exclude("garrett");
            assert!(view.removed().is_some());
            assert!(!view.contains_key("garrett"));
            assert!(view.contains_key("umaron"));
        }

        assert_eq!(index, before);
    }

    #[test]
    fn test_exclude_missing_key_is_noop() {
        let mut index = NameIndex::build(vec![row("umaron", RecordType::Location)]);
        let before = index.clone();
        {
            let view = index.exclude("nobody");
            assert!(view.removed().is_none());
            assert_eq!(view.len(), 1);
        }
        assert_eq!(index, before);
    }
}
