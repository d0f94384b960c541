//! Per-module aggregation of documentation records.
//!
//! The store maps `module -> file id -> records` and remembers which file
//! currently feeds which module, so a file that moves between modules is
//! pruned from its old bucket. Every mutation marks the touched modules dirty;
//! the pipeline re-renders exactly those.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::model::{DocRecord, FileId};

#[derive(Debug, Default)]
pub struct AggregationStore {
    modules: BTreeMap<String, BTreeMap<FileId, Vec<DocRecord>>>,
    owners: FxHashMap<FileId, String>,
    dirty: BTreeSet<String>,
}

/// Read-only view of one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleBucket<'a> {
    files: &'a BTreeMap<FileId, Vec<DocRecord>>,
}

impl<'a> ModuleBucket<'a> {
    /// All records, grouped by file in file-id order.
    pub fn records(&self) -> Vec<&'a DocRecord> {
        self.files.values().flatten().collect()
    }

    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AggregationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything `id` contributes with `records` under `module`.
    ///
    /// An empty `records` list behaves like [`remove`](Self::remove).
    pub fn upsert(&mut self, id: &FileId, module: &str, records: Vec<DocRecord>) {
        if records.is_empty() {
            self.remove(id);
            return;
        }

        if let Some(previous) = self.owners.get(id).cloned() {
            if previous != module {
                self.detach(id, &previous);
            }
        }

        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(id.clone(), records);
        self.owners.insert(id.clone(), module.to_string());
        self.dirty.insert(module.to_string());
    }

    /// Drop everything `id` contributes. Unknown ids are ignored.
    pub fn remove(&mut self, id: &FileId) {
        if let Some(module) = self.owners.get(id).cloned() {
            self.detach(id, &module);
        }
    }

    fn detach(&mut self, id: &FileId, module: &str) {
        self.owners.remove(id);
        if let Some(files) = self.modules.get_mut(module) {
            files.remove(id);
            if files.is_empty() {
                self.modules.remove(module);
            }
        }
        self.dirty.insert(module.to_string());
    }

    pub fn module(&self, name: &str) -> Option<ModuleBucket<'_>> {
        self.modules.get(name).map(|files| ModuleBucket { files })
    }

    /// Module `id` currently contributes to.
    pub fn module_of(&self, id: &FileId) -> Option<&str> {
        self.owners.get(id).map(String::as_str)
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn dirty_modules(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    /// Dirty modules in name order; the set is cleared.
    pub fn take_dirty_modules(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> DocRecord {
        DocRecord {
            name: name.to_string(),
            ..DocRecord::default()
        }
    }

    fn names(store: &AggregationStore, module: &str) -> Vec<String> {
        store
            .module(module)
            .map(|bucket| bucket.records().iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn upsert_replaces_previous_records() {
        let mut store = AggregationStore::new();
        let id = FileId::from("f1");
        store.upsert(&id, "m", vec![record("a"), record("b")]);
        store.upsert(&id, "m", vec![record("c")]);
        assert_eq!(names(&store, "m"), ["c"]);
    }

    #[test]
    fn moving_a_file_prunes_the_old_module() {
        let mut store = AggregationStore::new();
        let id = FileId::from("f1");
        store.upsert(&id, "a", vec![record("x")]);
        store.take_dirty_modules();

        store.upsert(&id, "b", vec![record("x")]);
        assert!(store.module("a").is_none());
        assert_eq!(store.module_of(&id), Some("b"));
        assert_eq!(store.take_dirty_modules(), ["a", "b"]);
    }

    #[test]
    fn empty_records_remove_the_file() {
        let mut store = AggregationStore::new();
        let id = FileId::from("f1");
        store.upsert(&id, "m", vec![record("x")]);
        store.upsert(&id, "m", Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.module_of(&id), None);
        assert_eq!(store.take_dirty_modules(), ["m"]);
    }

    #[test]
    fn removing_unknown_file_is_a_no_op() {
        let mut store = AggregationStore::new();
        store.remove(&FileId::from("missing"));
        assert!(store.is_empty());
        assert_eq!(store.dirty_modules().count(), 0);
    }

    #[test]
    fn records_follow_file_id_order() {
        let mut store = AggregationStore::new();
        store.upsert(&FileId::from("z"), "m", vec![record("from-z")]);
        store.upsert(&FileId::from("a"), "m", vec![record("from-a1"), record("from-a2")]);
        assert_eq!(names(&store, "m"), ["from-a1", "from-a2", "from-z"]);

        let bucket = store.module("m").unwrap();
        assert_eq!(bucket.file_ids(), [FileId::from("a"), FileId::from("z")]);
        assert_eq!(bucket.len(), 3);
    }
}
