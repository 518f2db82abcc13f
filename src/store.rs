// In-memory record store, one per record kind

use crate::record::{Record, RecordKind, RecordPatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a store picks the id for a newly created record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `len() + 1`; collides with an existing id after a delete
    #[default]
    Legacy,
    /// One past the highest id this store has ever held
    Monotonic,
}

/// Ordered collection of records for one kind
#[derive(Debug, Clone)]
pub struct Store<K: RecordKind> {
    records: Vec<Record<K>>,
    id_strategy: IdStrategy,
    highest_id: u64,
}

impl<K: RecordKind> Default for Store<K> {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl<K: RecordKind> Store<K> {
    /// Create an empty store
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            records: Vec::new(),
            id_strategy,
            highest_id: 0,
        }
    }

    /// All records in store order
    pub fn records(&self) -> &[Record<K>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record answering to `id`
    pub fn get(&self, id: u64) -> Option<&Record<K>> {
        self.records.iter().find(|r| r.id == id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replace the whole collection, keeping the given order
    pub fn set_all(&mut self, records: Vec<Record<K>>) {
        debug!(collection = K::COLLECTION, count = records.len(), "set_all: called");
        self.note_ids(records.iter().map(|r| r.id));
        self.records = records;
    }

    /// Append a record; the caller's id is taken as-is, duplicates included
    pub fn insert(&mut self, record: Record<K>) {
        debug!(collection = K::COLLECTION, id = record.id, "insert: called");
        self.note_ids(std::iter::once(record.id));
        self.records.push(record);
    }

    /// Merge `patch` into the first record with `id`.
    /// Returns false (and changes nothing) when no record matches.
    pub fn patch(&mut self, id: u64, patch: &RecordPatch) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.apply(patch);
                debug!(collection = K::COLLECTION, id, "patch: applied");
                true
            }
            None => {
                debug!(collection = K::COLLECTION, id, "patch: no matching record");
                false
            }
        }
    }

    /// Remove every record with `id`. Returns the number removed.
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = before - self.records.len();
        debug!(collection = K::COLLECTION, id, removed, "remove: called");
        removed
    }

    /// Id to use for a record created through an edit session
    pub fn next_id(&self) -> u64 {
        match self.id_strategy {
            IdStrategy::Legacy => self.records.len() as u64 + 1,
            IdStrategy::Monotonic => self.highest_id + 1,
        }
    }

    fn note_ids(&mut self, ids: impl Iterator<Item = u64>) {
        if let Some(max) = ids.max() {
            self.highest_id = self.highest_id.max(max);
        }
    }
}
