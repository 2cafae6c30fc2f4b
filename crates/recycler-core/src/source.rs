//! Ordered data source.
//!
//! Records are kept sorted by id in a `Vec`, with an id → index map so that
//! traversal from a known record costs one hash lookup plus the run of
//! invalid records that has to be skipped. Structural changes (add/remove,
//! id changes) are O(n); they are rare compared to traversal, which runs for
//! every materialized item.

use std::collections::HashMap;

use crate::{ItemId, Record, RecordPatch, SourceError};

/// Traversal contract the list engine consumes.
///
/// `next`/`previous` return the nearest *valid* record strictly after/before
/// `id` in id order. `id` does not have to be present in the source.
pub trait DataSource {
    fn get(&self, id: ItemId) -> Option<&Record>;
    fn next(&self, id: ItemId) -> Option<&Record>;
    fn previous(&self, id: ItemId) -> Option<&Record>;
    fn first_valid(&self) -> Option<&Record>;
    fn last_valid(&self) -> Option<&Record>;

    fn contains_valid(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(Record::is_valid)
    }
}

/// Sorted record container with O(1) lookup by id.
#[derive(Clone, Debug, Default)]
pub struct OrderedSource {
    records: Vec<Record>,
    index: HashMap<ItemId, usize>,
}

impl OrderedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` records with ids `0..count`; even ids are valid, odd ones are not.
    pub fn synthetic(count: usize) -> Self {
        (0..count as i64)
            .map(|i| Record {
                id: ItemId(i),
                valid: i % 2 == 0,
                height: None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, valid or not, in id order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn valid(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.valid)
    }

    pub fn get(&self, id: impl Into<ItemId>) -> Option<&Record> {
        let id = id.into();
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// Inserts `record`, replacing any record that already has its id.
    pub fn add(&mut self, record: Record) {
        if let Some(&i) = self.index.get(&record.id) {
            self.records[i] = record;
            return;
        }
        let at = self.records.partition_point(|r| r.id < record.id);
        self.records.insert(at, record);
        self.reindex_from(at);
    }

    pub fn remove(&mut self, id: impl Into<ItemId>) -> Result<Record, SourceError> {
        let id = id.into();
        let i = self.index.remove(&id).ok_or(SourceError::UnknownId(id))?;
        let removed = self.records.remove(i);
        self.reindex_from(i);
        Ok(removed)
    }

    /// Applies `patch` to the record with the given id. The source is re-sorted
    /// only when the id changes.
    pub fn modify(
        &mut self,
        id: impl Into<ItemId>,
        patch: &RecordPatch,
    ) -> Result<&Record, SourceError> {
        let id = id.into();
        let i = *self.index.get(&id).ok_or(SourceError::UnknownId(id))?;
        if let Some(new_id) = patch.id
            && new_id != id
            && self.index.contains_key(&new_id)
        {
            return Err(SourceError::DuplicateId(new_id));
        }

        if !patch.apply(&mut self.records[i]) {
            return Ok(&self.records[i]);
        }

        let new_id = self.records[i].id;
        self.index.remove(&id);
        self.records.sort_by_key(|r| r.id);
        self.reindex_from(0);
        log::trace!("source: {id} renamed to {new_id}, re-sorted");
        Ok(&self.records[self.index[&new_id]])
    }

    pub fn next(&self, id: impl Into<ItemId>) -> Option<&Record> {
        self.step(id.into(), true)
    }

    pub fn previous(&self, id: impl Into<ItemId>) -> Option<&Record> {
        self.step(id.into(), false)
    }

    fn position(&self, id: ItemId) -> Result<usize, usize> {
        match self.index.get(&id) {
            Some(&i) => Ok(i),
            None => self.records.binary_search_by(|r| r.id.cmp(&id)),
        }
    }

    fn step(&self, id: ItemId, forward: bool) -> Option<&Record> {
        if forward {
            let start = match self.position(id) {
                Ok(i) => i + 1,
                Err(i) => i,
            };
            self.records.get(start..)?.iter().find(|r| r.valid)
        } else {
            let end = match self.position(id) {
                Ok(i) | Err(i) => i,
            };
            self.records[..end].iter().rev().find(|r| r.valid)
        }
    }

    fn reindex_from(&mut self, from: usize) {
        for (i, r) in self.records.iter().enumerate().skip(from) {
            self.index.insert(r.id, i);
        }
    }
}

impl FromIterator<Record> for OrderedSource {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        // Later duplicates win, matching `add`.
        let mut records: Vec<Record> = iter.into_iter().collect();
        records.reverse();
        records.sort_by_key(|r| r.id);
        records.dedup_by_key(|r| r.id);
        let mut source = Self {
            records,
            index: HashMap::new(),
        };
        source.reindex_from(0);
        source
    }
}

impl DataSource for OrderedSource {
    fn get(&self, id: ItemId) -> Option<&Record> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    fn next(&self, id: ItemId) -> Option<&Record> {
        self.step(id, true)
    }

    fn previous(&self, id: ItemId) -> Option<&Record> {
        self.step(id, false)
    }

    fn first_valid(&self) -> Option<&Record> {
        self.records.iter().find(|r| r.valid)
    }

    fn last_valid(&self) -> Option<&Record> {
        self.records.iter().rev().find(|r| r.valid)
    }
}
