//! Append-only record heap.
//!
//! A record's position in the heap is its RID. Records are never moved or
//! removed; deletion only flags them.

use crate::record::{Record, Rid};

/// Append-only sequence of records.
#[derive(Debug, Default)]
pub struct Heap {
    records: Vec<Record>,
}

impl Heap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Returns the RID the next appended record will receive.
    #[inline]
    pub fn next_rid(&self) -> Rid {
        Rid::new(self.records.len())
    }

    /// Appends a record and returns its RID.
    pub fn append(&mut self, record: Record) -> Rid {
        let rid = self.next_rid();
        self.records.push(record);
        rid
    }

    /// Returns the record at `rid`, deleted or not.
    #[inline]
    pub fn get(&self, rid: Rid) -> Option<&Record> {
        self.records.get(rid.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, rid: Rid) -> Option<&mut Record> {
        self.records.get_mut(rid.index())
    }

    /// Returns the record at `rid` only if it has not been deleted.
    #[inline]
    pub fn live(&self, rid: Rid) -> Option<&Record> {
        self.get(rid).filter(|r| !r.is_deleted())
    }

    /// Returns the number of records, including deleted ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records not marked deleted.
    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_deleted()).count()
    }
}
