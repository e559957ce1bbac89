//! Index engine coordinating the heap with the id and surname indexes.
//!
//! ```text
//! insert_record ──► Heap (append, RID) ──► id index:      id        -> RID
//!                                     └──► surname index: lowercase -> [RID, ...]
//!
//! find/range/prefix ──► index traversal ──► RIDs ──► Heap (skip deleted)
//! ```
//!
//! Deletion is soft: only the heap record is flagged. Both indexes keep
//! their entries, and every query drops deleted records when it
//! dereferences RIDs against the heap.

use crate::heap::Heap;
use crate::index::{OrderedIndex, Probe, prefix_upper_bound};
use crate::record::{Record, Rid, fold_case};
use rosterdb_common::{DuplicateIdPolicy, EngineConfig, Result, RosterError};
use std::ops::Bound;
use tracing::{debug, trace, warn};

/// Record store with a unique id index and a case-insensitive surname index.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    heap: Heap,
    /// Student id to RID. At most one entry per id.
    id_index: OrderedIndex<i64, Rid>,
    /// Lowercased surname to every RID carrying it, in ascending RID order.
    last_index: OrderedIndex<String, Vec<Rid>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_parts(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine after validating `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: EngineConfig) -> Self {
        Self {
            heap: Heap::with_capacity(config.heap_capacity),
            id_index: OrderedIndex::new(),
            last_index: OrderedIndex::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Appends `record` to the heap and indexes it under its id and its
    /// lowercased surname. Returns the new RID.
    ///
    /// When the id is already indexed the configured policy applies:
    /// `Reject` returns `DuplicateKey` and changes nothing, `Overwrite`
    /// re-points the id at the new record and soft-deletes the old one.
    pub fn insert_record(&mut self, record: Record) -> Result<Rid> {
        let id = record.id;
        let rid = self.heap.next_rid();

        match self.config.duplicate_ids {
            DuplicateIdPolicy::Reject => {
                let inserted = self.id_index.insert_unique(id, rid).value;
                if !inserted {
                    self.id_index.reset_metrics();
                    warn!(id, "rejected record with duplicate id");
                    return Err(RosterError::DuplicateKey { id });
                }
            }
            DuplicateIdPolicy::Overwrite => {
                if let Some(displaced) = self.id_index.insert(id, rid).value {
                    if let Some(old) = self.heap.get_mut(displaced) {
                        old.mark_deleted();
                    }
                    debug!(id, %displaced, %rid, "id re-pointed, displaced record deleted");
                }
            }
        }

        self.last_index
            .get_or_insert_with(record.surname_key(), Vec::new)
            .value
            .push(rid);

        let appended = self.heap.append(record);
        debug_assert_eq!(appended, rid);

        self.id_index.reset_metrics();
        self.last_index.reset_metrics();

        debug!(id, %rid, "record inserted");
        Ok(rid)
    }

    /// Soft-deletes the live record with `id`.
    ///
    /// Returns false if the heap is empty, the id is not indexed, or the
    /// record is already deleted. The surname index is left untouched.
    pub fn delete_by_id(&mut self, id: i64) -> bool {
        if self.heap.is_empty() {
            return false;
        }

        let rid = self.id_index.find(&id).value.copied();
        self.id_index.reset_metrics();

        let Some(rid) = rid else {
            return false;
        };
        let deleted = self.heap.get_mut(rid).is_some_and(Record::mark_deleted);
        if deleted {
            debug!(id, %rid, "record deleted");
        }
        deleted
    }

    /// Looks up the live record with `id`.
    pub fn find_by_id(&self, id: i64) -> Probe<Option<&Record>> {
        if self.heap.is_empty() {
            return Probe::new(None, 0);
        }

        let probe = self.id_index.find(&id);
        self.id_index.reset_metrics();
        trace!(id, comparisons = probe.comparisons, "find_by_id");

        probe.map(|rid| rid.and_then(|&rid| self.heap.live(rid)))
    }

    /// Returns live records with `lo <= id <= hi` in ascending id order.
    /// An inverted range returns nothing.
    pub fn range_by_id(&self, lo: i64, hi: i64) -> Probe<Vec<&Record>> {
        if self.heap.is_empty() {
            return Probe::new(Vec::new(), 0);
        }

        let heap = &self.heap;
        let mut records = Vec::new();
        let probe = self.id_index.range_apply(&lo, &hi, |_, &rid| {
            if let Some(record) = heap.live(rid) {
                records.push(record);
            }
        });
        self.id_index.reset_metrics();
        trace!(lo, hi, comparisons = probe.comparisons, "range_by_id");

        Probe::new(records, probe.comparisons)
    }

    /// Returns live records whose lowercased surname starts with the
    /// lowercased `prefix`, ordered by surname and then by RID. The empty
    /// prefix matches every live record.
    pub fn prefix_by_last(&self, prefix: &str) -> Probe<Vec<&Record>> {
        if self.heap.is_empty() {
            return Probe::new(Vec::new(), 0);
        }

        let lo = fold_case(prefix);
        let hi = prefix_upper_bound(&lo);
        let upper = match &hi {
            Some(bound) => Bound::Excluded(bound),
            None => Bound::Unbounded,
        };

        let heap = &self.heap;
        let mut records = Vec::new();
        let probe = self
            .last_index
            .range_apply_bounds(Bound::Included(&lo), upper, |_, rids| {
                records.extend(rids.iter().filter_map(|&rid| heap.live(rid)));
            });
        self.last_index.reset_metrics();
        trace!(prefix, comparisons = probe.comparisons, "prefix_by_last");

        Probe::new(records, probe.comparisons)
    }

    /// Returns the record at `rid`, including soft-deleted records.
    pub fn record(&self, rid: Rid) -> Option<&Record> {
        self.heap.get(rid)
    }

    /// Number of records in the heap, deleted ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of records not marked deleted.
    pub fn live_count(&self) -> usize {
        self.heap.live_count()
    }

    /// Height of the id index tree.
    pub fn id_index_height(&self) -> usize {
        self.id_index.height()
    }

    /// Height of the surname index tree.
    pub fn last_index_height(&self) -> usize {
        self.last_index.height()
    }

    /// Number of distinct lowercased surnames indexed.
    pub fn surname_count(&self) -> usize {
        self.last_index.len()
    }
}
