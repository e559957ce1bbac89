//! Record representation and record identifiers.

use serde::{Deserialize, Serialize};

/// Record identifier: a record's permanent position in the heap.
///
/// Assigned at insertion as the heap length before the append. RIDs are
/// dense, start at 0, and are never reused or invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rid(usize);

impl Rid {
    /// Creates a RID from a heap position.
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the heap position this RID refers to.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Rid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A student record stored in the heap.
///
/// The deleted flag only ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique student id, the id index key.
    pub id: i64,
    /// Given name.
    pub first: String,
    /// Surname. Indexed case-insensitively.
    pub last: String,
    #[serde(default)]
    deleted: bool,
}

impl Record {
    /// Creates a live record.
    pub fn new(id: i64, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            id,
            first: first.into(),
            last: last.into(),
            deleted: false,
        }
    }

    /// Returns true if this record has been soft-deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Marks this record as deleted. Returns false if it already was.
    pub(crate) fn mark_deleted(&mut self) -> bool {
        !std::mem::replace(&mut self.deleted, true)
    }

    /// Returns the surname in the form used as the last-name index key.
    pub fn surname_key(&self) -> String {
        fold_case(&self.last)
    }
}

/// ASCII case folding shared by surname keys and prefix queries.
#[inline]
pub fn fold_case(s: &str) -> String {
    s.to_ascii_lowercase()
}
