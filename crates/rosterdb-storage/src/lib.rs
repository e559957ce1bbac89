//! Storage engine for RosterDB.
//!
//! This crate provides:
//! - Record and RID types
//! - Append-only heap with soft deletion
//! - Ordered index (unbalanced binary search tree) with range traversal
//!   and comparison accounting
//! - Index engine maintaining an id index and a surname index over the heap
//! - Lock-protected shared engine handle

mod engine;
mod heap;
mod index;
mod record;
mod shared;

pub use engine::Engine;
pub use heap::Heap;
pub use index::{OrderedIndex, Probe, prefix_upper_bound};
pub use record::{Record, Rid, fold_case};
pub use shared::SharedEngine;
