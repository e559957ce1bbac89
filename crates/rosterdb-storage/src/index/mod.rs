//! Ordered key-to-value index backed by an unbalanced binary search tree.
//!
//! ## OrderedIndex
//!
//! Nodes live in a contiguous arena and link to their children by arena
//! position. Nodes are never removed, so positions stay valid for the
//! lifetime of the index.
//!
//! ```text
//!            [30]            insert order: 30, 10, 50, 40
//!           /    \
//!        [10]    [50]
//!                /
//!             [40]
//! ```
//!
//! There is no rebalancing. Keys inserted in sorted order produce a chain
//! and lookups degrade to O(n). Reported comparison counts always reflect
//! the actual shape of the tree.
//!
//! ## Comparison accounting
//!
//! Every operation returns a [`Probe`] carrying its own comparison count:
//! - insert / find: one comparison per node visited on the descent
//! - range traversal: one comparison per bounded side per visited node
//!
//! The index also keeps a running counter across operations, read with
//! `comparisons()` and cleared with `reset_metrics()`.
//!
//! ## Range traversal
//!
//! `range_apply_bounds` visits matching keys in ascending order and skips
//! any subtree that cannot intersect the range: the left child is entered
//! only when the node key is above the lower bound, the right child only
//! when it is below the upper bound.

pub mod bounds;
pub mod probe;
pub mod tree;

pub use bounds::prefix_upper_bound;
pub use probe::Probe;
pub use tree::OrderedIndex;
