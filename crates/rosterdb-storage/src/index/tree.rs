//! Arena-backed unbalanced binary search tree.

use super::probe::Probe;
use std::cmp::Ordering;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// A tree node. Children are arena positions.
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Where a descent for a key ended.
enum Descent {
    /// The key is stored at this arena position.
    Found(usize),
    /// The key is absent and would attach under this parent (None: empty tree).
    Vacant(Option<(usize, Side)>),
}

/// Per-node decision made during range traversal.
#[derive(Clone, Copy)]
struct RangeStep {
    node: usize,
    in_range: bool,
    go_right: bool,
}

/// Ordered key-to-value mapping backed by an unbalanced binary search tree.
///
/// Ordering follows `K: Ord`. Insertion order determines shape; see the
/// module docs for the comparison accounting rules.
#[derive(Debug)]
pub struct OrderedIndex<K, V> {
    /// Node arena. Positions are stable since nodes are never removed.
    nodes: Vec<Node<K, V>>,
    root: Option<usize>,
    /// Running comparison counter across operations.
    comparisons: AtomicU64,
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            comparisons: AtomicU64::new(0),
        }
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    /// An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[idx];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }

    /// Returns the running comparison counter.
    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(AtomicOrdering::Relaxed)
    }

    /// Sets the running comparison counter to zero.
    #[inline]
    pub fn reset_metrics(&self) {
        self.comparisons.store(0, AtomicOrdering::Relaxed);
    }

    #[inline]
    fn charge(&self, comparisons: u64) {
        self.comparisons.fetch_add(comparisons, AtomicOrdering::Relaxed);
    }

    /// Walks from the root towards `key`, one comparison per visited node.
    fn descend(&self, key: &K) -> (Descent, u64) {
        let mut comparisons = 0;
        let mut parent = None;
        let mut current = self.root;

        while let Some(idx) = current {
            comparisons += 1;
            let node = &self.nodes[idx];
            match key.cmp(&node.key) {
                Ordering::Equal => return (Descent::Found(idx), comparisons),
                Ordering::Less => {
                    parent = Some((idx, Side::Left));
                    current = node.left;
                }
                Ordering::Greater => {
                    parent = Some((idx, Side::Right));
                    current = node.right;
                }
            }
        }

        (Descent::Vacant(parent), comparisons)
    }

    /// Links a new leaf under `parent` and returns its arena position.
    fn attach(&mut self, parent: Option<(usize, Side)>, key: K, value: V) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(idx),
            Some((p, Side::Left)) => self.nodes[p].left = Some(idx),
            Some((p, Side::Right)) => self.nodes[p].right = Some(idx),
        }
        idx
    }

    /// Inserts `key` with `value`, overwriting any existing value.
    /// Returns the previous value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Probe<Option<V>> {
        let (descent, comparisons) = self.descend(&key);
        self.charge(comparisons);
        let previous = match descent {
            Descent::Found(idx) => Some(std::mem::replace(&mut self.nodes[idx].value, value)),
            Descent::Vacant(parent) => {
                self.attach(parent, key, value);
                None
            }
        };
        Probe::new(previous, comparisons)
    }

    /// Inserts `key` with `value` only if the key is absent.
    /// Returns false, leaving the tree unchanged, when the key exists.
    pub fn insert_unique(&mut self, key: K, value: V) -> Probe<bool> {
        let (descent, comparisons) = self.descend(&key);
        self.charge(comparisons);
        let inserted = match descent {
            Descent::Found(_) => false,
            Descent::Vacant(parent) => {
                self.attach(parent, key, value);
                true
            }
        };
        Probe::new(inserted, comparisons)
    }

    /// Returns the value stored under `key`, inserting `default()` first if
    /// the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> Probe<&mut V>
    where
        F: FnOnce() -> V,
    {
        let (descent, comparisons) = self.descend(&key);
        self.charge(comparisons);
        let idx = match descent {
            Descent::Found(idx) => idx,
            Descent::Vacant(parent) => self.attach(parent, key, default()),
        };
        Probe::new(&mut self.nodes[idx].value, comparisons)
    }

    /// Looks up `key`. Does not modify the tree.
    pub fn find(&self, key: &K) -> Probe<Option<&V>> {
        let (descent, comparisons) = self.descend(key);
        self.charge(comparisons);
        let value = match descent {
            Descent::Found(idx) => Some(&self.nodes[idx].value),
            Descent::Vacant(_) => None,
        };
        Probe::new(value, comparisons)
    }

    /// Visits every entry with `lo <= key <= hi` in ascending key order.
    /// Returns the number of entries visited. `lo > hi` visits nothing.
    pub fn range_apply<F>(&self, lo: &K, hi: &K, visitor: F) -> Probe<usize>
    where
        F: FnMut(&K, &V),
    {
        self.range_apply_bounds(Bound::Included(lo), Bound::Included(hi), visitor)
    }

    /// Visits every entry within the given bounds in ascending key order,
    /// skipping subtrees that lie entirely outside them.
    /// Returns the number of entries visited.
    pub fn range_apply_bounds<F>(
        &self,
        lo: Bound<&K>,
        hi: Bound<&K>,
        mut visitor: F,
    ) -> Probe<usize>
    where
        F: FnMut(&K, &V),
    {
        if bounds_are_empty(lo, hi) {
            return Probe::new(0, 0);
        }

        let mut comparisons = 0;
        let mut visited = 0;
        let mut stack: Vec<RangeStep> = Vec::new();

        let mut next = self.root;
        loop {
            // Walk down the left spine while the lower bound allows it.
            while let Some(idx) = next {
                let key = &self.nodes[idx].key;
                let (above_lo, lo_ok) = match lo {
                    Bound::Unbounded => (true, true),
                    Bound::Included(l) => {
                        comparisons += 1;
                        let ord = key.cmp(l);
                        (ord == Ordering::Greater, ord != Ordering::Less)
                    }
                    Bound::Excluded(l) => {
                        comparisons += 1;
                        let above = key > l;
                        (above, above)
                    }
                };
                let (below_hi, hi_ok) = match hi {
                    Bound::Unbounded => (true, true),
                    Bound::Included(h) => {
                        comparisons += 1;
                        let ord = key.cmp(h);
                        (ord == Ordering::Less, ord != Ordering::Greater)
                    }
                    Bound::Excluded(h) => {
                        comparisons += 1;
                        let below = key < h;
                        (below, below)
                    }
                };

                stack.push(RangeStep {
                    node: idx,
                    in_range: lo_ok && hi_ok,
                    go_right: below_hi,
                });
                next = if above_lo { self.nodes[idx].left } else { None };
            }

            let Some(step) = stack.pop() else { break };
            let node = &self.nodes[step.node];
            if step.in_range {
                visitor(&node.key, &node.value);
                visited += 1;
            }
            next = if step.go_right { node.right } else { None };
        }

        self.charge(comparisons);
        Probe::new(visited, comparisons)
    }
}

/// Returns true if no key can satisfy both bounds.
fn bounds_are_empty<K: Ord>(lo: Bound<&K>, hi: Bound<&K>) -> bool {
    match (lo, hi) {
        (Bound::Included(l), Bound::Included(h)) => l > h,
        (Bound::Included(l), Bound::Excluded(h))
        | (Bound::Excluded(l), Bound::Included(h))
        | (Bound::Excluded(l), Bound::Excluded(h)) => l >= h,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[i64]) -> OrderedIndex<i64, usize> {
        let mut index = OrderedIndex::new();
        for (i, &k) in keys.iter().enumerate() {
            assert!(index.insert_unique(k, i).value);
        }
        index.reset_metrics();
        index
    }

    fn collect(index: &OrderedIndex<i64, usize>, lo: i64, hi: i64) -> Vec<i64> {
        let mut keys = Vec::new();
        index.range_apply(&lo, &hi, |k, _| keys.push(*k));
        keys
    }

    #[test]
    fn test_empty_index() {
        let index: OrderedIndex<i64, usize> = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);

        let probe = index.find(&1);
        assert!(probe.value.is_none());
        assert_eq!(probe.comparisons, 0);
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_find_counts_visited_nodes() {
        //        30
        //       /  \
        //     10    50
        //          /
        //        40
        let index = build(&[30, 10, 50, 40]);

        let probe = index.find(&30);
        assert_eq!(probe.value, Some(&0));
        assert_eq!(probe.comparisons, 1);

        let probe = index.find(&40);
        assert_eq!(probe.value, Some(&3));
        assert_eq!(probe.comparisons, 3);

        // Misses stop at a leaf: 30 -> 50 -> 40 -> empty.
        let probe = index.find(&45);
        assert!(probe.value.is_none());
        assert_eq!(probe.comparisons, 3);

        let probe = index.find(&5);
        assert!(probe.value.is_none());
        assert_eq!(probe.comparisons, 2);
    }

    #[test]
    fn test_running_counter_and_reset() {
        let index = build(&[30, 10, 50, 40]);
        assert_eq!(index.comparisons(), 0);

        index.find(&40);
        assert_eq!(index.comparisons(), 3);
        index.find(&10);
        assert_eq!(index.comparisons(), 5);

        index.reset_metrics();
        assert_eq!(index.comparisons(), 0);
        assert_eq!(index.find(&30).value, Some(&0));
    }

    #[test]
    fn test_insert_counts_descent() {
        let mut index = OrderedIndex::new();
        assert_eq!(index.insert(30, 'a').comparisons, 0);
        assert_eq!(index.insert(10, 'b').comparisons, 1);
        assert_eq!(index.insert(20, 'c').comparisons, 2);
        assert_eq!(index.comparisons(), 3);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut index = OrderedIndex::new();
        assert_eq!(index.insert(1, "first").value, None);
        assert_eq!(index.insert(1, "second").value, Some("first"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(&1).value, Some(&"second"));
    }

    #[test]
    fn test_insert_unique_rejects() {
        let mut index = OrderedIndex::new();
        assert!(index.insert_unique(1, "first").value);
        let probe = index.insert_unique(1, "second");
        assert!(!probe.value);
        assert_eq!(probe.comparisons, 1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.find(&1).value, Some(&"first"));
    }

    #[test]
    fn test_get_or_insert_with_merges() {
        let mut index: OrderedIndex<String, Vec<u32>> = OrderedIndex::new();
        index.get_or_insert_with("smith".to_string(), Vec::new).value.push(0);
        index.get_or_insert_with("jones".to_string(), Vec::new).value.push(1);
        index.get_or_insert_with("smith".to_string(), Vec::new).value.push(2);

        assert_eq!(index.len(), 2);
        assert_eq!(index.find(&"smith".to_string()).value, Some(&vec![0, 2]));
        assert_eq!(index.find(&"jones".to_string()).value, Some(&vec![1]));
    }

    #[test]
    fn test_sorted_inserts_degrade_to_chain() {
        let keys: Vec<i64> = (0..100).collect();
        let index = build(&keys);
        assert_eq!(index.height(), 100);

        let probe = index.find(&99);
        assert_eq!(probe.comparisons, 100);
    }

    #[test]
    fn test_balanced_insert_order_is_shallow() {
        let index = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(index.height(), 3);
        for k in 1..=7 {
            assert!(index.find(&k).comparisons <= 3);
        }
    }

    #[test]
    fn test_deep_chain_range_scan() {
        let keys: Vec<i64> = (0..5_000).rev().collect();
        let index = build(&keys);
        let mut count = 0;
        let probe = index.range_apply(&0, &4_999, |_, _| count += 1);
        assert_eq!(count, 5_000);
        assert_eq!(probe.value, 5_000);
        assert_eq!(index.height(), 5_000);
    }

    #[test]
    fn test_range_ascending_inclusive() {
        let index = build(&[30, 10, 50, 40, 20, 60, 35]);
        assert_eq!(collect(&index, 20, 40), vec![20, 30, 35, 40]);
        assert_eq!(collect(&index, 0, 100), vec![10, 20, 30, 35, 40, 50, 60]);
        assert_eq!(collect(&index, 35, 35), vec![35]);
        assert_eq!(collect(&index, 36, 39), Vec::<i64>::new());
        assert_eq!(collect(&index, 61, 90), Vec::<i64>::new());
    }

    #[test]
    fn test_range_inverted_is_empty() {
        let index = build(&[30, 10, 50]);
        let mut hits = 0;
        let probe = index.range_apply(&50, &10, |_, _| hits += 1);
        assert_eq!(hits, 0);
        assert_eq!(probe.value, 0);
        assert_eq!(probe.comparisons, 0);
    }

    #[test]
    fn test_range_on_empty_index() {
        let index: OrderedIndex<i64, usize> = OrderedIndex::new();
        let probe = index.range_apply(&0, &10, |_, _| panic!("nothing to visit"));
        assert_eq!(probe.value, 0);
        assert_eq!(probe.comparisons, 0);
    }

    #[test]
    fn test_range_prunes_subtrees() {
        //        30
        //       /  \
        //     10    50
        //    /  \   / \
        //   5   20 40  60
        let index = build(&[30, 10, 50, 5, 20, 40, 60]);

        // Only 30 -> 50 -> 40 and 60 are needed; the left subtree of 30 is
        // below the range and skipped entirely.
        let mut keys = Vec::new();
        let probe = index.range_apply(&35, &70, |k, _| keys.push(*k));
        assert_eq!(keys, vec![40, 50, 60]);
        // Nodes visited: 30, 50, 40, 60. Two comparisons each.
        assert_eq!(probe.comparisons, 8);

        // A full scan touches all seven nodes.
        let probe = index.range_apply(&0, &100, |_, _| {});
        assert_eq!(probe.comparisons, 14);
    }

    #[test]
    fn test_range_charges_running_counter() {
        let index = build(&[30, 10, 50]);
        let probe = index.range_apply(&10, &30, |_, _| {});
        assert_eq!(index.comparisons(), probe.comparisons);
        index.reset_metrics();
        assert_eq!(index.comparisons(), 0);
    }

    #[test]
    fn test_range_bounds_excluded_and_unbounded() {
        let index = build(&[30, 10, 50, 40, 20]);

        let mut keys = Vec::new();
        index.range_apply_bounds(Bound::Excluded(&20), Bound::Excluded(&50), |k, _| {
            keys.push(*k)
        });
        assert_eq!(keys, vec![30, 40]);

        let mut keys = Vec::new();
        index.range_apply_bounds(Bound::Included(&30), Bound::Unbounded, |k, _| keys.push(*k));
        assert_eq!(keys, vec![30, 40, 50]);

        let mut keys = Vec::new();
        let probe = index.range_apply_bounds(Bound::Unbounded, Bound::Unbounded, |k, _| {
            keys.push(*k)
        });
        assert_eq!(keys, vec![10, 20, 30, 40, 50]);
        assert_eq!(probe.comparisons, 0);
    }

    #[test]
    fn test_range_excluded_equal_bounds_is_empty() {
        let index = build(&[1, 2, 3]);
        let probe = index.range_apply_bounds(Bound::Included(&2), Bound::Excluded(&2), |_, _| {
            panic!("empty range")
        });
        assert_eq!(probe.value, 0);
    }

    #[test]
    fn test_string_keys_lexicographic() {
        let mut index: OrderedIndex<String, usize> = OrderedIndex::new();
        for (i, name) in ["smyth", "jones", "smith", "adams", "sn"].iter().enumerate() {
            index.insert_unique(name.to_string(), i);
        }

        let mut names = Vec::new();
        index.range_apply_bounds(
            Bound::Included(&"sm".to_string()),
            Bound::Excluded(&"sn".to_string()),
            |k, _| names.push(k.clone()),
        );
        assert_eq!(names, vec!["smith", "smyth"]);
    }
}
