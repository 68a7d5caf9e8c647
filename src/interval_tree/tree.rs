//! The `IntervalTree<S>` container façade.

use crate::interval_tree::algo::{self, left_of, right_of};
use crate::interval_tree::check::{self, CheckError};
use crate::interval_tree::iter::InorderIter;
use crate::interval_tree::node::{IntervalValue, NodeId};
use crate::interval_tree::overlap::OverlapIter;
use crate::interval_tree::storage::Storage;

type Key<S> = <<S as Storage>::Value as IntervalValue>::Key;

/// An ordered multiset of `[start, end]` intervals, keyed by `start` and
/// augmented with a per-node `max_end` summary.
///
/// Generic over a caller-supplied [`Storage`]: the tree never owns element
/// storage itself, only the link/color/`max_end` metadata embedded in each
/// element via [`IntervalValue`].
pub struct IntervalTree<S: Storage> {
    storage: S,
    root: Option<NodeId>,
    leftmost: Option<NodeId>,
    rightmost: Option<NodeId>,
    len: usize,
}

impl<S: Storage + Default> Default for IntervalTree<S> {
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

impl<S: Storage + Default> IntervalTree<S> {
    /// Creates a new, empty tree backed by a default-constructed storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Storage> IntervalTree<S> {
    /// Creates a new, empty tree over a caller-supplied storage.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            root: None,
            leftmost: None,
            rightmost: None,
            len: 0,
        }
    }

    /// Borrows the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrows the backing storage, e.g. to `alloc` a new element
    /// before calling [`insert`](Self::insert).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consumes the tree, returning the backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Number of linked elements. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Links an already-allocated element into the tree in O(log n).
    ///
    /// `id` must have been produced by `self.storage_mut().alloc(..)` (or
    /// otherwise be a slot this tree's storage recognizes) and must not
    /// already be linked.
    pub fn insert(&mut self, id: NodeId) {
        let is_new_leftmost = self
            .leftmost
            .map_or(true, |l| self.storage.get(id).start() < self.storage.get(l).start());
        let is_new_rightmost = self
            .rightmost
            .map_or(true, |r| self.storage.get(r).start() <= self.storage.get(id).start());

        algo::insert(&mut self.storage, &mut self.root, id);
        self.len += 1;
        if is_new_leftmost {
            self.leftmost = Some(id);
        }
        if is_new_rightmost {
            self.rightmost = Some(id);
        }

        #[cfg(feature = "checked")]
        self.debug_check();
    }

    /// Unlinks a linked element in O(log n). The element itself is not
    /// destroyed; `id` remains a valid storage slot.
    ///
    /// Undefined (debug-asserted) if `id` does not refer to a linked element
    /// of this tree.
    pub fn erase(&mut self, id: NodeId) {
        debug_assert!(
            Some(id) == self.root || self.storage.get(id).link().parent.is_some(),
            "erase: node is not linked into this tree"
        );

        if self.leftmost == Some(id) {
            self.leftmost = algo::successor(&self.storage, id);
        }
        if self.rightmost == Some(id) {
            self.rightmost = algo::predecessor(&self.storage, id);
        }

        algo::erase(&mut self.storage, &mut self.root, id);
        self.len -= 1;

        #[cfg(feature = "checked")]
        self.debug_check();
    }

    /// O(1). Positions an iterator at an already-linked element.
    ///
    /// Undefined if `e` is not linked here.
    pub fn iterator_to(&self, id: NodeId) -> InorderIter<'_, S> {
        InorderIter::new(&self.storage, Some(id))
    }

    /// In-order iterator starting at the leftmost element.
    pub fn iter(&self) -> InorderIter<'_, S> {
        InorderIter::new(&self.storage, self.leftmost)
    }

    /// Unlinks all elements, invoking `dispose` on each one's value.
    pub fn clear_and_dispose(&mut self, mut dispose: impl FnMut(S::Value)) {
        dispose_subtree(&mut self.storage, self.root, &mut dispose);
        self.root = None;
        self.leftmost = None;
        self.rightmost = None;
        self.len = 0;
    }

    /// Unlinks all elements, dropping their values.
    pub fn clear(&mut self) {
        self.clear_and_dispose(|_| {});
    }

    /// Yields the leftmost element and unlinks it without restoring balance.
    ///
    /// # Contract
    /// Valid only as a bulk-teardown fast path: callers must not query or
    /// insert into the tree again until it has been fully drained (every
    /// remaining element removed via repeated calls to this method or via
    /// [`clear`](Self::clear)). I2 is not restored between calls.
    pub fn unlink_leftmost_without_rebalance(&mut self) -> Option<NodeId> {
        let id = self.leftmost?;
        let next_leftmost = algo::successor(&self.storage, id);
        algo::unlink_leftmost_without_rebalance(&mut self.storage, &mut self.root, id);

        self.len -= 1;
        self.leftmost = next_leftmost;
        if self.len == 0 {
            self.root = None;
            self.leftmost = None;
            self.rightmost = None;
        }
        Some(id)
    }

    /// Destroys the current contents via `disposer`, then deep-copies `src`:
    /// one fresh element per source element via `cloner`, preserving tree
    /// structure and colors (I2 holds without re-balancing) and copying
    /// `max_end` directly (I3).
    pub fn clone_from<S2>(
        &mut self,
        src: &IntervalTree<S2>,
        mut cloner: impl FnMut(&S2::Value) -> S::Value,
        disposer: impl FnMut(S::Value),
    ) where
        S2: Storage,
        S2::Value: IntervalValue<Key = Key<S>>,
    {
        self.clear_and_dispose(disposer);
        if let Some(src_root) = src.root {
            let new_root = clone_subtree(&mut self.storage, &src.storage, src_root, None, &mut cloner);
            self.root = Some(new_root);
            self.leftmost = Some(algo::minimum(&self.storage, new_root));
            self.rightmost = Some(algo::maximum(&self.storage, new_root));
            self.len = src.len;
        }
    }

    /// Query: all linked elements overlapping `[qs, qe]`, in in-order
    /// sequence. `qs > qe` (and an empty tree) yields an empty range.
    pub fn interval_intersect(&self, qs: Key<S>, qe: Key<S>) -> OverlapIter<'_, S> {
        OverlapIter::new(&self.storage, self.root, qs, qe)
    }

    /// Re-verifies I1–I4 by recursive descent, returning the first offending
    /// node. Diagnostic only — never called by `insert`/`erase` themselves
    /// unless the `checked` feature is enabled.
    pub fn check(&self) -> Result<(), CheckError<Key<S>>> {
        check::check(&self.storage, self.root)
    }

    #[cfg(feature = "checked")]
    fn debug_check(&self) {
        if self.check().is_err() {
            panic!("interval tree invariant violated after mutation");
        }
    }
}

fn dispose_subtree<S: Storage>(s: &mut S, n: Option<NodeId>, dispose: &mut impl FnMut(S::Value)) {
    let Some(n) = n else { return };
    let l = left_of(s, n);
    let r = right_of(s, n);
    dispose_subtree(s, l, dispose);
    dispose_subtree(s, r, dispose);
    let v = s.dealloc(n);
    dispose(v);
}

fn clone_subtree<S, S2>(
    dst: &mut S,
    src: &S2,
    src_node: NodeId,
    parent: Option<NodeId>,
    cloner: &mut impl FnMut(&S2::Value) -> S::Value,
) -> NodeId
where
    S: Storage,
    S2: Storage,
    S2::Value: IntervalValue<Key = Key<S>>,
{
    let value = cloner(src.get(src_node));
    let id = dst.alloc(value);
    dst.get_mut(id).link_mut().parent = parent;
    dst.get_mut(id).link_mut().color = src.get(src_node).link().color;

    let left = left_of(src, src_node).map(|l| clone_subtree(dst, src, l, Some(id), cloner));
    let right = right_of(src, src_node).map(|r| clone_subtree(dst, src, r, Some(id), cloner));

    let link = dst.get_mut(id).link_mut();
    link.left = left;
    link.right = right;
    link.max_end = src.get(src_node).link().max_end.clone();

    id
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::interval_tree::interval::Interval;
    use crate::interval_tree::storage::VecArena;

    fn tree_of(values: &[(i32, i32)]) -> IntervalTree<VecArena<Interval<i32>>> {
        let mut tree = IntervalTree::new();
        for &(s, e) in values {
            let id = tree.storage_mut().alloc(Interval::new(s, e));
            tree.insert(id);
        }
        tree
    }

    #[test]
    fn insert_then_iterate_in_order() {
        let tree = tree_of(&[(1, 5), (3, 7), (6, 9)]);
        let starts: Vec<_> = tree.iter().map(|v| v.start).collect();
        assert_eq!(starts, vec![1, 3, 6]);
        assert!(tree.check().is_ok());
    }

    #[test]
    fn erase_restores_invariants_and_shrinks() {
        let mut tree = tree_of(&[(1, 5), (3, 7), (6, 9), (2, 2), (4, 4)]);
        let ids: Vec<_> = {
            let mut v = Vec::new();
            let mut cur = tree.leftmost;
            while let Some(id) = cur {
                v.push(id);
                cur = algo::successor(tree.storage(), id);
            }
            v
        };
        for id in ids {
            tree.erase(id);
            assert!(tree.check().is_ok());
        }
        assert!(tree.is_empty());
    }

    /// Regresses a successor splice whose original parent sits several
    /// levels below where it gets relinked: deleting a two-children node
    /// whose in-order successor is not that node's direct right child must
    /// still refresh `max_end` along the entire chain from the successor's
    /// old parent up through its new position to the root, not just at the
    /// old parent alone.
    #[test]
    fn erase_two_children_with_distant_successor_keeps_max_end_correct() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let starts: Vec<i32> = (0..63).collect();
        let ends: Vec<i32> = starts.iter().map(|&s| s + (s % 7) * 11).collect();
        let values: Vec<(i32, i32)> = starts.into_iter().zip(ends).collect();
        let mut tree = tree_of(&values);

        let mut ids: Vec<_> = {
            let mut v = Vec::new();
            let mut cur = tree.leftmost;
            while let Some(id) = cur {
                v.push(id);
                cur = algo::successor(tree.storage(), id);
            }
            v
        };
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        ids.shuffle(&mut rng);

        let oracle_count = |tree: &IntervalTree<VecArena<Interval<i32>>>, qs: i32, qe: i32| {
            tree.iter()
                .filter(|v| (qs <= v.start && v.start <= qe) || (v.start <= qs && qs <= v.end))
                .count()
        };

        for (round, id) in ids.into_iter().enumerate() {
            tree.erase(id);
            assert!(tree.check().is_ok(), "invariants broken after erasing round {round}");
            for &(qs, qe) in &values {
                let expected = oracle_count(&tree, qs, qe);
                assert_eq!(
                    tree.interval_intersect(qs, qe).count(),
                    expected,
                    "query [{qs},{qe}] mismatched after erasing round {round}"
                );
            }
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn insert_erase_round_trip_preserves_state() {
        let mut tree = tree_of(&[(1, 5), (3, 7), (6, 9)]);
        let before: Vec<_> = tree.iter().map(|v| (v.start, v.end)).collect();
        let id = tree.storage_mut().alloc(Interval::new(4, 4));
        tree.insert(id);
        tree.erase(id);
        let after: Vec<_> = tree.iter().map(|v| (v.start, v.end)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn clear_and_dispose_runs_disposer_on_every_element() {
        let mut tree = tree_of(&[(1, 2), (3, 4), (5, 6)]);
        let mut disposed = Vec::new();
        tree.clear_and_dispose(|v| disposed.push(v.start));
        disposed.sort();
        assert_eq!(disposed, vec![1, 3, 5]);
        assert!(tree.is_empty());
    }

    #[test]
    fn unlink_leftmost_without_rebalance_drains_in_order() {
        let mut tree = tree_of(&[(3, 3), (1, 1), (2, 2)]);
        let mut starts = Vec::new();
        while let Some(id) = tree.unlink_leftmost_without_rebalance() {
            starts.push(tree.storage().get(id).start);
        }
        assert_eq!(starts, vec![1, 2, 3]);
        assert!(tree.is_empty());
    }

    #[test]
    fn clone_from_preserves_iteration_and_max_end() {
        let src = tree_of(&[(1, 5), (3, 7), (6, 9), (2, 2)]);
        let mut dst: IntervalTree<VecArena<Interval<i32>>> = IntervalTree::new();
        dst.clone_from(&src, |v| Interval::new(v.start, v.end), |_| {});

        let src_vals: Vec<_> = src.iter().map(|v| (v.start, v.end)).collect();
        let dst_vals: Vec<_> = dst.iter().map(|v| (v.start, v.end)).collect();
        assert_eq!(src_vals, dst_vals);
        assert!(dst.check().is_ok());
        assert_eq!(dst.len(), src.len());
    }
}
