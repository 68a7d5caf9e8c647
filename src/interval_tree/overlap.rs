//! The stateful overlap/stabbing query iterator.
//!
//! A four-stage explicit state machine over `n`/`stage` living in the
//! iterator struct, rather than a recursive descent: at each step we know
//! exactly which of "arrived from above", "left subtree done", "node itself
//! tested", or "right subtree done" we're in, so `next()` can suspend and
//! resume across calls instead of visiting the whole subtree eagerly.
//! The end-of-range check is a null-parent-root check rather than a
//! header-sentinel comparison, since there is no sentinel node here.

use crate::interval_tree::algo::{left_of, max_end_of, parent_of, right_of};
use crate::interval_tree::node::{IntervalValue, NodeId};
use crate::interval_tree::storage::Storage;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Arrived at `n` from above; have not yet descended left.
    ArrivedFromAbove,
    /// Returned from the left subtree; must test `n` itself.
    LeftDone,
    /// `n` itself has been tested; must try the right subtree.
    NodeDone,
    /// Returned from the right subtree; `n` is finished, ascend.
    RightDone,
}

/// Forward iterator yielding every stored element overlapping `[qs, qe]`, in
/// in-order sequence, pruning subtrees via `max_end`.
pub struct OverlapIter<'a, S: Storage> {
    storage: &'a S,
    qs: <S::Value as IntervalValue>::Key,
    qe: <S::Value as IntervalValue>::Key,
    node: Option<NodeId>,
    stage: Stage,
}

impl<'a, S: Storage> OverlapIter<'a, S> {
    pub(crate) fn new(
        storage: &'a S,
        root: Option<NodeId>,
        qs: <S::Value as IntervalValue>::Key,
        qe: <S::Value as IntervalValue>::Key,
    ) -> Self {
        // A query with qs > qe is treated as an empty result, not an error.
        let node = if qs > qe { None } else { root };
        Self {
            storage,
            qs,
            qe,
            node,
            stage: Stage::ArrivedFromAbove,
        }
    }

    fn may_intersect_left(&self, n: NodeId) -> bool {
        match left_of(self.storage, n) {
            Some(l) => self.qs <= max_end_of(self.storage, l),
            None => false,
        }
    }

    fn may_intersect_right(&self, n: NodeId) -> bool {
        match right_of(self.storage, n) {
            Some(r) => self.qs <= max_end_of(self.storage, r) && self.storage.get(n).start() <= self.qe,
            None => false,
        }
    }

    fn intersects(&self, n: NodeId) -> bool {
        let v = self.storage.get(n);
        let (start, end) = (v.start(), v.end());
        (self.qs <= start && start <= self.qe) || (start <= self.qs && self.qs <= end)
    }

    fn advance(&mut self) -> Option<NodeId> {
        while let Some(n) = self.node {
            match self.stage {
                Stage::ArrivedFromAbove => {
                    if self.may_intersect_left(n) {
                        if let Some(l) = left_of(self.storage, n) {
                            self.node = Some(l);
                            continue;
                        }
                    }
                    self.stage = Stage::LeftDone;
                }
                Stage::LeftDone => {
                    self.stage = Stage::NodeDone;
                    if self.intersects(n) {
                        return Some(n);
                    }
                }
                Stage::NodeDone => {
                    if self.may_intersect_right(n) {
                        if let Some(r) = right_of(self.storage, n) {
                            self.node = Some(r);
                            self.stage = Stage::ArrivedFromAbove;
                            continue;
                        }
                    }
                    self.stage = Stage::RightDone;
                }
                Stage::RightDone => match parent_of(self.storage, n) {
                    None => {
                        self.node = None;
                    }
                    Some(p) => {
                        self.stage = if left_of(self.storage, p) == Some(n) {
                            Stage::LeftDone
                        } else {
                            Stage::RightDone
                        };
                        self.node = Some(p);
                    }
                },
            }
        }
        None
    }
}

impl<'a, S: Storage> Iterator for OverlapIter<'a, S> {
    type Item = &'a S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|id| self.storage.get(id))
    }
}
