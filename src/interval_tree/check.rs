//! Diagnostic invariant verifier. Never called internally by
//! `insert`/`erase`; intended for tests and for an external audit step.

use crate::interval_tree::algo::{color_of, left_of, max_end_of, right_of};
use crate::interval_tree::node::{IntervalValue, NodeId};
use crate::interval_tree::storage::Storage;
use std::fmt::{self, Debug, Display, Formatter};

/// The first invariant violation found by [`check`](super::tree::IntervalTree::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError<K> {
    /// Root is not black (I2).
    RootNotBlack { node: NodeId },
    /// A node's subtree contains a `start` on the wrong side of its BST order (I1).
    OrderViolation { node: NodeId },
    /// `max_end` does not equal the max of `end` and both children's `max_end` (I3).
    MaxEndMismatch { node: NodeId, expected: K, found: K },
    /// A red node has a red child (I2).
    RedRedViolation { node: NodeId },
    /// Two root-to-leaf paths disagree on black-node count (I2).
    BlackHeightMismatch,
    /// `start > end` for some element (I4).
    EndpointOrderViolation { node: NodeId },
}

impl<K: Debug> Display for CheckError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::RootNotBlack { node } => write!(f, "root {node:?} is not black"),
            CheckError::OrderViolation { node } => {
                write!(f, "binary-search order violated at node {node:?}")
            }
            CheckError::MaxEndMismatch {
                node,
                expected,
                found,
            } => write!(
                f,
                "node {node:?} has max_end {found:?}, expected {expected:?}"
            ),
            CheckError::RedRedViolation { node } => {
                write!(f, "red node {node:?} has a red child")
            }
            CheckError::BlackHeightMismatch => write!(f, "black height differs across subtrees"),
            CheckError::EndpointOrderViolation { node } => {
                write!(f, "node {node:?} has start > end")
            }
        }
    }
}

impl<K: Debug> std::error::Error for CheckError<K> {}

struct Bounds<K> {
    min_start: K,
    max_start: K,
    max_end: K,
    black_height: usize,
}

fn verify<S: Storage>(
    s: &S,
    n: NodeId,
) -> Result<Bounds<<S::Value as IntervalValue>::Key>, CheckError<<S::Value as IntervalValue>::Key>>
{
    let v = s.get(n);
    let start = v.start();
    let end = v.end();
    if start > end {
        return Err(CheckError::EndpointOrderViolation { node: n });
    }

    let mut min_start = start.clone();
    let mut max_start = start.clone();
    let mut expected_max_end = end;
    let mut left_bh = 1usize;
    let mut right_bh = 1usize;

    if let Some(l) = left_of(s, n) {
        if color_of(s, n).is_red() && color_of(s, l).is_red() {
            return Err(CheckError::RedRedViolation { node: l });
        }
        let lb = verify(s, l)?;
        if lb.max_start > start {
            return Err(CheckError::OrderViolation { node: l });
        }
        min_start = lb.min_start;
        if lb.max_end > expected_max_end {
            expected_max_end = lb.max_end;
        }
        left_bh = lb.black_height;
    }

    if let Some(r) = right_of(s, n) {
        if color_of(s, n).is_red() && color_of(s, r).is_red() {
            return Err(CheckError::RedRedViolation { node: r });
        }
        let rb = verify(s, r)?;
        if rb.min_start < start {
            return Err(CheckError::OrderViolation { node: r });
        }
        max_start = rb.max_start;
        if rb.max_end > expected_max_end {
            expected_max_end = rb.max_end;
        }
        right_bh = rb.black_height;
    }

    if left_bh != right_bh {
        return Err(CheckError::BlackHeightMismatch);
    }

    let found_max_end = max_end_of(s, n);
    if found_max_end != expected_max_end {
        return Err(CheckError::MaxEndMismatch {
            node: n,
            expected: expected_max_end,
            found: found_max_end,
        });
    }

    let own_black = if color_of(s, n).is_black() { 1 } else { 0 };
    Ok(Bounds {
        min_start,
        max_start,
        max_end: expected_max_end,
        black_height: left_bh + own_black,
    })
}

/// Re-verifies I1–I4 (I5 does not apply to the null-parent-root representation
/// used here) by recursive descent, returning the first offending node.
pub(crate) fn check<S: Storage>(
    s: &S,
    root: Option<NodeId>,
) -> Result<(), CheckError<<S::Value as IntervalValue>::Key>> {
    match root {
        None => Ok(()),
        Some(r) => {
            if color_of(s, r).is_red() {
                return Err(CheckError::RootNotBlack { node: r });
            }
            verify(s, r).map(|_| ())
        }
    }
}
