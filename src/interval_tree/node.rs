//! Node identity and the metadata block embedded by the caller.

use crate::interval_tree::color::Color;
use std::fmt::{self, Debug, Formatter};

/// An opaque handle identifying a node stored in some
/// [`Storage`](crate::interval_tree::storage::Storage).
///
/// This is the arena-index realization of the "node reference" used
/// throughout the traits abstraction: cheap to copy, comparable for
/// equality, and otherwise meaningless outside the `Storage` it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The red-black/augmentation metadata a caller embeds inside its own
/// element type (intrusive storage).
///
/// `max_end` is the per-node summary: the maximum `end` over the subtree
/// rooted at this node (I3).
#[derive(Clone)]
pub struct Link<K> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) color: Color,
    pub(crate) max_end: K,
}

impl<K: Clone> Link<K> {
    /// Creates a fresh, unlinked link whose `max_end` is initialized from
    /// `end` (the node's own endpoint, before any children are attached).
    pub fn new(end: K) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            max_end: end,
        }
    }
}

impl<K: Debug> Debug for Link<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("color", &self.color)
            .field("max_end", &self.max_end)
            .finish()
    }
}

/// The payload contract a value stored in the tree must satisfy.
///
/// `Key` must be totally ordered and support `max` — `Ord` gives both.
pub trait IntervalValue {
    /// The totally ordered key type of this value's endpoints.
    type Key: Ord + Clone;

    /// The interval's start endpoint.
    fn start(&self) -> Self::Key;

    /// The interval's end endpoint. Callers must guarantee `start() <= end()` (I4).
    fn end(&self) -> Self::Key;

    /// Read access to the embedded red-black/augmentation metadata.
    fn link(&self) -> &Link<Self::Key>;

    /// Write access to the embedded red-black/augmentation metadata.
    fn link_mut(&mut self) -> &mut Link<Self::Key>;
}
