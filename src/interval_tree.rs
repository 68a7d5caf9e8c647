//! Augmented red-black interval tree: an ordered multiset of `[start, end]`
//! intervals keyed by `start`, augmented with a per-node `max_end` summary
//! enabling output-sensitive overlap and stabbing queries.
//!
//! The tree never owns element storage (see [`storage::Storage`]); a caller
//! embeds the [`node::Link`] metadata block in its own value type via
//! [`node::IntervalValue`], or uses the provided [`interval::Interval`] /
//! [`storage::VecArena`] pair directly.

pub mod algo;
pub mod check;
pub mod color;
pub mod interval;
pub mod iter;
pub mod node;
pub mod overlap;
pub mod storage;
pub mod tree;

pub use check::CheckError;
pub use color::Color;
pub use interval::Interval;
pub use iter::InorderIter;
pub use node::{IntervalValue, Link, NodeId};
pub use overlap::OverlapIter;
pub use storage::{Storage, VecArena};
pub use tree::IntervalTree;
