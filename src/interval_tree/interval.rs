//! `Interval<K>` — a plain `[start, end]` pair usable directly as a tree payload.

use crate::interval_tree::node::{IntervalValue, Link};
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::RangeInclusive;

/// A standalone interval value, carrying its own embedded [`Link`].
///
/// Useful for key-only usages and tests where a caller doesn't already have
/// its own payload type to embed the tree metadata into.
pub struct Interval<K> {
    pub start: K,
    pub end: K,
    link: Link<K>,
}

impl<K: Ord + Clone> Interval<K> {
    /// Constructs a new interval.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::interval_tree::Interval;
    /// let interval = Interval::new(-2, 10);
    /// assert_eq!(interval.start, -2);
    /// assert_eq!(interval.end, 10);
    /// ```
    pub fn new(start: K, end: K) -> Self {
        let link = Link::new(end.clone());
        Self { start, end, link }
    }

    /// Checks whether the current interval overlaps with another one.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::interval_tree::Interval;
    /// let interval = Interval::from(-2..=10);
    /// assert!(interval.overlaps_with(&(0..=2).into()));
    /// assert!(!interval.overlaps_with(&(20..=30).into()));
    /// ```
    pub fn overlaps_with(&self, other: &Interval<K>) -> bool {
        (self.start <= other.end) && (other.start <= self.end)
    }
}

impl<K: Ord + Clone> IntervalValue for Interval<K> {
    type Key = K;

    fn start(&self) -> K {
        self.start.clone()
    }

    fn end(&self) -> K {
        self.end.clone()
    }

    fn link(&self) -> &Link<K> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<K> {
        &mut self.link
    }
}

impl<K: Clone> Clone for Interval<K> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            end: self.end.clone(),
            link: self.link.clone(),
        }
    }
}

impl<K: Debug> Debug for Interval<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.start, self.end)
    }
}

impl<K: Display> Display for Interval<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl<K: PartialEq> PartialEq for Interval<K> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<K: Eq> Eq for Interval<K> {}

impl<K: Ord + Clone> From<(K, K)> for Interval<K> {
    /// Constructs an interval from a tuple.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::interval_tree::Interval;
    /// let interval: Interval<_> = (-2, 10).into();
    /// assert_eq!(interval.start, -2);
    /// assert_eq!(interval.end, 10);
    /// ```
    fn from((start, end): (K, K)) -> Self {
        Self::new(start, end)
    }
}

impl<K: Ord + Clone> From<RangeInclusive<K>> for Interval<K> {
    /// Constructs an interval from a `RangeInclusive<K>`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::interval_tree::Interval;
    /// let interval: Interval<_> = (-2..=10).into();
    /// assert_eq!(interval.start, -2);
    /// assert_eq!(interval.end, 10);
    /// ```
    fn from(range: RangeInclusive<K>) -> Self {
        let (start, end) = range.into_inner();
        Self::new(start, end)
    }
}

impl<K: Ord + Clone> From<&RangeInclusive<K>> for Interval<K> {
    /// Constructs an interval from a `&RangeInclusive<K>`.
    fn from(range: &RangeInclusive<K>) -> Self {
        Self::new(range.start().clone(), range.end().clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn overlaps_with_detects_shared_point() {
        let a = Interval::new(0, 5);
        let b = Interval::new(5, 10);
        assert!(a.overlaps_with(&b));
    }

    #[test]
    fn overlaps_with_rejects_disjoint() {
        let a = Interval::new(0, 5);
        let b = Interval::new(6, 10);
        assert!(!a.overlaps_with(&b));
    }

    #[test]
    fn from_range_inclusive() {
        let i: Interval<i32> = (1..=3).into();
        assert_eq!(i.start, 1);
        assert_eq!(i.end, 3);
    }
}
