//! Randomized-workload integration test: drives the tree through a mix of
//! insert/erase/query operations against a parallel `Vec` oracle, auditing
//! `check()` every few mutations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rb_interval_tree::interval_tree::{Interval, IntervalTree, NodeId, VecArena};

type Tree = IntervalTree<VecArena<Interval<i32>>>;

fn oracle_overlaps(oracle: &[(i32, i32)], qs: i32, qe: i32) -> usize {
    oracle
        .iter()
        .filter(|&&(s, e)| (qs <= s && s <= qe) || (s <= qs && qs <= e))
        .count()
}

#[test]
fn randomized_workload_matches_oracle_and_stays_valid() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut tree = Tree::new();
    let mut live: Vec<(NodeId, i32, i32)> = Vec::new();

    for tick in 0..2_000 {
        let op = rng.gen_range(0..10);
        if op < 5 || live.is_empty() {
            let start = rng.gen_range(0..200);
            let end = start + rng.gen_range(0..50);
            let id = tree.storage_mut().alloc(Interval::new(start, end));
            tree.insert(id);
            live.push((id, start, end));
        } else if op < 8 {
            let idx = rng.gen_range(0..live.len());
            let (id, _, _) = live.swap_remove(idx);
            tree.erase(id);
        } else {
            let a = rng.gen_range(0..200);
            let b = rng.gen_range(0..200);
            let (qs, qe) = (a.min(b), a.max(b));
            let oracle: Vec<_> = live.iter().map(|&(_, s, e)| (s, e)).collect();
            let expected = oracle_overlaps(&oracle, qs, qe);
            let got = tree.interval_intersect(qs, qe).count();
            assert_eq!(got, expected, "mismatch at tick {tick} for query [{qs},{qe}]");
        }

        if tick % 25 == 0 {
            tree.check().unwrap_or_else(|e| panic!("invariant violated at tick {tick}: {e}"));
            assert_eq!(tree.len(), live.len());
        }
    }

    tree.check().expect("final invariant check");
    assert_eq!(tree.len(), live.len());
}

#[test]
fn leftmost_teardown_drains_in_nondecreasing_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = Tree::new();
    for _ in 0..50 {
        let start = rng.gen_range(0..1_000);
        let end = start + rng.gen_range(0..20);
        let id = tree.storage_mut().alloc(Interval::new(start, end));
        tree.insert(id);
    }

    let mut last = None;
    let mut count = 0;
    while let Some(id) = tree.unlink_leftmost_without_rebalance() {
        let start = tree.storage().get(id).start;
        if let Some(prev) = last {
            assert!(start >= prev);
        }
        last = Some(start);
        count += 1;
    }
    assert_eq!(count, 50);
    assert!(tree.is_empty());
}

#[test]
fn clone_survives_erasure_of_original() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut src = Tree::new();
    let mut ids = Vec::new();
    for _ in 0..100 {
        let start = rng.gen_range(0..500);
        let end = start + rng.gen_range(0..30);
        let id = src.storage_mut().alloc(Interval::new(start, end));
        src.insert(id);
        ids.push(id);
    }

    let mut clone = Tree::new();
    clone.clone_from(&src, |v| Interval::new(v.start, v.end), |_| {});

    for id in ids {
        src.erase(id);
    }
    assert!(src.is_empty());

    clone.check().expect("clone satisfies invariants");
    let queries = [(0, 0), (10, 50), (100, 600), (499, 499)];
    for (qs, qe) in queries {
        // Same count as a fresh linear scan over the clone's own elements.
        let all: Vec<_> = clone.iter().map(|v| (v.start, v.end)).collect();
        let expected = oracle_overlaps(&all, qs, qe);
        assert_eq!(clone.interval_intersect(qs, qe).count(), expected);
    }
}
