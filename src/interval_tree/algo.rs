//! Red-black rotate/insert-fixup/erase-fixup/transplant, extended with the
//! `max_end` augmentation hooks.
//!
//! Follows the standard CLRS red-black tree algorithms, with an augmentation
//! recompute threaded through every place a rotation or splice changes a
//! node's children, and with an explicit `x_parent` carried alongside `x`
//! through the delete fixup since there is no sentinel node here to carry a
//! meaningful `.parent` when `x` itself is absent.

use crate::interval_tree::color::Color;
use crate::interval_tree::node::NodeId;
use crate::interval_tree::storage::Storage;

type Key<S> = <<S as Storage>::Value as crate::interval_tree::node::IntervalValue>::Key;

fn parent<S: Storage>(s: &S, n: NodeId) -> Option<NodeId> {
    s.get(n).link().parent
}

fn left<S: Storage>(s: &S, n: NodeId) -> Option<NodeId> {
    s.get(n).link().left
}

fn right<S: Storage>(s: &S, n: NodeId) -> Option<NodeId> {
    s.get(n).link().right
}

fn color<S: Storage>(s: &S, n: NodeId) -> Color {
    s.get(n).link().color
}

fn max_end<S: Storage>(s: &S, n: NodeId) -> Key<S> {
    s.get(n).link().max_end.clone()
}

fn set_parent<S: Storage>(s: &mut S, n: NodeId, p: Option<NodeId>) {
    s.get_mut(n).link_mut().parent = p;
}

fn set_left<S: Storage>(s: &mut S, n: NodeId, l: Option<NodeId>) {
    s.get_mut(n).link_mut().left = l;
}

fn set_right<S: Storage>(s: &mut S, n: NodeId, r: Option<NodeId>) {
    s.get_mut(n).link_mut().right = r;
}

fn set_color<S: Storage>(s: &mut S, n: NodeId, c: Color) {
    s.get_mut(n).link_mut().color = c;
}

fn set_max_end<S: Storage>(s: &mut S, n: NodeId, k: Key<S>) {
    s.get_mut(n).link_mut().max_end = k;
}

/// A missing child is treated as black, per the usual red-black sentinel convention.
fn is_red<S: Storage>(s: &S, n: Option<NodeId>) -> bool {
    n.is_some_and(|n| color(s, n).is_red())
}

fn is_black<S: Storage>(s: &S, n: Option<NodeId>) -> bool {
    !is_red(s, n)
}

/// Recomputes `n.max_end` from `n`'s own `end()` and its children's
/// `max_end`, per I3. Assumes the children already satisfy I3.
///
/// Doubles as the "init" hook for a fresh leaf: a node with no children
/// simply recomputes to `end()`.
pub(crate) fn recompute_data<S: Storage>(s: &mut S, n: NodeId) {
    let mut m = s.get(n).end();
    if let Some(l) = left(s, n) {
        let lm = max_end(s, l);
        if lm > m {
            m = lm;
        }
    }
    if let Some(r) = right(s, n) {
        let rm = max_end(s, r);
        if rm > m {
            m = rm;
        }
    }
    set_max_end(s, n, m);
}

/// Walks from `cur` up to the root, recomputing `max_end` at every node
/// visited. Always propagates all the way up rather than stopping early,
/// which is simpler to reason about than tracking how far a change reaches.
pub(crate) fn propagate<S: Storage>(s: &mut S, mut cur: Option<NodeId>) {
    while let Some(n) = cur {
        recompute_data(s, n);
        cur = parent(s, n);
    }
}

fn tree_minimum<S: Storage>(s: &S, mut n: NodeId) -> NodeId {
    while let Some(l) = left(s, n) {
        n = l;
    }
    n
}

fn tree_maximum<S: Storage>(s: &S, mut n: NodeId) -> NodeId {
    while let Some(r) = right(s, n) {
        n = r;
    }
    n
}

/// Left-rotates at `x`, promoting its right child. Recomputes `x` then `y`
/// afterward, in that order, since `y` becomes the parent of `x`.
fn rotate_left<S: Storage>(s: &mut S, root: &mut Option<NodeId>, x: NodeId) {
    let y = right(s, x).expect("rotate_left requires a right child");
    set_right(s, x, left(s, y));
    if let Some(yl) = left(s, y) {
        set_parent(s, yl, Some(x));
    }
    set_parent(s, y, parent(s, x));
    match parent(s, x) {
        None => *root = Some(y),
        Some(p) if left(s, p) == Some(x) => set_left(s, p, Some(y)),
        Some(p) => set_right(s, p, Some(y)),
    }
    set_left(s, y, Some(x));
    set_parent(s, x, Some(y));

    recompute_data(s, x);
    recompute_data(s, y);
}

/// Mirror of [`rotate_left`].
fn rotate_right<S: Storage>(s: &mut S, root: &mut Option<NodeId>, x: NodeId) {
    let y = left(s, x).expect("rotate_right requires a left child");
    set_left(s, x, right(s, y));
    if let Some(yr) = right(s, y) {
        set_parent(s, yr, Some(x));
    }
    set_parent(s, y, parent(s, x));
    match parent(s, x) {
        None => *root = Some(y),
        Some(p) if left(s, p) == Some(x) => set_left(s, p, Some(y)),
        Some(p) => set_right(s, p, Some(y)),
    }
    set_right(s, y, Some(x));
    set_parent(s, x, Some(y));

    recompute_data(s, x);
    recompute_data(s, y);
}

/// Links `z` as a fresh red leaf, BST-ordered by `start`. Ties go right, so
/// equal-start elements land in stable insertion order (I1).
pub(crate) fn insert<S: Storage>(s: &mut S, root: &mut Option<NodeId>, z: NodeId) {
    let z_start = s.get(z).start();

    let mut y = None;
    let mut x = *root;
    while let Some(xi) = x {
        y = Some(xi);
        x = if z_start < s.get(xi).start() {
            left(s, xi)
        } else {
            right(s, xi)
        };
    }

    set_parent(s, z, y);
    set_left(s, z, None);
    set_right(s, z, None);
    set_color(s, z, Color::Red);

    match y {
        None => *root = Some(z),
        Some(yi) if z_start < s.get(yi).start() => set_left(s, yi, Some(z)),
        Some(yi) => set_right(s, yi, Some(z)),
    }

    recompute_data(s, z);
    insert_fixup(s, root, z);
    propagate(s, parent(s, z));
}

fn insert_fixup<S: Storage>(s: &mut S, root: &mut Option<NodeId>, mut z: NodeId) {
    while is_red(s, parent(s, z)) {
        let p = parent(s, z).expect("loop condition guarantees a red parent");
        let gp = parent(s, p).expect("a red node's parent cannot be the (black) root");

        if Some(p) == left(s, gp) {
            let uncle = right(s, gp);
            if is_red(s, uncle) {
                set_color(s, p, Color::Black);
                set_color(s, uncle.expect("checked red, hence present"), Color::Black);
                set_color(s, gp, Color::Red);
                z = gp;
            } else {
                if Some(z) == right(s, p) {
                    z = p;
                    rotate_left(s, root, z);
                }
                let p = parent(s, z).expect("z still has a parent after the possible rotation");
                let gp = parent(s, p).expect("grandparent still present");
                set_color(s, p, Color::Black);
                set_color(s, gp, Color::Red);
                rotate_right(s, root, gp);
            }
        } else {
            let uncle = left(s, gp);
            if is_red(s, uncle) {
                set_color(s, p, Color::Black);
                set_color(s, uncle.expect("checked red, hence present"), Color::Black);
                set_color(s, gp, Color::Red);
                z = gp;
            } else {
                if Some(z) == left(s, p) {
                    z = p;
                    rotate_right(s, root, z);
                }
                let p = parent(s, z).expect("z still has a parent after the possible rotation");
                let gp = parent(s, p).expect("grandparent still present");
                set_color(s, p, Color::Black);
                set_color(s, gp, Color::Red);
                rotate_left(s, root, gp);
            }
        }
    }
    set_color(
        s,
        root.expect("a just-inserted node guarantees a non-empty tree"),
        Color::Black,
    );
}

fn transplant<S: Storage>(s: &mut S, root: &mut Option<NodeId>, u: NodeId, v: Option<NodeId>) {
    match parent(s, u) {
        None => *root = v,
        Some(p) if left(s, p) == Some(u) => set_left(s, p, v),
        Some(p) => set_right(s, p, v),
    }
    if let Some(v) = v {
        set_parent(s, v, parent(s, u));
    }
}

/// Unlinks `z` from the tree, restoring I1–I3 (§4.3 `erase`). `z` is left
/// with stale link fields; the caller must not dereference them.
pub(crate) fn erase<S: Storage>(s: &mut S, root: &mut Option<NodeId>, z: NodeId) {
    let y_original_color;
    let x: Option<NodeId>;
    let x_parent: Option<NodeId>;

    if left(s, z).is_none() {
        x = right(s, z);
        x_parent = parent(s, z);
        y_original_color = color(s, z);
        transplant(s, root, z, x);
    } else if right(s, z).is_none() {
        x = left(s, z);
        x_parent = parent(s, z);
        y_original_color = color(s, z);
        transplant(s, root, z, x);
    } else {
        let y = tree_minimum(s, right(s, z).expect("checked: right child exists"));
        y_original_color = color(s, y);
        x = right(s, y);

        if parent(s, y) == Some(z) {
            x_parent = Some(y);
        } else {
            x_parent = parent(s, y);
            transplant(s, root, y, x);
            set_right(s, y, right(s, z));
            if let Some(r) = right(s, y) {
                set_parent(s, r, Some(y));
            }
        }

        transplant(s, root, z, Some(y));
        set_left(s, y, left(s, z));
        if let Some(l) = left(s, y) {
            set_parent(s, l, Some(y));
        }
        set_color(s, y, color(s, z));
    }

    if y_original_color.is_black() {
        delete_fixup(s, root, x, x_parent);
    }

    // Augmentation repair: `x_parent` is the lowest point any splicing above
    // touched. Its ancestor chain now leads through every node the splice
    // passed under (e.g. `y`, when `y` was not `z`'s direct child) on the way
    // to the root, so a single upward walk from here recomputes all of them
    // in the right order.
    propagate(s, x_parent);
}

fn delete_fixup<S: Storage>(
    s: &mut S,
    root: &mut Option<NodeId>,
    mut x: Option<NodeId>,
    mut x_parent: Option<NodeId>,
) {
    while x != *root && is_black(s, x) {
        let Some(p) = x_parent else { break };

        if x == left(s, p) {
            let mut w = right(s, p).expect("x's sibling cannot be absent: x is a black child");
            if color(s, w).is_red() {
                set_color(s, w, Color::Black);
                set_color(s, p, Color::Red);
                rotate_left(s, root, p);
                w = right(s, p).expect("sibling still present after rotation");
            }
            if is_black(s, left(s, w)) && is_black(s, right(s, w)) {
                set_color(s, w, Color::Red);
                x = Some(p);
                x_parent = parent(s, p);
            } else {
                if is_black(s, right(s, w)) {
                    if let Some(wl) = left(s, w) {
                        set_color(s, wl, Color::Black);
                    }
                    set_color(s, w, Color::Red);
                    rotate_right(s, root, w);
                    w = right(s, p).expect("sibling still present after rotation");
                }
                set_color(s, w, color(s, p));
                set_color(s, p, Color::Black);
                if let Some(wr) = right(s, w) {
                    set_color(s, wr, Color::Black);
                }
                rotate_left(s, root, p);
                x = *root;
                x_parent = None;
            }
        } else {
            let mut w = left(s, p).expect("x's sibling cannot be absent: x is a black child");
            if color(s, w).is_red() {
                set_color(s, w, Color::Black);
                set_color(s, p, Color::Red);
                rotate_right(s, root, p);
                w = left(s, p).expect("sibling still present after rotation");
            }
            if is_black(s, left(s, w)) && is_black(s, right(s, w)) {
                set_color(s, w, Color::Red);
                x = Some(p);
                x_parent = parent(s, p);
            } else {
                if is_black(s, left(s, w)) {
                    if let Some(wr) = right(s, w) {
                        set_color(s, wr, Color::Black);
                    }
                    set_color(s, w, Color::Red);
                    rotate_left(s, root, w);
                    w = left(s, p).expect("sibling still present after rotation");
                }
                set_color(s, w, color(s, p));
                set_color(s, p, Color::Black);
                if let Some(wl) = left(s, w) {
                    set_color(s, wl, Color::Black);
                }
                rotate_right(s, root, p);
                x = *root;
                x_parent = None;
            }
        }
    }
    if let Some(x) = x {
        set_color(s, x, Color::Black);
    }
}

/// Unlinks the leftmost node without restoring balance (§4.3's
/// `unlink_leftmost_without_rebalance`). Valid only as a fast teardown path;
/// the caller must finish draining before querying or inserting again.
pub(crate) fn unlink_leftmost_without_rebalance<S: Storage>(
    s: &mut S,
    root: &mut Option<NodeId>,
    leftmost: NodeId,
) {
    let r = right(s, leftmost);
    transplant(s, root, leftmost, r);
}

pub(crate) use tree_maximum as maximum;
pub(crate) use tree_minimum as minimum;

/// In-order BST successor of `n`, or `None` if `n` is the last element.
pub(crate) fn successor<S: Storage>(s: &S, n: NodeId) -> Option<NodeId> {
    if let Some(r) = right(s, n) {
        return Some(tree_minimum(s, r));
    }
    let mut n = n;
    let mut p = parent(s, n);
    while let Some(pi) = p {
        if right(s, pi) != Some(n) {
            return Some(pi);
        }
        n = pi;
        p = parent(s, pi);
    }
    None
}

/// In-order BST predecessor of `n`, or `None` if `n` is the first element.
pub(crate) fn predecessor<S: Storage>(s: &S, n: NodeId) -> Option<NodeId> {
    if let Some(l) = left(s, n) {
        return Some(tree_maximum(s, l));
    }
    let mut n = n;
    let mut p = parent(s, n);
    while let Some(pi) = p {
        if left(s, pi) != Some(n) {
            return Some(pi);
        }
        n = pi;
        p = parent(s, pi);
    }
    None
}

pub(crate) use color as color_of;
pub(crate) use left as left_of;
pub(crate) use max_end as max_end_of;
pub(crate) use parent as parent_of;
pub(crate) use right as right_of;
