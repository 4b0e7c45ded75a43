use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use log::trace;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use super::size::Size;

const SENTINEL: Handle = Handle::SENTINEL;

/// Explicit traversal stack. Balanced trees stay far below the inline capacity.
type Stack = SmallVec<[Handle; 64]>;

/// The core order-statistic red-black tree backing `RedBlackTree`.
#[derive(Clone)]
pub(crate) struct RawRedBlackTree<K, V> {
    /// Arena storing all tree nodes. Slot 0 is the sentinel.
    nodes: Arena<Node<K>>,
    /// Arena storing all values (separate from nodes so a key and its value can be borrowed apart).
    values: Arena<V>,
    /// Handle to the root node, or the sentinel if the tree is empty.
    root: Handle,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// Whether an insert of an already present key is rejected.
    unique_keys: bool,
}

impl<K, V> RawRedBlackTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new(unique_keys: bool) -> Self {
        Self::with_capacity(unique_keys, 0)
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(unique_keys: bool, capacity: usize) -> Self {
        let mut nodes = Arena::with_capacity(capacity + 1);
        let sentinel = nodes.alloc(Node::sentinel());
        debug_assert_eq!(sentinel, SENTINEL);
        Self {
            nodes,
            values: Arena::with_capacity(capacity),
            root: SENTINEL,
            len: 0,
            unique_keys,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) const fn is_uniquely_keyed(&self) -> bool {
        self.unique_keys
    }

    /// Clears all elements from the tree, keeping the sentinel.
    pub(crate) fn clear(&mut self) {
        trace!("clearing red-black tree of {} entries", self.len);
        self.nodes.clear();
        self.values.clear();
        let sentinel = self.nodes.alloc(Node::sentinel());
        debug_assert_eq!(sentinel, SENTINEL);
        self.root = SENTINEL;
        self.len = 0;
    }

    /// Removes every entry, returning them in ascending key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }

        let mut result = Vec::with_capacity(handles.len());
        for handle in handles {
            let (key, value) = self.nodes.take(handle).into_entry();
            result.push((key, self.values.take(value)));
        }

        self.clear();
        result
    }

    /// Returns the key stored at `handle`.
    #[cfg(test)]
    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    /// Returns the key-value pair stored at `handle`.
    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get(node.value()))
    }

    /// Returns the key and a mutable value stored at `handle`.
    #[inline]
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Returns the leftmost node, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        (!self.root.is_sentinel()).then(|| self.minimum(self.root))
    }

    /// Returns the rightmost node, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        (!self.root.is_sentinel()).then(|| self.maximum(self.root))
    }

    /// Returns the in-order successor of `handle`.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        let right = self.right(handle);
        if !right.is_sentinel() {
            return Some(self.minimum(right));
        }
        let mut x = handle;
        let mut y = self.parent(x);
        while !y.is_sentinel() && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        (!y.is_sentinel()).then_some(y)
    }

    /// Returns the in-order predecessor of `handle`.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        let left = self.left(handle);
        if !left.is_sentinel() {
            return Some(self.maximum(left));
        }
        let mut x = handle;
        let mut y = self.parent(x);
        while !y.is_sentinel() && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        (!y.is_sentinel()).then_some(y)
    }

    /// Returns the node holding the `rank`-th smallest key (1-indexed).
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not within `1..=len`.
    pub(crate) fn select(&self, rank: usize) -> Handle {
        assert!((1..=self.len).contains(&rank), "`RawRedBlackTree::select()` - `rank` out of bounds!");
        let mut x = self.root;
        let mut rank = rank;
        loop {
            let r = self.order(self.left(x)) + 1;
            match rank.cmp(&r) {
                Ordering::Equal => return x,
                Ordering::Less => x = self.left(x),
                Ordering::Greater => {
                    rank -= r;
                    x = self.right(x);
                }
            }
        }
    }

    /// Gets a node by its zero-based position in sorted order.
    pub(crate) fn get_by_rank(&self, index: usize) -> Option<Handle> {
        (index < self.len).then(|| self.select(index + 1))
    }

    /// Returns the 1-indexed rank of `handle` by climbing to the root.
    pub(crate) fn rank(&self, handle: Handle) -> usize {
        let mut x = handle;
        let mut r = self.order(self.left(x)) + 1;
        while x != self.root {
            let parent = self.parent(x);
            if x == self.right(parent) {
                r += self.order(self.left(parent)) + 1;
            }
            x = parent;
        }
        r
    }

    /// Unlinks `z` from the tree and returns its entry.
    pub(crate) fn remove_node(&mut self, z: Handle) -> (K, V) {
        // Every proper ancestor of `z` loses exactly one node.
        let mut t = self.parent(z);
        while !t.is_sentinel() {
            self.decrement_order(t);
            t = self.parent(t);
        }

        let mut y_color = self.color(z);
        let x;

        if self.left(z).is_sentinel() {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z).is_sentinel() {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            let y = self.minimum(self.right(z));
            y_color = self.color(y);
            x = self.right(y);
            if self.parent(y) == z {
                self.nodes.get_mut(x).set_parent(y);
            } else {
                self.transplant(y, x);
                let z_right = self.right(z);
                self.nodes.get_mut(y).set_right(z_right);
                self.nodes.get_mut(z_right).set_parent(y);
                // Nodes between the successor's old slot and `z.right` lose the successor.
                let mut t = self.parent(x);
                while t != y {
                    self.decrement_order(t);
                    t = self.parent(t);
                }
            }
            self.transplant(z, y);
            let z_left = self.left(z);
            self.nodes.get_mut(y).set_left(z_left);
            self.nodes.get_mut(z_left).set_parent(y);
            let z_color = self.color(z);
            self.set_color(y, z_color);
            self.update_order(y);
        }

        if y_color == Color::Black {
            self.remove_fixup(x);
        }
        self.nodes.get_mut(SENTINEL).set_parent(SENTINEL);
        self.len -= 1;

        let (key, value) = self.nodes.take(z).into_entry();
        (key, self.values.take(value))
    }

    fn parent(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).parent()
    }

    fn left(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).left()
    }

    fn right(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).right()
    }

    fn color(&self, handle: Handle) -> Color {
        self.nodes.get(handle).color()
    }

    fn is_red(&self, handle: Handle) -> bool {
        self.nodes.get(handle).is_red()
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    fn order(&self, handle: Handle) -> usize {
        self.nodes.get(handle).order().to_usize()
    }

    fn decrement_order(&mut self, handle: Handle) {
        let node = self.nodes.get_mut(handle);
        node.set_order(node.order().decrement());
    }

    /// Recomputes `order` of `handle` from its children.
    fn update_order(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let order = Size::combine(self.nodes.get(node.left()).order(), self.nodes.get(node.right()).order());
        self.nodes.get_mut(handle).set_order(order);
    }

    fn minimum(&self, handle: Handle) -> Handle {
        let mut x = handle;
        while !self.left(x).is_sentinel() {
            x = self.left(x);
        }
        x
    }

    fn maximum(&self, handle: Handle) -> Handle {
        let mut x = handle;
        while !self.right(x).is_sentinel() {
            x = self.right(x);
        }
        x
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`.
    /// Writes `v.parent` even when `v` is the sentinel; the delete fixup reads it.
    fn transplant(&mut self, u: Handle, v: Handle) {
        let u_parent = self.parent(u);
        if u_parent.is_sentinel() {
            self.root = v;
        } else if u == self.left(u_parent) {
            self.nodes.get_mut(u_parent).set_left(v);
        } else {
            self.nodes.get_mut(u_parent).set_right(v);
        }
        self.nodes.get_mut(v).set_parent(u_parent);
    }

    fn left_rotate(&mut self, x: Handle) {
        let y = self.right(x);
        let y_left = self.left(y);

        self.nodes.get_mut(x).set_right(y_left);
        if !y_left.is_sentinel() {
            self.nodes.get_mut(y_left).set_parent(x);
        }

        let x_parent = self.parent(x);
        self.nodes.get_mut(y).set_parent(x_parent);
        if x_parent.is_sentinel() {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.nodes.get_mut(x_parent).set_left(y);
        } else {
            self.nodes.get_mut(x_parent).set_right(y);
        }

        self.nodes.get_mut(y).set_left(x);
        self.nodes.get_mut(x).set_parent(y);

        // `y` now spans exactly what `x` spanned.
        let x_order = self.nodes.get(x).order();
        self.nodes.get_mut(y).set_order(x_order);
        self.update_order(x);
    }

    fn right_rotate(&mut self, y: Handle) {
        let x = self.left(y);
        let x_right = self.right(x);

        self.nodes.get_mut(y).set_left(x_right);
        if !x_right.is_sentinel() {
            self.nodes.get_mut(x_right).set_parent(y);
        }

        let y_parent = self.parent(y);
        self.nodes.get_mut(x).set_parent(y_parent);
        if y_parent.is_sentinel() {
            self.root = x;
        } else if y == self.right(y_parent) {
            self.nodes.get_mut(y_parent).set_right(x);
        } else {
            self.nodes.get_mut(y_parent).set_left(x);
        }

        self.nodes.get_mut(x).set_right(y);
        self.nodes.get_mut(y).set_parent(x);

        let y_order = self.nodes.get(y).order();
        self.nodes.get_mut(x).set_order(y_order);
        self.update_order(y);
    }

    /// Restores the red-black properties after `z` was attached as a red leaf.
    fn insert_fixup(&mut self, node: Handle) {
        let mut z = node;
        while self.is_red(self.parent(z)) {
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.left_rotate(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.right_rotate(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.right_rotate(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.left_rotate(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Restores the black-height after a black node was spliced out above `x`.
    fn remove_fixup(&mut self, node: Handle) {
        let mut x = node;
        while x != self.root && !self.is_red(x) {
            let parent = self.parent(x);
            if x == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.left_rotate(parent);
                    sibling = self.right(self.parent(x));
                }
                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.right(sibling)) {
                        let nephew = self.left(sibling);
                        self.set_color(nephew, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.right_rotate(sibling);
                        sibling = self.right(self.parent(x));
                    }
                    let parent = self.parent(x);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let nephew = self.right(sibling);
                    self.set_color(nephew, Color::Black);
                    self.left_rotate(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.right_rotate(parent);
                    sibling = self.left(self.parent(x));
                }
                if !self.is_red(self.right(sibling)) && !self.is_red(self.left(sibling)) {
                    self.set_color(sibling, Color::Red);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.left(sibling)) {
                        let nephew = self.right(sibling);
                        self.set_color(nephew, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.left_rotate(sibling);
                        sibling = self.left(self.parent(x));
                    }
                    let parent = self.parent(x);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let nephew = self.left(sibling);
                    self.set_color(nephew, Color::Black);
                    self.right_rotate(parent);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

impl<K: Ord, V> RawRedBlackTree<K, V> {
    /// Finds the earliest inserted node whose key equals `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        let mut found = None;
        while !x.is_sentinel() {
            let node = self.nodes.get(x);
            match key.cmp(node.key().borrow()) {
                Ordering::Less => x = node.left(),
                Ordering::Greater => x = node.right(),
                Ordering::Equal => {
                    // Equal keys are contiguous; keep looking left for an earlier one.
                    found = Some(x);
                    x = node.left();
                }
            }
        }
        found
    }

    /// Number of entries ordered strictly before `key` (or up to and including it).
    fn rank_bound<Q>(&self, key: &Q, inclusive: bool) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut x = self.root;
        let mut rank = 0;
        while !x.is_sentinel() {
            let node = self.nodes.get(x);
            let go_left = match key.cmp(node.key().borrow()) {
                Ordering::Less => true,
                Ordering::Equal => !inclusive,
                Ordering::Greater => false,
            };
            if go_left {
                x = node.left();
            } else {
                rank += self.order(node.left()) + 1;
                x = node.right();
            }
        }
        rank
    }

    /// Counts the entries whose key equals `key`.
    pub(crate) fn count_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.rank_bound(key, true) - self.rank_bound(key, false)
    }

    /// Inserts a key-value pair, returning the new node.
    ///
    /// Under the unique-key policy an existing key rejects the pair, which is handed back untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Handle, (K, V)> {
        if self.unique_keys && self.find(&key).is_some() {
            trace!("rejecting duplicate key under the unique-key policy");
            return Err((key, value));
        }

        let mut y = SENTINEL;
        let mut x = self.root;
        let mut goes_left = false;
        while !x.is_sentinel() {
            y = x;
            let node = self.nodes.get_mut(x);
            node.set_order(node.order().increment());
            // Ties descend right so equal keys keep insertion order.
            goes_left = key < *node.key();
            x = if goes_left { node.left() } else { node.right() };
        }

        let value = self.values.alloc(value);
        let z = self.nodes.alloc(Node::new(y, key, value));

        if y.is_sentinel() {
            self.root = z;
        } else if goes_left {
            self.nodes.get_mut(y).set_left(z);
        } else {
            self.nodes.get_mut(y).set_right(z);
        }

        self.insert_fixup(z);
        self.len += 1;
        Ok(z)
    }

    /// Removes the earliest inserted entry for `key`.
    pub(crate) fn remove_one<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let z = self.find(key)?;
        Some(self.remove_node(z))
    }

    /// Removes every entry for `key`, returning how many were removed.
    pub(crate) fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut removed = 0;
        while self.remove_one(key).is_some() {
            removed += 1;
        }
        if removed > 1 {
            trace!("removed {removed} entries sharing one key");
        }
        removed
    }

    /// Applies `f` to the value of every entry whose key equals `key`.
    ///
    /// Walks with an explicit stack and only enters subtrees that can hold `key`.
    pub(crate) fn update_matching<Q, F>(&mut self, key: &Q, mut f: F) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        F: FnMut(&mut V),
    {
        let mut stack: Stack = SmallVec::new();
        stack.push(self.root);
        let mut updated = 0;

        while let Some(x) = stack.pop() {
            if x.is_sentinel() {
                continue;
            }
            let node = self.nodes.get(x);
            match key.cmp(node.key().borrow()) {
                Ordering::Less => stack.push(node.left()),
                Ordering::Greater => stack.push(node.right()),
                Ordering::Equal => {
                    stack.push(node.right());
                    stack.push(node.left());
                    f(self.values.get_mut(node.value()));
                    updated += 1;
                }
            }
        }

        updated
    }
}

#[cfg(test)]
impl<K: Ord, V> RawRedBlackTree<K, V> {
    /// Asserts every structural invariant, returning the tree's black-height.
    pub(crate) fn check_invariants(&self) -> usize {
        let sentinel = self.nodes.get(SENTINEL);
        assert_eq!(sentinel.color(), Color::Black, "sentinel must be black");
        assert_eq!(sentinel.order(), Size::ZERO, "sentinel must have order 0");
        assert!(sentinel.parent().is_sentinel(), "sentinel parent must be reset");

        assert!(self.parent(self.root).is_sentinel(), "root parent must be the sentinel");
        assert!(!self.is_red(self.root), "root must be black");
        assert_eq!(self.order(self.root), self.len, "root order must equal len");
        assert_eq!(self.nodes.len(), self.len + 1, "one node per entry plus the sentinel");
        assert_eq!(self.values.len(), self.len, "one value per entry");

        let mut previous: Option<Handle> = None;
        let mut current = self.first();
        let mut seen = 0;
        while let Some(handle) = current {
            if let Some(previous) = previous {
                assert!(self.key(previous) <= self.key(handle), "in-order keys must not decrease");
            }
            seen += 1;
            previous = current;
            current = self.successor(handle);
        }
        assert_eq!(seen, self.len);

        self.check_subtree(self.root)
    }

    fn check_subtree(&self, handle: Handle) -> usize {
        if handle.is_sentinel() {
            return 1;
        }
        let node = self.nodes.get(handle);
        for child in [node.left(), node.right()] {
            if !child.is_sentinel() {
                assert_eq!(self.parent(child), handle, "child must point back at its parent");
                assert!(!(node.is_red() && self.is_red(child)), "red node with a red child");
            }
        }
        assert_eq!(
            self.order(handle),
            self.order(node.left()) + self.order(node.right()) + 1,
            "order must equal left.order + right.order + 1"
        );
        let left_height = self.check_subtree(node.left());
        let right_height = self.check_subtree(node.right());
        assert_eq!(left_height, right_height, "black-height mismatch");
        left_height + usize::from(!node.is_red())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    fn keys<K: Ord + Clone, V>(tree: &RawRedBlackTree<K, V>) -> Vec<K> {
        (0..tree.len())
            .map(|index| tree.key(tree.get_by_rank(index).unwrap()).clone())
            .collect()
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree: RawRedBlackTree<i32, i32> = RawRedBlackTree::new(true);
        assert_eq!(tree.check_invariants(), 1);
        assert!(tree.is_empty());
        assert!(tree.first().is_none());
        assert!(tree.last().is_none());
        assert!(tree.get_by_rank(0).is_none());
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = RawRedBlackTree::new(true);
        for key in 0..1024 {
            assert!(tree.insert(key, key * 10).is_ok());
        }
        let black_height = tree.check_invariants();
        // A red-black tree of n nodes has black-height at most log2(n + 1) + 1.
        assert!(black_height <= 12, "black-height {black_height} too large");
        assert_eq!(keys(&tree), (0..1024).collect::<Vec<_>>());
    }

    #[test]
    fn duplicate_keys_keep_insertion_order() {
        let mut tree = RawRedBlackTree::new(false);
        for (sequence, key) in [3, 1, 3, 2, 3, 1].into_iter().enumerate() {
            tree.insert(key, sequence).unwrap();
        }
        tree.check_invariants();

        let entries: Vec<(i32, usize)> = (0..tree.len())
            .map(|index| {
                let (k, v) = tree.entry(tree.get_by_rank(index).unwrap());
                (*k, *v)
            })
            .collect();
        assert_eq!(entries, vec![(1, 1), (1, 5), (2, 3), (3, 0), (3, 2), (3, 4)]);

        // `find` reports the earliest inserted instance.
        let first_three = tree.find(&3).unwrap();
        assert_eq!(tree.entry(first_three), (&3, &0));
        assert_eq!(tree.rank(first_three), 4);
    }

    #[test]
    fn unique_policy_hands_back_rejected_pair() {
        let mut tree = RawRedBlackTree::new(true);
        assert!(tree.insert("a", 1).is_ok());
        assert_eq!(tree.insert("a", 2), Err(("a", 2)));
        assert_eq!(tree.len(), 1);
        tree.check_invariants();
    }

    #[test]
    fn removing_a_two_child_node_relinks_its_successor() {
        let mut tree = RawRedBlackTree::new(true);
        for key in [50, 30, 70, 20, 40, 60, 80, 65] {
            tree.insert(key, ()).unwrap();
        }
        tree.check_invariants();

        assert_eq!(tree.remove_one(&50), Some((50, ())));
        tree.check_invariants();
        assert_eq!(keys(&tree), vec![20, 30, 40, 60, 65, 70, 80]);

        assert_eq!(tree.remove_one(&30), Some((30, ())));
        tree.check_invariants();
        assert_eq!(tree.remove_one(&30), None);
        assert_eq!(keys(&tree), vec![20, 40, 60, 65, 70, 80]);
    }

    #[test]
    #[should_panic(expected = "`RawRedBlackTree::select()` - `rank` out of bounds!")]
    fn select_rank_zero_panics() {
        let mut tree = RawRedBlackTree::new(true);
        tree.insert(1, 1).unwrap();
        let _ = tree.select(0);
    }

    #[test]
    #[should_panic(expected = "`RawRedBlackTree::select()` - `rank` out of bounds!")]
    fn select_past_len_panics() {
        let mut tree = RawRedBlackTree::new(true);
        tree.insert(1, 1).unwrap();
        let _ = tree.select(2);
    }

    #[test]
    fn count_and_update_touch_only_matching_keys() {
        let mut tree = RawRedBlackTree::new(false);
        for key in [5, 1, 5, 9, 5, 2, 5] {
            tree.insert(key, 0).unwrap();
        }
        assert_eq!(tree.count_of(&5), 4);
        assert_eq!(tree.count_of(&4), 0);
        assert_eq!(tree.update_matching(&5, |value| *value += 1), 4);

        let values: Vec<i32> = (0..tree.len()).map(|i| *tree.entry(tree.get_by_rank(i).unwrap()).1).collect();
        assert_eq!(values, vec![0, 0, 1, 1, 1, 1, 0]);
        assert_eq!(tree.remove_all(&5), 4);
        assert_eq!(tree.len(), 3);
        tree.check_invariants();
    }

    #[test]
    fn drain_returns_sorted_entries_and_resets() {
        let mut tree = RawRedBlackTree::new(false);
        for key in [4, 2, 8, 2, 6] {
            tree.insert(key, key).unwrap();
        }
        assert_eq!(tree.drain_to_vec(), vec![(2, 2), (2, 2), (4, 4), (6, 6), (8, 8)]);
        assert!(tree.is_empty());
        tree.check_invariants();
        tree.insert(1, 1).unwrap();
        tree.check_invariants();
    }

    proptest! {
        #[test]
        fn invariants_hold_under_random_mutation(
            unique in any::<bool>(),
            operations in prop::collection::vec(strategy(), 0..512),
        ) {
            let mut tree = RawRedBlackTree::new(unique);
            let mut model: Vec<(i16, u32)> = Vec::new();

            for operation in operations {
                match operation {
                    Operation::Insert(key, value) => {
                        let present = model.iter().any(|(k, _)| *k == key);
                        let inserted = tree.insert(key, value).is_ok();
                        prop_assert_eq!(inserted, !(unique && present));
                        if inserted {
                            let position = model.partition_point(|(k, _)| *k <= key);
                            model.insert(position, (key, value));
                        }
                    }
                    Operation::RemoveOne(key) => {
                        let expected = model.iter().position(|(k, _)| *k == key).map(|i| model.remove(i));
                        prop_assert_eq!(tree.remove_one(&key), expected);
                    }
                    Operation::RemoveAll(key) => {
                        let before = model.len();
                        model.retain(|(k, _)| *k != key);
                        prop_assert_eq!(tree.remove_all(&key), before - model.len());
                    }
                    Operation::RemoveByRank(which) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        let handle = tree.select(index + 1);
                        prop_assert_eq!(tree.remove_node(handle), model.remove(index));
                    }
                }

                tree.check_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            for (index, (key, value)) in model.iter().enumerate() {
                let handle = tree.select(index + 1);
                prop_assert_eq!(tree.entry(handle), (key, value));
                prop_assert_eq!(tree.rank(handle), index + 1);
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(i16, u32),
        RemoveOne(i16),
        RemoveAll(i16),
        RemoveByRank(usize),
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            12 => (-64i16..64, any::<u32>()).prop_map(|(key, value)| Operation::Insert(key, value)),
            4 => (-64i16..64).prop_map(Operation::RemoveOne),
            1 => (-64i16..64).prop_map(Operation::RemoveAll),
            3 => any::<usize>().prop_map(Operation::RemoveByRank),
        ]
    }
}
