use core::borrow::Borrow;
use core::mem;
use core::ops::{Index, IndexMut};

use super::RedBlackTree;
use crate::Rank;

impl<K, V> RedBlackTree<K, V> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(true);
    /// tree.insert("a", 10);
    /// tree.insert("c", 30);
    /// tree.insert("b", 20);
    ///
    /// let (key, value) = tree.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank).map(|handle| self.raw.entry(handle))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the tree's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(true);
    /// tree.insert(10, "a");
    /// tree.insert(5, "b");
    ///
    /// if let Some((key, value)) = tree.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(tree.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.get_by_rank(rank)?;
        Some(self.raw.entry_mut(handle))
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([(1, 'x'), (2, 'y'), (3, 'z'), (3, 'w'), (3, 'v')]);
    /// assert_eq!(tree.at(2).0, tree.at(4).0);
    /// assert_eq!(tree.at(4), (&3, &'v'));
    /// ```
    pub fn at(&self, rank: usize) -> (&K, &V) {
        self.get_by_rank(rank).expect("`RedBlackTree::at()` - `rank` out of bounds!")
    }

    /// Replaces the value at position `rank`, returning the old one. The key is left as is.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(1, 1), (2, 2), (3, 3)]);
    /// for rank in 0..tree.len() {
    ///     tree.replace_at(rank, 100);
    /// }
    /// assert!(tree.values().all(|value| *value == 100));
    /// ```
    pub fn replace_at(&mut self, rank: usize, value: V) -> V {
        let (_, slot) = self.get_by_rank_mut(rank).expect("`RedBlackTree::replace_at()` - `rank` out of bounds!");
        mem::replace(slot, value)
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Returns the zero-based rank of the earliest inserted entry for `key`,
    /// or `None` if the key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(false);
    /// tree.insert(10, "a");
    /// tree.insert(10, "b");
    /// tree.insert(20, "c");
    ///
    /// assert_eq!(tree.rank_of(&10), Some(0));
    /// assert_eq!(tree.rank_of(&20), Some(2));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| self.raw.rank(handle) - 1)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Rank, RedBlackTree};
///
/// let mut tree = RedBlackTree::new(true);
/// tree.insert("a", 1);
/// tree.insert("b", 2);
///
/// assert_eq!(tree[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for RedBlackTree<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.at(rank.0).1
    }
}

/// Mutably indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Rank, RedBlackTree};
///
/// let mut tree = RedBlackTree::from([("a", 1), ("b", 2)]);
/// tree[Rank(1)] = 5;
///
/// assert_eq!(tree.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for RedBlackTree<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("`RedBlackTree::index_mut()` - `rank` out of bounds!")
    }
}
