use super::RedBlackTree;
use crate::raw::RawRedBlackTree;

impl<K, V> RedBlackTree<K, V> {
    /// Creates an empty tree with room for at least `capacity` entries before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, i32> = RedBlackTree::with_capacity(true, 32);
    /// assert!(tree.is_empty());
    /// assert!(tree.is_uniquely_keyed());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(unique_keys: bool, capacity: usize) -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::with_capacity(unique_keys, capacity),
        }
    }

    /// Returns the number of entries the tree can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, i32> = RedBlackTree::with_capacity(false, 32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
