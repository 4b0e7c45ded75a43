use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Index, Sub, SubAssign};

use log::debug;

use crate::raw::{Handle, RawRedBlackTree};

mod capacity;
mod order_statistic;
mod probable;

pub use crate::Rank;

/// An ordered map (or multimap) based on a [red-black tree] augmented with subtree sizes.
///
/// Keys must implement [`Ord`]. Entries are kept in ascending key order, and every node
/// records how many entries its subtree holds, so the entry at a given sorted position and
/// the position of a given key are both found in O(log n).
///
/// Whether a key may appear more than once is fixed at construction:
///
/// - a **uniquely keyed** tree rejects an insert whose key is already present;
/// - a **multi-keyed** tree keeps every insert. Entries sharing a key sit next to each
///   other in the order they were inserted, and key lookups report the earliest one.
///
/// With `V = ()` the tree acts as a sorted set or multiset.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the tree. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RedBlackTree` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let mut scores = RedBlackTree::new(false);
/// scores.insert(90, "Carol");
/// scores.insert(72, "Alice");
/// scores.insert(90, "Dave");
/// scores.insert(85, "Bob");
///
/// // Ordered by key, ties in insertion order.
/// let names: Vec<_> = scores.values().copied().collect();
/// assert_eq!(names, ["Alice", "Bob", "Carol", "Dave"]);
///
/// // Order statistics.
/// assert_eq!(scores.rank_of(&90), Some(2));
/// assert_eq!(scores.at(1), (&85, &"Bob"));
///
/// // Removing one instance leaves the other.
/// assert_eq!(scores.remove_one(&90), Some("Carol"));
/// assert_eq!(scores.get(&90), Some(&"Dave"));
/// ```
///
/// A uniquely keyed tree refuses duplicates:
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let mut ids = RedBlackTree::new(true);
/// assert!(ids.insert(7, "seven"));
/// assert!(!ids.insert(7, "SEVEN"));
/// assert_eq!(ids.len(), 1);
/// assert_eq!(ids[&7], "seven");
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RedBlackTree<K, V> {
    raw: RawRedBlackTree<K, V>,
}

/// An iterator over the entries of a `RedBlackTree`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`RedBlackTree`].
///
/// # Examples
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let tree = RedBlackTree::from([(1, "a"), (2, "b")]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RedBlackTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRedBlackTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of a `RedBlackTree`, in ascending key order.
///
/// This `struct` is created by the [`into_iter`] method on [`RedBlackTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `RedBlackTree`.
///
/// This `struct` is created by the [`keys`] method on [`RedBlackTree`].
///
/// [`keys`]: RedBlackTree::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `RedBlackTree`.
///
/// This `struct` is created by the [`values`] method on [`RedBlackTree`].
///
/// [`values`]: RedBlackTree::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> RedBlackTree<K, V> {
    /// Makes a new, empty `RedBlackTree`.
    ///
    /// `unique_keys` fixes, for the lifetime of the tree, whether inserting an already present
    /// key is rejected (`true`) or stored alongside the existing entries (`false`).
    ///
    /// Does not allocate beyond the sentinel node.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(true);
    /// tree.insert(1, "a");
    /// assert!(tree.is_uniquely_keyed());
    /// ```
    #[must_use]
    pub fn new(unique_keys: bool) -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::new(unique_keys),
        }
    }

    /// Returns `true` if the tree rejects duplicate keys.
    #[must_use]
    pub const fn is_uniquely_keyed(&self) -> bool {
        self.raw.is_uniquely_keyed()
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut a = RedBlackTree::new(false);
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// a.insert(1, "b");
    /// assert_eq!(a.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the tree, removing all entries. The key policy is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut a = RedBlackTree::new(true);
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first entry in the tree, the one with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(false);
    /// assert_eq!(tree.first_key_value(), None);
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// tree.insert(1, "c");
    /// assert_eq!(tree.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|handle| self.raw.entry(handle))
    }

    /// Returns the last entry in the tree, the one with the largest key.
    ///
    /// Among entries sharing the largest key, this is the most recently inserted.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|handle| self.raw.entry(handle))
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// The walk follows parent links from node to node, so a full pass is O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(true);
    /// tree.insert(3, "c");
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    ///
    /// for (key, value) in tree.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = tree.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([(2, "b"), (1, "a"), (2, "c")]);
    /// let keys: Vec<i32> = tree.keys().copied().collect();
    /// assert_eq!(keys, [1, 2, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Inserts a key-value pair into the tree.
    ///
    /// Returns `false`, and leaves the tree untouched, if the tree is uniquely keyed and `key`
    /// is already present. Otherwise the pair is stored after any entries with an equal key
    /// and `true` is returned.
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
    /// let mut unique = RedBlackTree::new(true);
    /// assert!(unique.insert(37, "a"));
    /// assert!(!unique.insert(37, "b"));
    /// assert_eq!(unique[&37], "a");
    ///
    /// let mut multi = RedBlackTree::new(false);
    /// assert!(multi.insert(37, "a"));
    /// assert!(multi.insert(37, "b"));
    /// assert_eq!(multi.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.raw.insert(key, value).is_ok()
    }

    /// Returns a reference to the value of the earliest inserted entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(false);
    /// tree.insert(1, "a");
    /// tree.insert(1, "b");
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the earliest inserted entry for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| self.raw.entry(handle))
    }

    /// Returns a mutable reference to the value of the earliest inserted entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new(true);
    /// tree.insert(1, "a");
    /// if let Some(x) = tree.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.find(key)?;
        Some(self.raw.entry_mut(handle).1)
    }

    /// Returns `true` if the tree holds at least one entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Removes the earliest inserted entry for `key`, returning its value.
    ///
    /// Returns `None`, and leaves the tree untouched, if the key is absent.
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
    /// tree.insert(1, "a");
    /// tree.insert(1, "b");
    /// assert_eq!(tree.remove_one(&1), Some("a"));
    /// assert_eq!(tree.remove_one(&1), Some("b"));
    /// assert_eq!(tree.remove_one(&1), None);
    /// ```
    pub fn remove_one<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_one_entry(key).map(|(_, v)| v)
    }

    /// Removes the earliest inserted entry for `key`, returning the stored key and value.
    pub fn remove_one_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_one(key)
    }

    /// Removes every entry for `key`, returning how many were removed.
    ///
    /// # Complexity
    ///
    /// O(k log n) for k matching entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(1, 'a'), (2, 'b'), (1, 'c')]);
    /// assert_eq!(tree.remove_all(&1), 2);
    /// assert_eq!(tree.remove_all(&1), 0);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_all(key)
    }

    /// Removes every entry whose key is one of `keys`, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(1, 'a'), (2, 'b'), (1, 'c'), (3, 'd')]);
    /// assert_eq!(tree.remove_all_of(&[1, 3, 4]), 3);
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [2]);
    /// ```
    pub fn remove_all_of<Q>(&mut self, keys: &[Q]) -> usize
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        keys.iter().map(|key| self.raw.remove_all(key)).sum()
    }

    /// Overwrites the value of every entry for `key`, returning how many were updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([(1, 0), (2, 0), (1, 0)]);
    /// assert_eq!(tree.update(&1, 9), 2);
    /// let values: Vec<_> = tree.values().copied().collect();
    /// assert_eq!(values, [9, 9, 0]);
    /// ```
    pub fn update<Q>(&mut self, key: &Q, value: V) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        V: Clone,
    {
        self.raw.update_matching(key, |slot| slot.clone_from(&value))
    }

    /// Overwrites every entry for `key` with `value`, or inserts the pair if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut menu = RedBlackTree::new(false);
    /// menu.set("menu", vec![11, 22, 33]);
    /// menu.set("menu", vec![22, 33, 44]);
    /// assert_eq!(menu.len(), 1);
    /// assert_eq!(menu[&"menu"], [22, 33, 44]);
    /// ```
    pub fn set(&mut self, key: K, value: V)
    where
        V: Clone,
    {
        if self.update(&key, value.clone()) == 0 {
            self.insert(key, value);
        }
    }

    /// Moves all entries from `other` into `self`, leaving `other` empty.
    ///
    /// Entries are inserted one at a time, so a uniquely keyed `self` drops those
    /// of `other` whose keys it already holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let mut a = RedBlackTree::new(true);
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    ///
    /// let mut b = RedBlackTree::new(true);
    /// b.insert(2, "x");
    /// b.insert(3, "c");
    ///
    /// a.append(&mut b);
    /// assert!(b.is_empty());
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a[&2], "b");
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let entries = other.raw.drain_to_vec();
        debug!("appending {} entries to a tree of {}", entries.len(), self.len());
        self.extend(entries);
    }

    /// Fraction of entries for which `predicate` holds, or `0.0` for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')]);
    /// assert_eq!(tree.probability_where(|key, _| key % 2 == 0), 0.5);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn probability_where<F>(&self, mut predicate: F) -> f64
    where
        F: FnMut(&K, &V) -> bool,
    {
        if self.is_empty() {
            return 0.0;
        }
        let hits = self.iter().filter(|&(k, v)| predicate(k, v)).count();
        hits as f64 / self.len() as f64
    }
}

impl<K: Clone, V: Clone> Clone for RedBlackTree<K, V> {
    /// Deep-copies the whole node graph; the copy shares nothing with `self`.
    fn clone(&self) -> Self {
        RedBlackTree { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RedBlackTree<K, V> {
    fn eq(&self, other: &RedBlackTree<K, V>) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for RedBlackTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Creates an empty multi-keyed tree.
impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> RedBlackTree<K, V> {
        RedBlackTree::new(false)
    }
}

/// Collects into a multi-keyed tree, keeping every pair.
impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> RedBlackTree<K, V> {
        let mut tree = RedBlackTree::default();
        tree.extend(iter);
        tree
    }
}

/// Inserts each pair in turn; under the unique-key policy repeated keys keep their first value.
impl<K: Ord, V> Extend<(K, V)> for RedBlackTree<K, V> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for RedBlackTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

/// Returns the value of the earliest inserted entry for `key`.
///
/// # Panics
///
/// Panics if the key is not present in the tree.
impl<K, Q, V> Index<&Q> for RedBlackTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Builds a multi-keyed tree from an array of pairs.
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let tree1 = RedBlackTree::from([(1, 2), (3, 4)]);
/// let tree2: RedBlackTree<_, _> = [(1, 2), (3, 4)].into();
/// assert_eq!(tree1, tree2);
/// ```
impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RedBlackTree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        RedBlackTree::from_iter(arr)
    }
}

/// Union by insertion: a copy of `self` with every entry of `rhs` inserted into it.
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let mut a = RedBlackTree::new(true);
/// a.extend([(1, 'a'), (2, 'b')]);
/// let mut b = RedBlackTree::new(true);
/// b.extend([(2, 'x'), (3, 'c')]);
///
/// let c = &a + &b;
/// assert_eq!(c.len(), 3);
/// assert_eq!(c[&2], 'b');
/// ```
impl<K: Ord + Clone, V: Clone> Add<&RedBlackTree<K, V>> for &RedBlackTree<K, V> {
    type Output = RedBlackTree<K, V>;

    fn add(self, rhs: &RedBlackTree<K, V>) -> RedBlackTree<K, V> {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl<K: Ord + Clone, V: Clone> AddAssign<&RedBlackTree<K, V>> for RedBlackTree<K, V> {
    fn add_assign(&mut self, rhs: &RedBlackTree<K, V>) {
        self.extend(rhs.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Removes every entry whose key appears in `rhs`.
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let mut a = RedBlackTree::from([(1, ()), (2, ()), (2, ()), (3, ())]);
/// a -= &RedBlackTree::from([(2, ())]);
/// assert_eq!(a.keys().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
/// Difference: a copy of `self` without the entries whose keys appear in `rhs`.
///
/// ```
/// use osrb_tree::RedBlackTree;
///
/// let a = RedBlackTree::from([(1, 'a'), (2, 'b'), (3, 'c')]);
/// let b = RedBlackTree::from([(2, 'x'), (4, 'y')]);
///
/// let c = &a - &b;
/// assert_eq!(c.keys().copied().collect::<Vec<_>>(), [1, 3]);
/// assert_eq!(a.len(), 3);
/// ```
impl<K: Ord + Clone, V: Clone> Sub<&RedBlackTree<K, V>> for &RedBlackTree<K, V> {
    type Output = RedBlackTree<K, V>;

    fn sub(self, rhs: &RedBlackTree<K, V>) -> RedBlackTree<K, V> {
        let mut result = self.clone();
        result -= rhs;
        result
    }
}

impl<K: Ord, V> SubAssign<&RedBlackTree<K, V>> for RedBlackTree<K, V> {
    fn sub_assign(&mut self, rhs: &RedBlackTree<K, V>) {
        for key in rhs.keys() {
            self.raw.remove_all(key);
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.entry(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
