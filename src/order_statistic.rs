/// A zero-based rank into the sorted order of a tree.
///
/// Entries sharing a key occupy consecutive ranks in insertion order.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Rank, RedBlackTree};
///
/// let mut tree = RedBlackTree::new(true);
/// tree.insert("a", 10);
/// tree.insert("b", 20);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
