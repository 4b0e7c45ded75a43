use super::RedBlackTree;
use crate::Probable;

/// Counts are answered from two rank bounds per key, O(log n) each.
impl<K: Ord, V> Probable for RedBlackTree<K, V> {
    type Element = K;

    fn sample_size(&self) -> usize {
        self.len()
    }

    fn count_of(&self, elements: &[K]) -> usize {
        elements.iter().map(|key| self.raw.count_of(key)).sum()
    }
}
